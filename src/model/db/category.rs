use std::collections::BTreeMap;

use mongodb::{bson::doc, options::FindOptions};
use rocket::futures::TryStreamExt;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::mongodb::{Coll, Counter, CATEGORY_ID_COUNTER};

/// Store-assigned category identifier.
pub type CategoryId = u32;

/// A question category from the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    /// Display name.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    /// All categories, ordered by ID.
    pub async fn all(categories: &Coll<Category>) -> Result<Vec<Category>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let found = categories
            .find(None, options)
            .await?
            .try_collect::<Vec<_>>()
            .await?;
        Ok(found)
    }

    /// Map from category ID to display name.
    pub async fn names_by_id(categories: &Coll<Category>) -> Result<BTreeMap<CategoryId, String>> {
        let names = Self::all(categories)
            .await?
            .into_iter()
            .map(|category| (category.id, category.kind))
            .collect();
        Ok(names)
    }

    /// Assign the next ID to a category with the given display name and store it.
    pub async fn insert(
        kind: impl Into<String>,
        categories: &Coll<Category>,
        counters: &Coll<Counter>,
    ) -> Result<Category> {
        let id = Counter::next(counters, CATEGORY_ID_COUNTER).await?;
        let category = Category {
            id,
            kind: kind.into(),
        };
        categories.insert_one(&category, None).await?;
        Ok(category)
    }
}
