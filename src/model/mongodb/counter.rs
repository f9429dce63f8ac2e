use mongodb::{
    bson::{doc, Bson, Document},
    error::Error as DbError,
    options::{FindOneAndUpdateOptions, FindOneOptions, ReturnDocument, UpdateOptions},
    Database,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::mongodb::{
    collection::{CATEGORIES, QUESTIONS},
    Coll,
};

/// Counter backing question IDs.
pub const QUESTION_ID_COUNTER: &str = "question_id";

/// Counter backing category IDs.
pub const CATEGORY_ID_COUNTER: &str = "category_id";

/// A counter object used to implement auto-increment fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename = "_id")]
    pub id: String,
    pub next: u32,
}

impl Counter {
    /// Atomically retrieve the next value of the counter with the given ID.
    pub async fn next(counters: &Coll<Counter>, id: &str) -> Result<u32> {
        let update = doc! {
            "$inc": { "next": 1 }
        };
        let options: FindOneAndUpdateOptions = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::Before)
            .build();
        let counter = counters
            .find_one_and_update(doc! { "_id": id }, update, options)
            .await?
            .ok_or_else(|| Error::Internal(format!("Failed to find counter with ID {}", id)))?;
        Ok(counter.next)
    }
}

/// Ensure every auto-increment counter exists and is ahead of the highest ID
/// already present in its collection, so externally seeded rows never clash
/// with newly assigned IDs.
///
/// This operation is idempotent.
pub async fn ensure_counters_exist(db: &Database) -> std::result::Result<(), DbError> {
    let counters = Coll::<Counter>::from_db(db);
    let upsert = UpdateOptions::builder().upsert(true).build();
    for (counter_id, collection) in [
        (QUESTION_ID_COUNTER, QUESTIONS),
        (CATEGORY_ID_COUNTER, CATEGORIES),
    ] {
        let start = highest_id(db, collection).await? + 1;
        counters
            .update_one(
                doc! { "_id": counter_id },
                doc! { "$max": { "next": start } },
                upsert.clone(),
            )
            .await?;
    }
    Ok(())
}

/// The highest integer `_id` in the given collection, or 0 if it is empty.
async fn highest_id(db: &Database, collection: &str) -> std::result::Result<i64, DbError> {
    let options = FindOneOptions::builder()
        .sort(doc! { "_id": -1 })
        .projection(doc! { "_id": 1 })
        .build();
    let highest = db
        .collection::<Document>(collection)
        .find_one(None, options)
        .await?;
    Ok(match highest.as_ref().and_then(|doc| doc.get("_id")) {
        Some(Bson::Int32(id)) => i64::from(*id),
        Some(Bson::Int64(id)) => *id,
        _ => 0,
    })
}
