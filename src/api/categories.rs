use rocket::{serde::json::Json, Route};

use crate::error::{Error, Result};
use crate::model::{
    api::{
        category::CategoryList,
        question::{describe_all, CategoryQuestions},
    },
    db::{category::Category, question::Question},
    mongodb::Coll,
    pagination::Page,
};

pub fn routes() -> Vec<Route> {
    routes![get_categories, category_questions]
}

#[get("/categories")]
async fn get_categories(categories: Coll<Category>) -> Result<Json<CategoryList>> {
    let names = Category::all(&categories)
        .await?
        .into_iter()
        .map(|category| category.kind)
        .collect();
    Ok(Json(CategoryList {
        success: true,
        categories: names,
    }))
}

#[get("/categories/<category_id>/questions?<page>")]
async fn category_questions(
    category_id: &str,
    page: Option<i64>,
    questions: Coll<Question>,
) -> Result<Json<CategoryQuestions>> {
    let in_category = Question::in_category(&questions, category_id).await?;
    let total_questions = in_category.len() as u64;

    let current = Page::from(page).slice(in_category);
    if current.is_empty() {
        return Err(Error::not_found(format!(
            "Questions in category '{}'",
            category_id
        )));
    }

    Ok(Json(CategoryQuestions {
        success: true,
        questions: describe_all(current),
        total_questions,
        current_category: category_id.to_string(),
    }))
}
