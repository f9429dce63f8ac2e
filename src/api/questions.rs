use log::debug;
use rocket::{serde::json::Json, Route};

use crate::error::{Error, Result};
use crate::model::{
    api::question::{
        describe_all, CreatedQuestion, DeletedQuestion, NewQuestionRequest, QuestionPage,
        SearchRequest, SearchResults,
    },
    db::{
        category::Category,
        question::{Question, QuestionCore, QuestionId},
    },
    mongodb::{Coll, Counter},
    pagination::Page,
};

pub fn routes() -> Vec<Route> {
    routes![
        get_questions,
        delete_question,
        create_question,
        search_questions,
    ]
}

#[get("/questions?<page>")]
async fn get_questions(
    page: Option<i64>,
    questions: Coll<Question>,
    categories: Coll<Category>,
) -> Result<Json<QuestionPage>> {
    let page = Page::from(page);
    let all = Question::all(&questions).await?;
    let total_questions = all.len() as u64;

    let current = page.slice(all);
    if current.is_empty() {
        return Err(Error::not_found(format!(
            "Page {} of {} questions",
            page.number(),
            total_questions
        )));
    }

    let categories = Category::names_by_id(&categories).await?;
    Ok(Json(QuestionPage {
        success: true,
        questions: describe_all(current),
        total_questions,
        categories,
    }))
}

#[delete("/questions/<question_id>?<page>")]
async fn delete_question(
    question_id: QuestionId,
    page: Option<i64>,
    questions: Coll<Question>,
) -> Result<Json<DeletedQuestion>> {
    Question::delete(&questions, question_id).await?;
    debug!("Deleted question {question_id}");

    let remaining = Question::all(&questions).await?;
    let total_questions = remaining.len() as u64;
    Ok(Json(DeletedQuestion {
        success: true,
        deleted: question_id,
        questions: describe_all(Page::from(page).slice(remaining)),
        total_questions,
    }))
}

#[post("/questions", data = "<new_question>", format = "json")]
async fn create_question(
    new_question: Json<NewQuestionRequest>,
    questions: Coll<Question>,
    counters: Coll<Counter>,
) -> Result<Json<CreatedQuestion>> {
    let details = QuestionCore::try_from(new_question.into_inner())?;
    let question = Question::insert(details, &questions, &counters).await?;
    debug!("Created question {}", question.id);

    let total_questions = Question::count(&questions).await?;
    Ok(Json(CreatedQuestion {
        success: true,
        created: question.id,
        total_questions,
    }))
}

#[post("/questions/search?<page>", data = "<search>", format = "json")]
async fn search_questions(
    page: Option<i64>,
    search: Json<SearchRequest>,
    questions: Coll<Question>,
) -> Result<Json<SearchResults>> {
    let term = search
        .term()
        .ok_or_else(|| Error::not_found("Questions matching an empty search term"))?;

    let found = Question::search(&questions, term).await?;
    let total_questions = found.len() as u64;
    Ok(Json(SearchResults {
        success: true,
        questions: describe_all(Page::from(page).slice(found)),
        total_questions,
    }))
}
