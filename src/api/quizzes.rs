use log::debug;
use rocket::{serde::json::Json, Route};

use crate::error::Result;
use crate::model::{
    api::{
        question::QuestionDesc,
        quiz::{QuizQuestion, QuizRequest},
    },
    db::question::Question,
    mongodb::Coll,
    quiz::pick_unseen,
};

pub fn routes() -> Vec<Route> {
    routes![next_question]
}

#[post("/quizzes", data = "<request>", format = "json")]
async fn next_question(
    request: Json<QuizRequest>,
    questions: Coll<Question>,
) -> Result<Json<QuizQuestion>> {
    let scope = request.scope();
    let candidates = scope.candidates(&questions).await?;

    let picked = pick_unseen(
        candidates,
        &request.previous_questions,
        &mut rand::thread_rng(),
    );
    if picked.is_none() {
        debug!("Quiz over {scope:?} after {} questions", request.previous_questions.len());
    }

    Ok(Json(QuizQuestion {
        success: true,
        question: picked.map(QuestionDesc::from),
    }))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::{json, Value},
    };

    use super::*;

    async fn play(client: &Client, body: Value) -> QuizQuestion {
        let response = client
            .post("/quizzes")
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        response.into_json::<QuizQuestion>().await.unwrap()
    }

    #[backend_test(seeded)]
    async fn question_comes_from_chosen_category(client: Client) {
        let next = play(
            &client,
            json!({
                "quiz_category": {"type": "Science", "id": 1},
                "previous_questions": [2, 4],
            }),
        )
        .await;

        assert!(next.success);
        let question = next.question.unwrap();
        assert_eq!(question.category, "1");
        assert!(![2, 4].contains(&question.id));
    }

    #[backend_test(seeded)]
    async fn exhausted_category_ends_quiz(client: Client) {
        let next = play(
            &client,
            json!({
                "quiz_category": {"type": "Science", "id": "1"},
                "previous_questions": [1, 2, 3, 4, 5],
            }),
        )
        .await;

        assert!(next.success);
        assert!(next.question.is_none());
    }

    #[backend_test(seeded)]
    async fn all_categories_returns_last_unseen(client: Client) {
        let next = play(
            &client,
            json!({
                "quiz_category": {"type": "click", "id": 0},
                "previous_questions": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            }),
        )
        .await;

        assert_eq!(next.question.map(|q| q.id), Some(12));
    }

    #[backend_test(seeded)]
    async fn empty_body_draws_from_everything(client: Client) {
        let next = play(&client, json!({})).await;

        assert!(next.success);
        assert!(next.question.is_some());
    }

    #[backend_test]
    async fn empty_store_ends_quiz(client: Client) {
        let next = play(&client, json!({ "previous_questions": [] })).await;
        assert!(next.question.is_none());
    }
}
