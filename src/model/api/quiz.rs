use serde::{Deserialize, Serialize};

use crate::model::{
    api::{category::CategoryRef, question::QuestionDesc},
    db::question::QuestionId,
    quiz::QuizScope,
};

/// The category a quiz is being played in, as chosen by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizCategory {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<CategoryRef>,
}

/// Body of a request for the next quiz question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
    #[serde(default)]
    pub previous_questions: Vec<QuestionId>,
}

impl QuizRequest {
    /// Which questions this quiz draws from.
    ///
    /// The category ID is taken as-is: it is the stored category ID, the same
    /// one used by the category listing routes.
    pub fn scope(&self) -> QuizScope {
        match self.quiz_category.as_ref().and_then(|c| c.id.as_ref()) {
            Some(id) if !id.is_all() => QuizScope::Category(id.to_reference()),
            _ => QuizScope::All,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub success: bool,
    /// `None` once every question in scope has been asked.
    pub question: Option<QuestionDesc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use rocket::serde::json::{json, serde_json};

    fn scope_of(body: rocket::serde::json::Value) -> QuizScope {
        serde_json::from_value::<QuizRequest>(body).unwrap().scope()
    }

    #[test]
    fn category_id_is_used_unadjusted() {
        let scope = scope_of(json!({
            "quiz_category": {"type": "Science", "id": "1"},
            "previous_questions": [],
        }));
        assert_eq!(scope, QuizScope::Category("1".to_string()));

        let scope = scope_of(json!({
            "quiz_category": {"type": "Art", "id": 2},
            "previous_questions": [1, 2],
        }));
        assert_eq!(scope, QuizScope::Category("2".to_string()));
    }

    #[test]
    fn missing_or_zero_category_means_all() {
        assert_eq!(scope_of(json!({})), QuizScope::All);
        assert_eq!(scope_of(json!({ "quiz_category": null })), QuizScope::All);
        assert_eq!(
            scope_of(json!({ "quiz_category": {"type": "click", "id": 0} })),
            QuizScope::All
        );
        assert_eq!(
            scope_of(json!({ "quiz_category": {"type": "click"} })),
            QuizScope::All
        );
    }

    #[test]
    fn previous_questions_default_to_empty() {
        let request: QuizRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.previous_questions.is_empty());
    }

    #[test]
    fn exhausted_quiz_serialises_null_question() {
        let response = QuizQuestion {
            success: true,
            question: None,
        };
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "success": true, "question": null })
        );
    }
}
