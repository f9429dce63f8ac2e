use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    api::category::CategoryRef,
    db::{
        category::CategoryId,
        question::{Question, QuestionCore, QuestionId},
    },
};

/// A question as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDesc {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i32,
}

impl From<Question> for QuestionDesc {
    fn from(question: Question) -> Self {
        let Question { id, details } = question;
        Self {
            id,
            question: details.question,
            answer: details.answer,
            category: details.category,
            difficulty: details.difficulty,
        }
    }
}

/// Format a page of questions for output.
pub fn describe_all(questions: Vec<Question>) -> Vec<QuestionDesc> {
    questions.into_iter().map(QuestionDesc::from).collect()
}

/// Body of a question creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestionRequest {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: CategoryRef,
}

impl TryFrom<NewQuestionRequest> for QuestionCore {
    type Error = Error;

    fn try_from(request: NewQuestionRequest) -> Result<Self> {
        if request.question.trim().is_empty() || request.answer.trim().is_empty() {
            return Err(Error::unprocessable("Question and answer must not be blank"));
        }
        Ok(Self {
            question: request.question,
            answer: request.answer,
            difficulty: request.difficulty,
            category: request.category.to_reference(),
        })
    }
}

/// Body of a search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

impl SearchRequest {
    /// The term to search for, unless it is missing or empty.
    pub fn term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<QuestionDesc>,
    pub total_questions: u64,
    pub categories: BTreeMap<CategoryId, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedQuestion {
    pub success: bool,
    pub deleted: QuestionId,
    pub questions: Vec<QuestionDesc>,
    pub total_questions: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedQuestion {
    pub success: bool,
    pub created: QuestionId,
    pub total_questions: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub success: bool,
    pub questions: Vec<QuestionDesc>,
    pub total_questions: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryQuestions {
    pub success: bool,
    pub questions: Vec<QuestionDesc>,
    pub total_questions: u64,
    pub current_category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    use rocket::serde::json::{json, serde_json};

    #[test]
    fn formatted_record_is_flat() {
        let question = Question {
            id: 5,
            details: QuestionCore::example(),
        };
        let value = serde_json::to_value(QuestionDesc::from(question)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 5,
                "question": "How many planets are there in the Solar System?",
                "answer": "Eight",
                "category": "1",
                "difficulty": 2,
            })
        );
    }

    #[test]
    fn creation_accepts_numeric_category() {
        let request: NewQuestionRequest = serde_json::from_value(json!({
            "question": "Who invented Peanut Butter?",
            "answer": "George Washington Carver",
            "difficulty": 2,
            "category": 4,
        }))
        .unwrap();
        let core = QuestionCore::try_from(request).unwrap();
        assert_eq!(core.category, "4");
    }

    #[test]
    fn creation_rejects_blank_text() {
        let request = NewQuestionRequest {
            question: "   ".to_string(),
            answer: "Yes".to_string(),
            difficulty: 1,
            category: CategoryRef::Text("1".to_string()),
        };
        assert!(matches!(
            QuestionCore::try_from(request),
            Err(Error::Unprocessable(_))
        ));
    }

    #[test]
    fn empty_search_term_is_no_term() {
        let missing: SearchRequest = serde_json::from_value(json!({})).unwrap();
        let empty: SearchRequest = serde_json::from_value(json!({ "searchTerm": "" })).unwrap();
        let given: SearchRequest = serde_json::from_value(json!({ "searchTerm": "title" })).unwrap();
        assert_eq!(missing.term(), None);
        assert_eq!(empty.term(), None);
        assert_eq!(given.term(), Some("title"));
    }
}
