use std::ops::Deref;

use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
};
use rocket::futures::TryStreamExt;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::mongodb::{contains_filter, u32_id_filter, Coll, Counter, QUESTION_ID_COUNTER};

/// Store-assigned question identifier.
pub type QuestionId = u32;

/// Core question data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCore {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    /// Category reference. Not checked against the categories collection.
    pub category: String,
}

/// A question from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: QuestionId,
    #[serde(flatten)]
    pub details: QuestionCore,
}

impl Deref for Question {
    type Target = QuestionCore;

    fn deref(&self) -> &Self::Target {
        &self.details
    }
}

impl Question {
    /// All questions, ordered by ID.
    pub async fn all(questions: &Coll<Question>) -> Result<Vec<Question>> {
        find_sorted(questions, None).await
    }

    /// All questions whose category reference equals `category`, ordered by ID.
    pub async fn in_category(questions: &Coll<Question>, category: &str) -> Result<Vec<Question>> {
        find_sorted(questions, doc! { "category": category }).await
    }

    /// All questions whose text contains `term`, ignoring case, ordered by ID.
    pub async fn search(questions: &Coll<Question>, term: &str) -> Result<Vec<Question>> {
        find_sorted(questions, contains_filter("question", term)).await
    }

    /// Total number of stored questions.
    pub async fn count(questions: &Coll<Question>) -> Result<u64> {
        Ok(questions.count_documents(None, None).await?)
    }

    /// Assign the next ID to the given question and store it.
    pub async fn insert(
        details: QuestionCore,
        questions: &Coll<Question>,
        counters: &Coll<Counter>,
    ) -> Result<Question> {
        let id = Counter::next(counters, QUESTION_ID_COUNTER).await?;
        let question = Question { id, details };
        questions.insert_one(&question, None).await?;
        Ok(question)
    }

    /// Remove the question with the given ID.
    ///
    /// Deleting a question that does not exist is unprocessable rather than
    /// not-found: the route exists, the operation cannot be carried out.
    pub async fn delete(questions: &Coll<Question>, id: QuestionId) -> Result<()> {
        let result = questions.delete_one(u32_id_filter(id), None).await?;
        if result.deleted_count == 0 {
            Err(Error::unprocessable(format!("Question with ID '{}'", id)))
        } else {
            Ok(())
        }
    }
}

async fn find_sorted(
    questions: &Coll<Question>,
    filter: impl Into<Option<Document>>,
) -> Result<Vec<Question>> {
    let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
    let found = questions
        .find(filter, options)
        .await?
        .try_collect::<Vec<_>>()
        .await?;
    Ok(found)
}

/// Example data for tests.
#[cfg(test)]
pub(crate) mod examples {
    use super::*;

    impl QuestionCore {
        pub fn example() -> Self {
            Self {
                question: "How many planets are there in the Solar System?".to_string(),
                answer: "Eight".to_string(),
                difficulty: 2,
                category: "1".to_string(),
            }
        }
    }

    /// `(question, answer, difficulty, category)` rows inserted by
    /// `#[backend_test(seeded)]`.
    pub const EXAMPLE_QUESTIONS: &[(&str, &str, i32, &str)] = &[
        ("What is the heaviest organ in the human body?", "The Liver", 4, "1"),
        ("Who discovered penicillin?", "Alexander Fleming", 3, "1"),
        ("Hematology is a branch of medicine involving the study of what?", "Blood", 4, "1"),
        ("What is the chemical symbol for gold?", "Au", 2, "1"),
        ("How many bones are in the adult human body?", "206", 3, "1"),
        ("La Giaconda is better known as what?", "Mona Lisa", 3, "2"),
        ("How many paintings did Van Gogh sell in his lifetime?", "One", 4, "2"),
        ("Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 1, "2"),
        ("Who painted the ceiling of the Sistine Chapel?", "Michelangelo", 2, "2"),
        ("What is the largest lake in Africa?", "Lake Victoria", 2, "3"),
        ("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, "3"),
        ("What is the capital of Australia?", "Canberra", 2, "3"),
    ];

    pub fn example_questions() -> Vec<QuestionCore> {
        EXAMPLE_QUESTIONS
            .iter()
            .map(|(question, answer, difficulty, category)| QuestionCore {
                question: question.to_string(),
                answer: answer.to_string(),
                difficulty: *difficulty,
                category: category.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[backend_test]
    async fn insert_assigns_increasing_ids(questions: Coll<Question>, counters: Coll<Counter>) {
        let first = Question::insert(QuestionCore::example(), &questions, &counters)
            .await
            .unwrap();
        let second = Question::insert(QuestionCore::example(), &questions, &counters)
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let stored = questions
            .find_one(u32_id_filter(second.id), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, second);
        assert_eq!(Question::count(&questions).await.unwrap(), 2);
    }

    #[backend_test(seeded)]
    async fn listing_is_ordered_by_id(questions: Coll<Question>) {
        let all = Question::all(&questions).await.unwrap();
        assert_eq!(all.len(), examples::EXAMPLE_QUESTIONS.len());
        assert!(all.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[backend_test(seeded)]
    async fn category_filter_uses_reference(questions: Coll<Question>) {
        let art = Question::in_category(&questions, "2").await.unwrap();
        assert_eq!(art.len(), 4);
        assert!(art.iter().all(|question| question.category == "2"));

        let none = Question::in_category(&questions, "99").await.unwrap();
        assert!(none.is_empty());
    }

    #[backend_test(seeded)]
    async fn search_ignores_case(questions: Coll<Question>) {
        let found = Question::search(&questions, "PAINT").await.unwrap();
        let texts = found
            .iter()
            .map(|question| question.question.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            texts,
            vec![
                "How many paintings did Van Gogh sell in his lifetime?",
                "Who painted the ceiling of the Sistine Chapel?",
            ]
        );
    }

    #[backend_test(seeded)]
    async fn search_treats_term_literally(questions: Coll<Question>) {
        // As a regex this would match every question.
        let found = Question::search(&questions, ".*").await.unwrap();
        assert!(found.is_empty());
    }

    #[backend_test(seeded)]
    async fn delete_missing_question_is_unprocessable(questions: Coll<Question>) {
        Question::delete(&questions, 1).await.unwrap();
        let result = Question::delete(&questions, 1).await;
        assert!(matches!(result, Err(Error::Unprocessable(_))));
        assert_eq!(
            Question::count(&questions).await.unwrap() as usize,
            examples::EXAMPLE_QUESTIONS.len() - 1
        );
    }
}
