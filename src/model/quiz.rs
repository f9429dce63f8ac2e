use rand::Rng;

use crate::error::Result;
use crate::model::{
    db::question::{Question, QuestionId},
    mongodb::Coll,
};

/// The set of questions a quiz draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizScope {
    All,
    /// Only questions whose category reference equals this one.
    Category(String),
}

impl QuizScope {
    /// Fetch every question in scope.
    pub async fn candidates(&self, questions: &Coll<Question>) -> Result<Vec<Question>> {
        match self {
            Self::All => Question::all(questions).await,
            Self::Category(category) => Question::in_category(questions, category).await,
        }
    }
}

/// Pick one question the player has not seen yet, uniformly at random.
///
/// Returns `None` when every candidate has already been asked, which ends the quiz.
pub fn pick_unseen<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &[QuestionId],
    rng: &mut R,
) -> Option<Question> {
    let mut unseen = candidates
        .into_iter()
        .filter(|question| !previous.contains(&question.id))
        .collect::<Vec<_>>();
    if unseen.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..unseen.len());
    Some(unseen.swap_remove(index))
}
