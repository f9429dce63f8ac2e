pub mod category;
pub mod question;

#[cfg(test)]
pub use self::test_data::seed_examples;

#[cfg(test)]
mod test_data {
    use mongodb::Database;

    use super::{
        category::{examples::EXAMPLE_CATEGORIES, Category},
        question::{examples::example_questions, Question},
    };
    use crate::error::Result;
    use crate::model::mongodb::{Coll, Counter};

    /// Insert the example categories and questions into a freshly prepared database.
    pub async fn seed_examples(db: &Database) -> Result<()> {
        let categories = Coll::<Category>::from_db(db);
        let questions = Coll::<Question>::from_db(db);
        let counters = Coll::<Counter>::from_db(db);

        for name in EXAMPLE_CATEGORIES {
            Category::insert(*name, &categories, &counters).await?;
        }
        for question in example_questions() {
            Question::insert(question, &questions, &counters).await?;
        }
        Ok(())
    }
}
