//! A simple CLI tool for loading categories and questions into the trivia database.
//! Rows are inserted through the same model code the server uses, so IDs come
//! from the same counters and never clash with questions created later.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use clap::{Arg, ArgAction, ArgMatches, Command};
use mongodb::error::Error as DbError;
use rocket::{figment::Error as FigmentError, serde::json::serde_json};
use serde::Deserialize;
use thiserror::Error;

use trivia_backend::{
    config::{figment, DbConfig},
    error::Error as ModelError,
    model::{
        db::{
            category::{Category, CategoryId},
            question::{Question, QuestionCore},
        },
        mongodb::{ensure_schema, Coll, Counter},
    },
};

const PROGRAM_NAME: &str = "trivia-seed";

const ABOUT_TEXT: &str = "Load trivia categories and questions into the database.

The database is configured exactly as for the server: `Rocket.toml`,
`ROCKET_*` variables, and `DB_URL`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`.";

const SEED_PATH: &str = "SEED_PATH";

const SEED_PATH_HELP: &str = "The path to a JSON file of the form\n\
{\"categories\": [name, ...], \"questions\": [{question, answer, difficulty, category}, ...]},\n\
where each question's category is one of the listed names";

const WIPE: &str = "wipe";

const WIPE_HELP: &str = "Delete all existing categories and questions first";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .arg(
            Arg::new(SEED_PATH)
                .help(SEED_PATH_HELP)
                .action(ArgAction::Set)
                .required(true),
        )
        .arg(
            Arg::new(WIPE)
                .long(WIPE)
                .help(WIPE_HELP)
                .action(ArgAction::SetTrue),
        )
}

/// Errors that this program may produce.
#[derive(Debug, Error)]
enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Format(#[from] serde_json::Error),
    #[error("Question {index} refers to unknown category '{category}'")]
    UnknownCategory { index: usize, category: String },
    #[error("Invalid database config: {0}")]
    Config(#[from] FigmentError),
    #[error("Database error: {0}")]
    Db(#[from] DbError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// The contents of a seed file.
#[derive(Debug, Deserialize)]
struct SeedData {
    categories: Vec<String>,
    questions: Vec<SeedQuestion>,
}

/// A question as written in a seed file, referring to its category by name.
#[derive(Debug, Deserialize)]
struct SeedQuestion {
    question: String,
    answer: String,
    difficulty: i32,
    category: String,
}

impl SeedData {
    fn load(path: &str) -> Result<Self, Error> {
        let file = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(file)?)
    }

    /// Check that every question names a listed category, before anything is written.
    fn check(&self) -> Result<(), Error> {
        for (index, question) in self.questions.iter().enumerate() {
            if !self.categories.contains(&question.category) {
                return Err(Error::UnknownCategory {
                    index,
                    category: question.category.clone(),
                });
            }
        }
        Ok(())
    }

    /// The listed category names not already present in `known`, in file order
    /// and without repeats.
    fn missing_categories<'a>(&'a self, known: &HashMap<String, CategoryId>) -> Vec<&'a str> {
        let mut missing: Vec<&str> = Vec::new();
        for name in &self.categories {
            if !known.contains_key(name) && !missing.contains(&name.as_str()) {
                missing.push(name.as_str());
            }
        }
        missing
    }

    /// Turn the questions into storable form, given the IDs assigned to each category.
    fn resolve(
        self,
        category_ids: &HashMap<String, CategoryId>,
    ) -> Result<Vec<QuestionCore>, Error> {
        self.questions
            .into_iter()
            .enumerate()
            .map(|(index, seed)| {
                let id = category_ids
                    .get(&seed.category)
                    .ok_or_else(|| Error::UnknownCategory {
                        index,
                        category: seed.category.clone(),
                    })?;
                Ok(QuestionCore {
                    question: seed.question,
                    answer: seed.answer,
                    difficulty: seed.difficulty,
                    category: id.to_string(),
                })
            })
            .collect()
    }
}

/// Insert everything in the seed file, returning how many categories and
/// questions were added. Categories that already exist by name are reused
/// rather than inserted again.
async fn seed(data: SeedData, wipe: bool) -> Result<(usize, usize), Error> {
    data.check()?;

    let config = DbConfig::from_figment(&figment())?;
    let client = config.connect().await?;
    let db = client.database(config.db_name());

    let categories = Coll::<Category>::from_db(&db);
    let questions = Coll::<Question>::from_db(&db);
    let counters = Coll::<Counter>::from_db(&db);

    if wipe {
        questions.drop(None).await?;
        categories.drop(None).await?;
        counters.drop(None).await?;
    }
    ensure_schema(&db).await?;

    // On duplicate names the first stored category wins.
    let mut category_ids = HashMap::new();
    for category in Category::all(&categories).await? {
        category_ids.entry(category.kind).or_insert(category.id);
    }

    let mut added = Vec::new();
    for name in data.missing_categories(&category_ids) {
        added.push(Category::insert(name, &categories, &counters).await?);
    }
    let added_categories = added.len();
    for category in added {
        category_ids.insert(category.kind, category.id);
    }

    let new_questions = data.resolve(&category_ids)?;
    for details in &new_questions {
        Question::insert(details.clone(), &questions, &counters).await?;
    }

    Ok((added_categories, new_questions.len()))
}

/// Run the seeding, report the result, and return the exit code.
async fn run(args: &ArgMatches) -> u8 {
    let path: &String = args.get_one(SEED_PATH).unwrap(); // Required argument is guaranteed to be present.
    let wipe = args.get_flag(WIPE);

    let result = match SeedData::load(path) {
        Ok(data) => seed(data, wipe).await,
        Err(err) => Err(err),
    };
    match result {
        Ok((categories, questions)) => {
            println!("Added {categories} categories and {questions} questions.");
            0
        }
        Err(err) => {
            println!("{err}");
            1
        }
    }
}

#[rocket::main]
async fn main() {
    let args = cli().get_matches();
    let exit_code = run(&args).await;
    std::process::exit(exit_code.into())
}
