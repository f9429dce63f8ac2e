mod bson;
mod collection;
mod counter;
mod errors;

pub use bson::{contains_filter, u32_id_filter};
pub use collection::{ensure_schema, Coll, MongoCollection};
pub use counter::{Counter, CATEGORY_ID_COUNTER, QUESTION_ID_COUNTER};
pub use errors::{classify, DbFailure};
