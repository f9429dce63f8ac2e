use mongodb::bson::{doc, Document};

/// Create a filter document matching the given integer `_id`.
pub fn u32_id_filter(id: u32) -> Document {
    doc! {
        "_id": id,
    }
}

/// Create a filter matching documents whose `field` contains `term` as a
/// case-insensitive substring. The term is matched literally.
pub fn contains_filter(field: &str, term: &str) -> Document {
    doc! {
        field: {
            "$regex": regex::escape(term),
            "$options": "i",
        }
    }
}
