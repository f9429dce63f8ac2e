use serde::{Deserialize, Serialize};

/// A category reference as sent by clients: either a JSON integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Number(i64),
    Text(String),
}

impl CategoryRef {
    /// The reference as stored against questions.
    pub fn to_reference(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }

    /// Whether this reference selects every category. Stored IDs start at 1,
    /// so `0` and the empty string never name a real category.
    pub fn is_all(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Text(s) => matches!(s.trim(), "" | "0"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryList {
    pub success: bool,
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use rocket::serde::json::serde_json;

    #[test]
    fn accepts_numbers_and_strings() {
        let number: CategoryRef = serde_json::from_str("3").unwrap();
        let text: CategoryRef = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(number.to_reference(), "3");
        assert_eq!(text.to_reference(), "3");
    }

    #[test]
    fn zero_and_blank_select_everything() {
        assert!(CategoryRef::Number(0).is_all());
        assert!(CategoryRef::Text("0".to_string()).is_all());
        assert!(CategoryRef::Text(" ".to_string()).is_all());
        assert!(!CategoryRef::Number(1).is_all());
        assert!(!CategoryRef::Text("2".to_string()).is_all());
    }
}
