use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// The text shown on the card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMessage {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl Default for CardMessage {
    fn default() -> Self {
        Self {
            title: "Happy Rose Day, Rohit!".to_string(),
            content: "Sending you a rose as soft as your heart and as beautiful as your soul. \
                      May your day be filled with fragrance and love."
                .to_string(),
            author: "With Love".to_string(),
        }
    }
}

impl CardMessage {
    /// Parses generated text into a message.
    ///
    /// All three fields must be present and be strings; anything else,
    /// including empty text, is [`GenerateError::Malformed`]. Unknown
    /// extra fields are ignored.
    pub fn from_generated(text: &str) -> Result<Self, GenerateError> {
        let text = if text.trim().is_empty() { "{}" } else { text };
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_rose_day_greeting() {
        let m = CardMessage::default();
        assert_eq!(m.title, "Happy Rose Day, Rohit!");
        assert_eq!(
            m.content,
            "Sending you a rose as soft as your heart and as beautiful as your soul. May your day be filled with fragrance and love."
        );
        assert_eq!(m.author, "With Love");
    }

    #[test]
    fn parses_complete_object_and_ignores_extras() {
        let m = CardMessage::from_generated(
            r#"{"title":"For Rohit","content":"A rose for you.","author":"Always","mood":"soft"}"#,
        )
        .unwrap();
        assert_eq!(
            m,
            CardMessage {
                title: "For Rohit".into(),
                content: "A rose for you.".into(),
                author: "Always".into(),
            }
        );
    }

    #[test]
    fn rejects_missing_field() {
        let err = CardMessage::from_generated(r#"{"title":"t","content":"c"}"#).unwrap_err();
        assert!(matches!(err, GenerateError::Malformed(_)));
    }

    #[test]
    fn rejects_empty_and_non_object_text() {
        assert!(CardMessage::from_generated("").is_err());
        assert!(CardMessage::from_generated("   ").is_err());
        assert!(CardMessage::from_generated("Roses are red").is_err());
        assert!(CardMessage::from_generated(r#"{"title":1,"content":"c","author":"a"}"#).is_err());
    }
}
