use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::deserialize_opt_flexible;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub question_id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_opt_flexible")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_opt_flexible")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl Question {
    /// First choice flagged correct. Questions with none cannot be scored.
    pub fn correct_choice(&self) -> Option<&Choice> {
        self.choices.iter().find(|c| c.is_correct)
    }

    pub fn choice_index(&self, text: &str) -> Option<usize> {
        self.choices.iter().position(|c| c.text == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_camel_case_with_missing_fields() {
        let json = r#"{
            "questionId": "q-1",
            "subject": "Toán",
            "class": "10",
            "questionText": "1 + 1 = ?",
            "choices": [
                { "text": "1", "isCorrect": false },
                { "text": "2", "isCorrect": true }
            ],
            "createdAt": "2024-09-01T08:30:00"
        }"#;

        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.question_id, "q-1");
        assert!(q.tags.is_empty());
        assert!(q.updated_at.is_none());
        assert!(q.created_at.is_some());
        assert_eq!(q.correct_choice().map(|c| c.text.as_str()), Some("2"));
        assert_eq!(q.choice_index("1"), Some(0));
    }
}
