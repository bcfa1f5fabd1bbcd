use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded answer: free text or a selection set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Selection(Vec<String>),
}

impl AnswerValue {
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(text) => text.is_empty(),
            AnswerValue::Selection(values) => values.is_empty(),
        }
    }

    /// Scalar view: a selection normalizes to its first element.
    pub fn as_scalar(&self) -> &str {
        match self {
            AnswerValue::Text(text) => text,
            AnswerValue::Selection(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Selection view; scalar answers are not selections.
    pub fn as_selection(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Text(_) => None,
            AnswerValue::Selection(values) => Some(values),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

/// In-progress mapping from field key to respondent-entered value.
pub type ResponseValues = BTreeMap<String, AnswerValue>;

/// Positional field key of a top-level question.
pub fn field_key(index: usize) -> String {
    format!("question-{}", index)
}

/// Field key of the sub-question nested under the question at `index`.
pub fn sub_field_key(index: usize) -> String {
    format!("question-{}-sub", index)
}

/// A submitted response. Created once per submission, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Response {
    pub form_id: Uuid,
    pub form_title: String,
    pub values: ResponseValues,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_are_positional() {
        assert_eq!(field_key(0), "question-0");
        assert_eq!(sub_field_key(3), "question-3-sub");
    }

    #[test]
    fn answer_value_deserializes_both_shapes() {
        let text: AnswerValue = serde_json::from_str("\"sim\"").unwrap();
        assert_eq!(text, AnswerValue::Text("sim".into()));
        let selection: AnswerValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(selection.as_selection(), Some(["a".to_string(), "b".to_string()].as_slice()));
        assert_eq!(selection.as_scalar(), "a");
    }

    #[test]
    fn emptiness_covers_both_shapes() {
        assert!(AnswerValue::Text(String::new()).is_empty());
        assert!(AnswerValue::Selection(Vec::new()).is_empty());
        assert!(!AnswerValue::from("nao").is_empty());
    }
}
