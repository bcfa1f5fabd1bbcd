use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed set of question variants supported by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    YesNo,
    SingleChoice,
    MultipleChoice,
    FreeText,
    Integer,
    Decimal,
}

impl QuestionKind {
    /// Kinds that carry a respondent-facing options list.
    pub fn uses_options(self) -> bool {
        matches!(self, QuestionKind::SingleChoice | QuestionKind::MultipleChoice)
    }

    /// Kinds that accept inline answer suggestions.
    pub fn uses_suggestions(self) -> bool {
        matches!(
            self,
            QuestionKind::FreeText | QuestionKind::Integer | QuestionKind::Decimal
        )
    }

    /// Kinds whose answer is a selection set rather than a single scalar.
    pub fn is_multi_select(self) -> bool {
        matches!(self, QuestionKind::MultipleChoice)
    }

    /// Kinds the builder accepts as condition parents.
    pub fn allowed_as_parent(self) -> bool {
        matches!(self, QuestionKind::YesNo | QuestionKind::SingleChoice)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuestionKind::YesNo => "yes_no",
            QuestionKind::SingleChoice => "single_choice",
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::FreeText => "free_text",
            QuestionKind::Integer => "integer",
            QuestionKind::Decimal => "decimal",
        };
        write!(f, "{}", label)
    }
}

/// Expected value of a condition: a single option or a set of options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Expected {
    One(String),
    Many(Vec<String>),
}

impl Expected {
    /// Scalar view: a set normalizes to its first element, an empty set to "".
    pub fn as_scalar(&self) -> &str {
        match self {
            Expected::One(value) => value,
            Expected::Many(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Set view used for intersection matching.
    pub fn contains(&self, candidate: &str) -> bool {
        match self {
            Expected::One(value) => value == candidate,
            Expected::Many(values) => values.iter().any(|value| value == candidate),
        }
    }
}

/// Ties a question's visibility to an earlier question's recorded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    /// Position of the governing question; must come strictly before the owner.
    pub parent_index: usize,
    pub expected_value: Expected,
}

/// Condition attached to a sub-question. The parent is always the owning
/// question, so only the expected value is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubCondition {
    pub expected_value: Expected,
}

/// A single top-level question in a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    pub text: String,
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_question: Option<SubQuestion>,
}

/// Nested follow-up attached to a question. Mirrors `Question` without the
/// recursive field, capping nesting depth at one by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubQuestion {
    pub text: String,
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<SubCondition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_round_trip() {
        for kind in [
            QuestionKind::YesNo,
            QuestionKind::SingleChoice,
            QuestionKind::MultipleChoice,
            QuestionKind::FreeText,
            QuestionKind::Integer,
            QuestionKind::Decimal,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
            let back: QuestionKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn expected_deserializes_scalar_and_set() {
        let one: Expected = serde_json::from_str("\"sim\"").unwrap();
        assert_eq!(one, Expected::One("sim".into()));
        let many: Expected = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(many, Expected::Many(vec!["a".into(), "b".into()]));
        assert_eq!(many.as_scalar(), "a");
        assert!(many.contains("b"));
        assert!(!many.contains("c"));
    }

    #[test]
    fn empty_set_normalizes_to_empty_scalar() {
        assert_eq!(Expected::Many(Vec::new()).as_scalar(), "");
    }
}
