use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::question::{Question, QuestionKind};

/// Persisted form definition. Immutable once created except for full
/// replacement; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Form {
    pub id: Uuid,
    pub title: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

/// Form as composed by the builder, before the store assigns identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormDraft {
    pub title: String,
    pub questions: Vec<Question>,
}

/// Construction-time invariant violations reported by [`FormDraft::check`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("form title cannot be empty")]
    EmptyTitle,
    #[error("form must contain at least one question")]
    NoQuestions,
    #[error("question {index} has no text")]
    EmptyText { index: usize },
    #[error("question {index} ({kind}) needs at least two options")]
    NotEnoughOptions { index: usize, kind: QuestionKind },
    #[error("question {index} ({kind}) cannot carry options")]
    UnexpectedOptions { index: usize, kind: QuestionKind },
    #[error("question {index} condition references question {parent}, which is not before it")]
    ForwardReference { index: usize, parent: usize },
    #[error("question {index} condition parent is {kind}; only yes_no and single_choice parents are allowed")]
    UnsupportedParent { index: usize, kind: QuestionKind },
}

impl FormDraft {
    /// Checks the invariants the builder guarantees: non-empty title and
    /// question texts, options present exactly for choice kinds, conditions
    /// referencing strictly earlier questions of an allowed parent kind.
    /// Conditions are never re-checked at evaluation time.
    pub fn check(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.questions.is_empty() {
            return Err(DraftError::NoQuestions);
        }

        for (index, question) in self.questions.iter().enumerate() {
            check_shape(index, question.text.as_str(), question.kind, &question.options)?;

            if let Some(condition) = &question.condition {
                if condition.parent_index >= index {
                    return Err(DraftError::ForwardReference {
                        index,
                        parent: condition.parent_index,
                    });
                }
                let parent_kind = self.questions[condition.parent_index].kind;
                if !parent_kind.allowed_as_parent() {
                    return Err(DraftError::UnsupportedParent {
                        index,
                        kind: parent_kind,
                    });
                }
            }

            if let Some(sub) = &question.sub_question {
                check_shape(index, sub.text.as_str(), sub.kind, &sub.options)?;
            }
        }

        Ok(())
    }
}

fn check_shape(
    index: usize,
    text: &str,
    kind: QuestionKind,
    options: &[String],
) -> Result<(), DraftError> {
    if text.trim().is_empty() {
        return Err(DraftError::EmptyText { index });
    }
    if kind.uses_options() {
        if options.len() < 2 {
            return Err(DraftError::NotEnoughOptions { index, kind });
        }
    } else if !options.is_empty() {
        return Err(DraftError::UnexpectedOptions { index, kind });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::{Condition, Expected};

    fn question(text: &str, kind: QuestionKind) -> Question {
        Question {
            text: text.into(),
            kind,
            options: if kind.uses_options() {
                vec!["Option A".into(), "Option B".into()]
            } else {
                Vec::new()
            },
            required: false,
            suggestions: Vec::new(),
            condition: None,
            sub_question: None,
        }
    }

    #[test]
    fn accepts_well_formed_draft() {
        let draft = FormDraft {
            title: "Survey".into(),
            questions: vec![
                question("Do you agree?", QuestionKind::YesNo),
                question("Pick one", QuestionKind::SingleChoice),
            ],
        };
        assert_eq!(draft.check(), Ok(()));
    }

    #[test]
    fn rejects_choice_question_with_one_option() {
        let mut bad = question("Pick one", QuestionKind::SingleChoice);
        bad.options = vec!["only".into()];
        let draft = FormDraft {
            title: "Survey".into(),
            questions: vec![bad],
        };
        assert_eq!(
            draft.check(),
            Err(DraftError::NotEnoughOptions {
                index: 0,
                kind: QuestionKind::SingleChoice
            })
        );
    }

    #[test]
    fn rejects_options_on_text_question() {
        let mut bad = question("Tell us", QuestionKind::FreeText);
        bad.options = vec!["stray".into()];
        let draft = FormDraft {
            title: "Survey".into(),
            questions: vec![bad],
        };
        assert_eq!(
            draft.check(),
            Err(DraftError::UnexpectedOptions {
                index: 0,
                kind: QuestionKind::FreeText
            })
        );
    }

    #[test]
    fn rejects_self_and_forward_condition_references() {
        let mut conditioned = question("Follow-up", QuestionKind::FreeText);
        conditioned.condition = Some(Condition {
            parent_index: 1,
            expected_value: Expected::One("sim".into()),
        });
        let draft = FormDraft {
            title: "Survey".into(),
            questions: vec![
                question("Do you agree?", QuestionKind::YesNo),
                conditioned,
            ],
        };
        assert_eq!(
            draft.check(),
            Err(DraftError::ForwardReference { index: 1, parent: 1 })
        );
    }

    #[test]
    fn rejects_free_text_condition_parent() {
        let mut conditioned = question("Follow-up", QuestionKind::FreeText);
        conditioned.condition = Some(Condition {
            parent_index: 0,
            expected_value: Expected::One("anything".into()),
        });
        let draft = FormDraft {
            title: "Survey".into(),
            questions: vec![question("Tell us", QuestionKind::FreeText), conditioned],
        };
        assert_eq!(
            draft.check(),
            Err(DraftError::UnsupportedParent {
                index: 1,
                kind: QuestionKind::FreeText
            })
        );
    }
}
