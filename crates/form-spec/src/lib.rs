#![allow(missing_docs)]

pub mod model;
pub mod validate;
pub mod visibility;

pub use model::{
    AnswerValue, Condition, DraftError, Expected, Form, FormDraft, Question, QuestionKind,
    Response, ResponseValues, SubCondition, SubQuestion, field_key, sub_field_key,
};
pub use validate::{FieldError, SubmitReport, can_submit, is_valid_decimal, is_valid_integer};
pub use visibility::{is_sub_visible, is_visible, prune_hidden};
