pub mod form;
pub mod question;
pub mod response;

pub use form::{DraftError, Form, FormDraft};
pub use question::{Condition, Expected, Question, QuestionKind, SubCondition, SubQuestion};
pub use response::{AnswerValue, Response, ResponseValues, field_key, sub_field_key};
