use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::question::{Question, QuestionKind};
use crate::model::response::{AnswerValue, ResponseValues, field_key, sub_field_key};
use crate::visibility::{is_sub_visible, is_visible};

// Same patterns the numeric inputs enforce while typing.
static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("integer pattern compiles"));
static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d{1,2})?$").expect("decimal pattern compiles"));

/// True iff `raw` is an optional minus sign followed by digits.
pub fn is_valid_integer(raw: &str) -> bool {
    INTEGER_PATTERN.is_match(raw)
}

/// True iff `raw` is a number with at most two decimal places.
pub fn is_valid_decimal(raw: &str) -> bool {
    DECIMAL_PATTERN.is_match(raw)
}

/// Per-field failure detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub key: String,
    pub message: String,
    pub code: String,
}

/// Outcome of a submission check. `missing` collects every failing field key,
/// required and format failures alike; `ok` holds iff it is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReport {
    pub ok: bool,
    pub missing: BTreeSet<String>,
    pub errors: Vec<FieldError>,
}

impl SubmitReport {
    fn flag(&mut self, key: &str, message: &str, code: &str) {
        self.missing.insert(key.to_string());
        self.errors.push(FieldError {
            key: key.to_string(),
            message: message.to_string(),
            code: code.to_string(),
        });
        self.ok = false;
    }
}

/// Decides whether the response map is submittable for the given questions.
/// Hidden questions are skipped entirely; visible required questions must hold
/// a non-empty value, and numeric kinds must match their format whenever a
/// value is present, required or not.
pub fn can_submit(questions: &[Question], values: &ResponseValues) -> SubmitReport {
    let mut report = SubmitReport {
        ok: true,
        missing: BTreeSet::new(),
        errors: Vec::new(),
    };

    for (index, question) in questions.iter().enumerate() {
        if !is_visible(question, values) {
            continue;
        }

        let key = field_key(index);
        check_field(
            &mut report,
            &key,
            question.kind,
            question.required,
            values.get(&key),
        );

        if let Some(sub) = &question.sub_question
            && is_sub_visible(question, sub, values.get(&key))
        {
            let sub_key = sub_field_key(index);
            check_field(
                &mut report,
                &sub_key,
                sub.kind,
                sub.required,
                values.get(&sub_key),
            );
        }
    }

    report
}

fn check_field(
    report: &mut SubmitReport,
    key: &str,
    kind: QuestionKind,
    required: bool,
    value: Option<&AnswerValue>,
) {
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        if required {
            report.flag(key, "an answer is required", "required");
        }
        return;
    };

    match kind {
        QuestionKind::Integer => {
            if !INTEGER_PATTERN.is_match(value.as_scalar()) {
                report.flag(key, "enter a whole number", "integer_format");
            }
        }
        QuestionKind::Decimal => {
            if !DECIMAL_PATTERN.is_match(value.as_scalar()) {
                report.flag(key, "enter a number with up to two decimal places", "decimal_format");
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_pattern_accepts_signed_digits() {
        for ok in ["0", "42", "-7", "1234567890"] {
            assert!(INTEGER_PATTERN.is_match(ok), "{} should match", ok);
        }
        for bad in ["", "12.5", "1e3", "- 1", "abc", "1.0"] {
            assert!(!INTEGER_PATTERN.is_match(bad), "{} should not match", bad);
        }
    }

    #[test]
    fn decimal_pattern_caps_fraction_at_two_digits() {
        for ok in ["10", "10.5", "10.50", "-3.25", "0.1"] {
            assert!(DECIMAL_PATTERN.is_match(ok), "{} should match", ok);
        }
        for bad in ["10.503", ".5", "10.", "abc", "1,5"] {
            assert!(!DECIMAL_PATTERN.is_match(bad), "{} should not match", bad);
        }
    }
}
