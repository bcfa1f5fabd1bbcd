use form_spec::{Form, Question, QuestionKind};

/// Parses a question type label as entered in the builder.
pub fn parse_kind(value: &str) -> Result<QuestionKind, String> {
    match value.trim().to_lowercase().as_str() {
        "yes_no" | "yes/no" | "yesno" => Ok(QuestionKind::YesNo),
        "single_choice" | "single" => Ok(QuestionKind::SingleChoice),
        "multiple_choice" | "multiple" => Ok(QuestionKind::MultipleChoice),
        "free_text" | "text" => Ok(QuestionKind::FreeText),
        "integer" | "int" => Ok(QuestionKind::Integer),
        "decimal" => Ok(QuestionKind::Decimal),
        _ => Err(format!("unknown question type '{}'", value)),
    }
}

pub const KIND_MENU: &str = "yes_no|single_choice|multiple_choice|free_text|integer|decimal";

/// One listing line: id, title, question count, creation date.
pub fn list_line(form: &Form) -> String {
    format!(
        "{}  {}  ({} question{})  {}",
        form.id,
        form.title,
        form.questions.len(),
        if form.questions.len() == 1 { "" } else { "s" },
        form.created_at.format("%Y-%m-%d %H:%M"),
    )
}

/// Multi-line description used by `show`.
pub fn describe_form(form: &Form) -> String {
    let mut out = format!(
        "{}\nid: {}\ncreated: {}\n",
        form.title,
        form.id,
        form.created_at.to_rfc3339()
    );
    for (index, question) in form.questions.iter().enumerate() {
        out.push_str(&describe_question(index, question));
    }
    out
}

fn describe_question(index: usize, question: &Question) -> String {
    let mut line = format!("{}. {} [{}]", index + 1, question.text, question.kind);
    if question.required {
        line.push_str(" *");
    }
    if !question.options.is_empty() {
        line.push_str(&format!(" options: {}", question.options.join(", ")));
    }
    if let Some(condition) = &question.condition {
        line.push_str(&format!(
            " (shown when question {} = {})",
            condition.parent_index + 1,
            condition.expected_value.as_scalar()
        ));
    }
    line.push('\n');
    if let Some(sub) = &question.sub_question {
        line.push_str(&format!("   ↳ {} [{}]", sub.text, sub.kind));
        if sub.required {
            line.push_str(" *");
        }
        line.push('\n');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind_accepts_labels_and_aliases() {
        assert_eq!(parse_kind("yes_no"), Ok(QuestionKind::YesNo));
        assert_eq!(parse_kind(" Single "), Ok(QuestionKind::SingleChoice));
        assert_eq!(parse_kind("int"), Ok(QuestionKind::Integer));
        assert!(parse_kind("list").is_err());
    }
}
