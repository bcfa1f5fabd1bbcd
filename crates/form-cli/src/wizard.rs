use form_spec::{
    AnswerValue, Form, Question, QuestionKind, SubQuestion, SubmitReport, is_valid_decimal,
    is_valid_integer,
};

/// Result of parsing one line of respondent input.
#[derive(Debug, PartialEq)]
pub enum Parsed {
    Answer(AnswerValue),
    /// Optional question left blank.
    Skipped,
}

/// Error produced when parsing answers from the respondent.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub expected: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, expected: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            expected,
        }
    }
}

/// Parses a raw input line for a question of the given kind.
pub fn parse_answer(
    kind: QuestionKind,
    options: &[String],
    required: bool,
    raw: &str,
) -> Result<Parsed, AnswerParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        if required {
            return Err(AnswerParseError::new(
                "This question requires an answer.",
                None,
            ));
        }
        return Ok(Parsed::Skipped);
    }

    let value = match kind {
        QuestionKind::YesNo => AnswerValue::Text(parse_yes_no(trimmed)?),
        QuestionKind::SingleChoice => AnswerValue::Text(parse_choice(options, trimmed)?),
        QuestionKind::MultipleChoice => AnswerValue::Selection(parse_choices(options, trimmed)?),
        QuestionKind::FreeText => AnswerValue::Text(trimmed.to_string()),
        QuestionKind::Integer => {
            if !is_valid_integer(trimmed) {
                return Err(AnswerParseError::new(
                    "Please enter a whole number.",
                    Some("expected integer, e.g. -12".into()),
                ));
            }
            AnswerValue::Text(trimmed.to_string())
        }
        QuestionKind::Decimal => {
            if !is_valid_decimal(trimmed) {
                return Err(AnswerParseError::new(
                    "Please enter a number with up to two decimal places.",
                    Some("expected decimal, e.g. 10.50".into()),
                ));
            }
            AnswerValue::Text(trimmed.to_string())
        }
    };

    Ok(Parsed::Answer(value))
}

fn parse_yes_no(raw: &str) -> Result<String, AnswerParseError> {
    match raw.to_lowercase().as_str() {
        "sim" | "s" | "yes" | "y" => Ok("sim".into()),
        "nao" | "não" | "n" | "no" => Ok("nao".into()),
        _ => Err(AnswerParseError::new(
            "Please answer sim or nao.",
            Some("expected sim/nao".into()),
        )),
    }
}

/// Accepts a 1-based option number or the option text itself.
fn parse_choice(options: &[String], raw: &str) -> Result<String, AnswerParseError> {
    if let Ok(number) = raw.parse::<usize>()
        && number >= 1
        && number <= options.len()
    {
        return Ok(options[number - 1].clone());
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(raw))
        .cloned()
        .ok_or_else(|| {
            AnswerParseError::new(
                format!("Choose one of: {}.", options.join(", ")),
                Some(format!("allowed values: {}", options.join(", "))),
            )
        })
}

fn parse_choices(options: &[String], raw: &str) -> Result<Vec<String>, AnswerParseError> {
    let mut selected = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let choice = parse_choice(options, token)?;
        if !selected.contains(&choice) {
            selected.push(choice);
        }
    }
    if selected.is_empty() {
        return Err(AnswerParseError::new(
            "Select at least one option.",
            Some(format!("allowed values: {}", options.join(", "))),
        ));
    }
    Ok(selected)
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub kind: QuestionKind,
    pub required: bool,
    pub options: Vec<String>,
    pub suggestions: Vec<String>,
    pub nested: bool,
}

impl PromptContext {
    pub fn for_question(index: usize, total: usize, question: &Question) -> Self {
        Self {
            number: index + 1,
            total,
            text: question.text.clone(),
            kind: question.kind,
            required: question.required,
            options: question.options.clone(),
            suggestions: question.suggestions.clone(),
            nested: false,
        }
    }

    pub fn for_sub(index: usize, total: usize, sub: &SubQuestion) -> Self {
        Self {
            number: index + 1,
            total,
            text: sub.text.clone(),
            kind: sub.kind,
            required: sub.required,
            options: sub.options.clone(),
            suggestions: sub.suggestions.clone(),
            nested: true,
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self.kind {
            QuestionKind::YesNo => Some("(sim/nao)"),
            QuestionKind::SingleChoice => Some("(pick one)"),
            QuestionKind::MultipleChoice => Some("(comma-separated choices)"),
            QuestionKind::Integer => Some("(whole number)"),
            QuestionKind::Decimal => Some("(up to two decimal places)"),
            QuestionKind::FreeText => None,
        }
    }
}

/// Prints prompts and outcomes for the fill flow.
pub struct FillPresenter {
    header_printed: bool,
}

impl FillPresenter {
    pub fn new() -> Self {
        Self {
            header_printed: false,
        }
    }

    pub fn show_header(&mut self, form: &Form) {
        if self.header_printed {
            return;
        }
        println!("Form: {}", form.title);
        self.header_printed = true;
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = if prompt.nested {
            format!("  ↳ {}", prompt.text)
        } else {
            format!("{}/{} {}", prompt.number, prompt.total, prompt.text)
        };
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = prompt.hint() {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        for (number, option) in prompt.options.iter().enumerate() {
            println!("  {}. {}", number + 1, option);
        }
        if !prompt.suggestions.is_empty() {
            println!("  Suggestions: {}", prompt.suggestions.join(", "));
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if let Some(expected) = &error.expected {
            eprintln!("  Expected: {}", expected);
        }
    }

    pub fn show_report(&self, report: &SubmitReport) {
        if report.ok {
            return;
        }
        eprintln!("The response is not ready to submit:");
        for error in &report.errors {
            eprintln!("  {}: {}", error.key, error.message);
        }
    }

    pub fn show_completion(&self, form: &Form) {
        println!("Response to '{}' submitted.", form.title);
    }
}

impl Default for FillPresenter {
    fn default() -> Self {
        Self::new()
    }
}
