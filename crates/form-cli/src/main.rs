pub mod builder;

mod wizard;

use builder::{KIND_MENU, describe_form, list_line, parse_kind};
use chrono::Utc;
use clap::{Parser, Subcommand};
use form_spec::{
    AnswerValue, Condition, Expected, Form, FormDraft, Question, QuestionKind, Response,
    ResponseValues, SubCondition, SubQuestion, can_submit, field_key, is_sub_visible, is_visible,
    prune_hidden, sub_field_key,
};
use form_store::{FormStore, JsonFileStore};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use uuid::Uuid;
use wizard::{FillPresenter, Parsed, PromptContext, parse_answer};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Terminal form builder and fill wizard",
    long_about = "Compose forms with conditional questions, persist them locally, and collect validated responses"
)]
struct Cli {
    /// Directory holding forms.json and responses.json (defaults to
    /// FORMFORGE_DATA_DIR or ./formforge-data).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose a new form interactively and persist it.
    New,
    /// List stored forms, newest first.
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 6)]
        page_size: usize,
    },
    /// Print a stored form.
    Show {
        id: Uuid,
        /// Emit the raw JSON record instead of the summary.
        #[arg(long)]
        json: bool,
    },
    /// Delete a stored form.
    Delete { id: Uuid },
    /// Answer a stored form and submit a response.
    Fill { id: Uuid },
    /// Validate an answers JSON file against a form JSON file.
    Validate {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
}

fn main() -> CliResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut store = JsonFileStore::open(resolve_data_dir(cli.data_dir))?;

    match cli.command {
        Command::New => run_new(&mut store),
        Command::List { page, page_size } => run_list(&mut store, page, page_size),
        Command::Show { id, json } => run_show(&mut store, id, json),
        Command::Delete { id } => run_delete(&mut store, id),
        Command::Fill { id } => run_fill(&mut store, id),
        Command::Validate { form, answers } => run_validate(form, answers),
    }
}

fn resolve_data_dir(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| env::var_os("FORMFORGE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("formforge-data"))
}

fn run_new(store: &mut dyn FormStore) -> CliResult<()> {
    println!("Interactive form builder");
    let title = prompt_non_empty(&mark_required("Form title"), None)?;

    let mut questions = Vec::new();
    loop {
        let text = match prompt_optional("Question text (blank to finish)")? {
            Some(text) => text,
            None => break,
        };

        let kind = prompt_kind()?;
        let options = if kind.uses_options() {
            prompt_options()?
        } else {
            Vec::new()
        };
        let required = prompt_bool("Required?", true)?;
        let suggestions = if kind.uses_suggestions() {
            prompt_csv("Answer suggestions (comma separated, blank for none)")?
        } else {
            Vec::new()
        };
        let condition = prompt_condition(&questions)?;
        let sub_question = prompt_sub_question(kind)?;

        questions.push(Question {
            text,
            kind,
            options,
            required,
            suggestions,
            condition,
            sub_question,
        });
    }

    let draft = FormDraft { title, questions };
    draft.check()?;

    let form = store.create(draft)?;
    println!("Created form {}", form.id);
    Ok(())
}

fn prompt_kind() -> CliResult<QuestionKind> {
    loop {
        let value = prompt_line(&format!("Question type ({})", KIND_MENU), Some("free_text"))?;
        match parse_kind(&value) {
            Ok(kind) => return Ok(kind),
            Err(err) => println!("{}", err),
        }
    }
}

fn prompt_options() -> CliResult<Vec<String>> {
    loop {
        let options = prompt_csv("Comma separated options (at least two)")?;
        if options.len() >= 2 {
            return Ok(options);
        }
        println!("Choice questions need at least two options.");
    }
}

/// Offers a visibility condition when an earlier question can govern one.
/// Only yes/no and single-choice questions are offered as parents.
fn prompt_condition(questions: &[Question]) -> CliResult<Option<Condition>> {
    let eligible: Vec<usize> = questions
        .iter()
        .enumerate()
        .filter(|(_, question)| question.kind.allowed_as_parent())
        .map(|(index, _)| index)
        .collect();
    if eligible.is_empty() || !prompt_bool("Add visibility condition?", false)? {
        return Ok(None);
    }

    println!("Eligible parent questions:");
    for index in &eligible {
        println!(
            "  {}. {} [{}]",
            index + 1,
            questions[*index].text,
            questions[*index].kind
        );
    }

    let parent_index = loop {
        let raw = prompt_non_empty(&mark_required("Parent question number"), None)?;
        match raw.trim().parse::<usize>() {
            Ok(number) if number >= 1 && eligible.contains(&(number - 1)) => break number - 1,
            _ => println!("Pick one of the listed question numbers."),
        }
    };

    let parent = &questions[parent_index];
    let expected = match parent.kind {
        QuestionKind::YesNo => loop {
            let raw = prompt_line("Show when the answer is (sim/nao)", Some("sim"))?;
            match raw.trim().to_lowercase().as_str() {
                "sim" => break "sim".to_string(),
                "nao" | "não" => break "nao".to_string(),
                _ => println!("Answer sim or nao."),
            }
        },
        _ => loop {
            let raw = prompt_non_empty(
                &mark_required(&format!(
                    "Show when the answer is (one of: {})",
                    parent.options.join(", ")
                )),
                None,
            )?;
            if let Some(option) = parent
                .options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(raw.trim()))
            {
                break option.clone();
            }
            println!("Pick one of the parent's options.");
        },
    };

    Ok(Some(Condition {
        parent_index,
        expected_value: Expected::One(expected),
    }))
}

fn prompt_sub_question(owner_kind: QuestionKind) -> CliResult<Option<SubQuestion>> {
    if !prompt_bool("Add a sub-question?", false)? {
        return Ok(None);
    }

    let text = prompt_non_empty(&mark_required("Sub-question text"), None)?;
    let kind = prompt_kind()?;
    let options = if kind.uses_options() {
        prompt_options()?
    } else {
        Vec::new()
    };
    let required = prompt_bool("Sub-question required?", true)?;
    let suggestions = if kind.uses_suggestions() {
        prompt_csv("Answer suggestions (comma separated, blank for none)")?
    } else {
        Vec::new()
    };

    let condition = if prompt_bool("Show the sub-question only for a specific answer?", false)? {
        let expected = match owner_kind {
            QuestionKind::MultipleChoice => {
                Expected::Many(prompt_csv("Show when any of these options are selected")?)
            }
            _ => Expected::One(prompt_non_empty(
                &mark_required("Show when the parent answer is"),
                None,
            )?),
        };
        Some(SubCondition {
            expected_value: expected,
        })
    } else {
        None
    };

    Ok(Some(SubQuestion {
        text,
        kind,
        options,
        required,
        suggestions,
        condition,
    }))
}

fn run_list(store: &mut dyn FormStore, page: usize, page_size: usize) -> CliResult<()> {
    let listing = store.list(page, page_size)?;
    if listing.items.is_empty() {
        println!("No forms on page {}.", listing.page);
    }
    for form in &listing.items {
        println!("{}", list_line(form));
    }
    println!(
        "Page {} of {} ({} form{})",
        listing.page,
        listing.total_pages.max(1),
        listing.total_items,
        if listing.total_items == 1 { "" } else { "s" },
    );
    if listing.has_next {
        println!("More: --page {}", listing.page + 1);
    }
    Ok(())
}

fn run_show(store: &mut dyn FormStore, id: Uuid, json: bool) -> CliResult<()> {
    let form = store.get_by_id(id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&form)?);
    } else {
        print!("{}", describe_form(&form));
    }
    Ok(())
}

fn run_delete(store: &mut dyn FormStore, id: Uuid) -> CliResult<()> {
    store.delete(id)?;
    println!("Deleted form {}", id);
    Ok(())
}

fn run_fill(store: &mut dyn FormStore, id: Uuid) -> CliResult<()> {
    let form = store.get_by_id(id)?;
    let total = form.questions.len();
    let mut presenter = FillPresenter::new();
    presenter.show_header(&form);

    let mut values = ResponseValues::new();
    for (index, question) in form.questions.iter().enumerate() {
        // Visibility can change with every answer; drop stale values before
        // deciding whether to ask.
        prune_hidden(&form.questions, &mut values);
        if !is_visible(question, &values) {
            continue;
        }
        ask_question(&form, index, &mut values, &presenter)?;
    }

    loop {
        prune_hidden(&form.questions, &mut values);
        let report = can_submit(&form.questions, &values);
        if report.ok {
            break;
        }
        presenter.show_report(&report);
        for key in &report.missing {
            // Re-answering an earlier question can hide a later one in the
            // same pass; check against the current values before re-asking.
            let Some((index, is_sub)) = reask_target(&form, key, &values) else {
                continue;
            };
            if is_sub {
                ask_sub_question(&form, index, &mut values, &presenter)?;
            } else {
                ask_question(&form, index, &mut values, &presenter)?;
            }
        }
    }

    store.save_response(Response {
        form_id: form.id,
        form_title: form.title.clone(),
        values,
        submitted_at: Utc::now(),
    })?;
    tracing::debug!(form_id = %form.id, "response submitted");
    presenter.show_completion(&form);
    Ok(())
}

/// Prompts the question at `index`, then its sub-question if one is visible.
fn ask_question(
    form: &Form,
    index: usize,
    values: &mut ResponseValues,
    presenter: &FillPresenter,
) -> CliResult<()> {
    let question = &form.questions[index];
    let key = field_key(index);
    let prompt = PromptContext::for_question(index, form.questions.len(), question);
    match prompt_answer(&prompt, question.kind, &question.options, question.required, presenter)? {
        Some(value) => {
            values.insert(key, value);
        }
        None => {
            values.remove(&key);
        }
    }
    ask_sub_question(form, index, values, presenter)
}

fn ask_sub_question(
    form: &Form,
    index: usize,
    values: &mut ResponseValues,
    presenter: &FillPresenter,
) -> CliResult<()> {
    let question = &form.questions[index];
    let Some(sub) = &question.sub_question else {
        return Ok(());
    };
    let key = field_key(index);
    let sub_key = sub_field_key(index);
    if !is_sub_visible(question, sub, values.get(&key)) {
        values.remove(&sub_key);
        return Ok(());
    }
    let prompt = PromptContext::for_sub(index, form.questions.len(), sub);
    match prompt_answer(&prompt, sub.kind, &sub.options, sub.required, presenter)? {
        Some(value) => {
            values.insert(sub_key, value);
        }
        None => {
            values.remove(&sub_key);
        }
    }
    Ok(())
}

fn prompt_answer(
    prompt: &PromptContext,
    kind: QuestionKind,
    options: &[String],
    required: bool,
    presenter: &FillPresenter,
) -> CliResult<Option<AnswerValue>> {
    loop {
        presenter.show_prompt(prompt);
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if input.trim().eq_ignore_ascii_case("exit") {
            return Err("fill aborted by user".into());
        }

        match parse_answer(kind, options, required, &input) {
            Ok(Parsed::Answer(value)) => return Ok(Some(value)),
            Ok(Parsed::Skipped) => return Ok(None),
            Err(err) => presenter.show_parse_error(&err),
        }
    }
}

/// Maps a positional field key back to its question index and sub flag.
fn locate_field(key: &str) -> Option<(usize, bool)> {
    let rest = key.strip_prefix("question-")?;
    if let Some(index) = rest.strip_suffix("-sub") {
        Some((index.parse().ok()?, true))
    } else {
        Some((rest.parse().ok()?, false))
    }
}

/// Resolves a missing-field key to a question to re-ask, skipping fields
/// whose question is no longer visible under the current values.
fn reask_target(form: &Form, key: &str, values: &ResponseValues) -> Option<(usize, bool)> {
    let (index, is_sub) = locate_field(key)?;
    let question = form.questions.get(index)?;
    if !is_visible(question, values) {
        return None;
    }
    if is_sub {
        let sub = question.sub_question.as_ref()?;
        if !is_sub_visible(question, sub, values.get(&field_key(index))) {
            return None;
        }
    }
    Some((index, is_sub))
}

fn run_validate(form_path: PathBuf, answers_path: PathBuf) -> CliResult<()> {
    let form_json = fs::read_to_string(form_path)?;
    let form: Form = serde_json::from_str(&form_json)?;
    let answers_json = fs::read_to_string(answers_path)?;
    let mut values: ResponseValues = serde_json::from_str(&answers_json)?;

    // Hidden answers never reach submission; apply the same clearing rule to
    // offline files so stale keys do not fail the check.
    let ignored = prune_hidden(&form.questions, &mut values);
    if !ignored.is_empty() {
        println!("Ignored hidden answers: {}", ignored.join(", "));
    }

    let report = can_submit(&form.questions, &values);
    println!(
        "Validation result: {}",
        if report.ok { "valid" } else { "invalid" }
    );
    for error in &report.errors {
        println!("  {} - {}", error.key, error.message);
    }

    if report.ok {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn prompt_line(prompt: &str, default: Option<&str>) -> CliResult<String> {
    if let Some(default_value) = default {
        print!("{} [{}]: ", prompt, default_value);
    } else {
        print!("{}: ", prompt);
    }
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        if let Some(default_value) = default {
            Ok(default_value.to_string())
        } else {
            Ok(String::new())
        }
    } else {
        Ok(trimmed.to_string())
    }
}

fn prompt_optional(prompt: &str) -> CliResult<Option<String>> {
    let value = prompt_line(prompt, None)?;
    if value.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

fn prompt_non_empty(prompt: &str, default: Option<&str>) -> CliResult<String> {
    loop {
        let value = prompt_line(prompt, default)?;
        if !value.trim().is_empty() {
            return Ok(value);
        }
        println!("Value cannot be empty.");
    }
}

fn prompt_bool(prompt: &str, default: bool) -> CliResult<bool> {
    let prompt_text = format!("{} (y/n)", prompt.trim());
    let default_hint = if default { "Y" } else { "N" };
    loop {
        let line = prompt_line(&prompt_text, Some(default_hint))?;
        match line.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => {
                println!("Invalid answer '{}'. Expected yes or no.", other);
            }
        }
    }
}

fn prompt_csv(prompt: &str) -> CliResult<Vec<String>> {
    let raw = prompt_line(prompt, None)?;
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .collect())
}

fn mark_required(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.to_lowercase().contains("required") {
        trimmed.to_string()
    } else {
        format!("{} (required)", trimmed)
    }
}
