use crate::model::question::{Expected, Question, QuestionKind, SubQuestion};
use crate::model::response::{AnswerValue, ResponseValues, field_key, sub_field_key};

/// Decides whether a question is currently shown given the in-progress
/// response map. Questions without a condition are always visible.
pub fn is_visible(question: &Question, values: &ResponseValues) -> bool {
    let Some(condition) = &question.condition else {
        return true;
    };
    let parent_value = values.get(&field_key(condition.parent_index));
    matches(question.kind, parent_value, &condition.expected_value)
}

/// Decides whether the sub-question nested under `question` is shown, given
/// the owning question's own current value. The owning question's kind picks
/// set vs scalar matching, since its answer shape is what gets compared.
pub fn is_sub_visible(
    question: &Question,
    sub: &SubQuestion,
    own_value: Option<&AnswerValue>,
) -> bool {
    let Some(condition) = &sub.condition else {
        return true;
    };
    matches(question.kind, own_value, &condition.expected_value)
}

/// Matching rule shared by top-level and nested conditions. Multi-select
/// answers match on set intersection; everything else compares scalars, with
/// sets normalized to their first element and absence to the empty string.
fn matches(kind: QuestionKind, recorded: Option<&AnswerValue>, expected: &Expected) -> bool {
    if kind.is_multi_select() {
        let Some(AnswerValue::Selection(selected)) = recorded else {
            return false;
        };
        selected.iter().any(|value| expected.contains(value))
    } else {
        let current = recorded.map(AnswerValue::as_scalar).unwrap_or("");
        current == expected.as_scalar()
    }
}

/// Removes answers owned by hidden questions (and hidden sub-questions) so
/// they never contribute stale values to submission. Conditions only reference
/// earlier questions, so a single ascending pass resolves cascaded hides.
/// Returns the removed keys.
pub fn prune_hidden(questions: &[Question], values: &mut ResponseValues) -> Vec<String> {
    let mut removed = Vec::new();

    for (index, question) in questions.iter().enumerate() {
        let key = field_key(index);
        let sub_key = sub_field_key(index);

        if !is_visible(question, values) {
            if values.remove(&key).is_some() {
                removed.push(key);
            }
            if values.remove(&sub_key).is_some() {
                removed.push(sub_key);
            }
            continue;
        }

        if let Some(sub) = &question.sub_question {
            if !is_sub_visible(question, sub, values.get(&key))
                && values.remove(&sub_key).is_some()
            {
                removed.push(sub_key);
            }
        } else if values.remove(&sub_key).is_some() {
            // Stray sub answer with no sub-question to own it.
            removed.push(sub_key);
        }
    }

    removed
}
