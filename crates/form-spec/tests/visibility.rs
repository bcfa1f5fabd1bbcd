use form_spec::{
    AnswerValue, Condition, Expected, Question, QuestionKind, ResponseValues, SubCondition,
    SubQuestion, field_key, is_sub_visible, is_visible, prune_hidden, sub_field_key,
};

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

fn conditioned(text: &str, kind: QuestionKind, parent: usize, expected: Expected) -> Question {
    let mut q = question(text, kind);
    q.condition = Some(Condition {
        parent_index: parent,
        expected_value: expected,
    });
    q
}

fn answers(entries: &[(&str, AnswerValue)]) -> ResponseValues {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn unconditioned_question_is_always_visible() {
    let q = question("Anything to add?", QuestionKind::FreeText);
    assert!(is_visible(&q, &ResponseValues::new()));
    let filled = answers(&[("question-0", AnswerValue::from("whatever"))]);
    assert!(is_visible(&q, &filled));
}

#[test]
fn yes_no_parent_matches_on_exact_value() {
    let q = conditioned(
        "Which symptoms?",
        QuestionKind::FreeText,
        0,
        Expected::One("sim".into()),
    );

    let yes = answers(&[("question-0", AnswerValue::from("sim"))]);
    assert!(is_visible(&q, &yes));

    let no = answers(&[("question-0", AnswerValue::from("nao"))]);
    assert!(!is_visible(&q, &no));

    assert!(!is_visible(&q, &ResponseValues::new()));
}

#[test]
fn multiple_choice_question_matches_on_intersection() {
    let q = conditioned(
        "Which of these?",
        QuestionKind::MultipleChoice,
        0,
        Expected::Many(vec!["a".into(), "b".into()]),
    );

    let overlapping = answers(&[(
        "question-0",
        AnswerValue::Selection(vec!["c".into(), "b".into()]),
    )]);
    assert!(is_visible(&q, &overlapping));

    let disjoint = answers(&[("question-0", AnswerValue::Selection(vec!["c".into()]))]);
    assert!(!is_visible(&q, &disjoint));

    // A scalar parent value never matches a multi-select condition.
    let scalar = answers(&[("question-0", AnswerValue::from("a"))]);
    assert!(!is_visible(&q, &scalar));
}

#[test]
fn multiple_choice_question_matches_scalar_expected_by_membership() {
    let q = conditioned(
        "Which of these?",
        QuestionKind::MultipleChoice,
        0,
        Expected::One("b".into()),
    );
    let selected = answers(&[(
        "question-0",
        AnswerValue::Selection(vec!["a".into(), "b".into()]),
    )]);
    assert!(is_visible(&q, &selected));
}

#[test]
fn evaluation_is_idempotent_for_an_unchanged_map() {
    let q = conditioned(
        "Follow-up",
        QuestionKind::FreeText,
        0,
        Expected::One("sim".into()),
    );
    let values = answers(&[("question-0", AnswerValue::from("sim"))]);
    let first = is_visible(&q, &values);
    let second = is_visible(&q, &values);
    assert_eq!(first, second);
}

#[test]
fn prune_removes_hidden_answers() {
    let questions = vec![
        question("Do you agree?", QuestionKind::YesNo),
        conditioned(
            "Why?",
            QuestionKind::FreeText,
            0,
            Expected::One("sim".into()),
        ),
    ];

    // Parent flipped from "sim" to "nao" while the follow-up still holds text.
    let mut values = answers(&[
        ("question-0", AnswerValue::from("nao")),
        ("question-1", AnswerValue::from("stale reasoning")),
    ]);

    let removed = prune_hidden(&questions, &mut values);
    assert_eq!(removed, vec![field_key(1)]);
    assert!(!values.contains_key("question-1"));
}

#[test]
fn prune_cascades_through_chained_conditions_in_one_pass() {
    let questions = vec![
        question("Gate", QuestionKind::YesNo),
        conditioned(
            "Pick one",
            QuestionKind::SingleChoice,
            0,
            Expected::One("sim".into()),
        ),
        conditioned(
            "Why that one?",
            QuestionKind::FreeText,
            1,
            Expected::One("Option A".into()),
        ),
    ];

    let mut values = answers(&[
        ("question-0", AnswerValue::from("nao")),
        ("question-1", AnswerValue::from("Option A")),
        ("question-2", AnswerValue::from("reasons")),
    ]);

    let removed = prune_hidden(&questions, &mut values);
    assert_eq!(removed, vec![field_key(1), field_key(2)]);
    assert_eq!(values.len(), 1);
}

#[test]
fn sub_question_gates_on_the_owning_questions_value() {
    let sub = SubQuestion {
        text: "How often?".into(),
        kind: QuestionKind::FreeText,
        options: Vec::new(),
        required: false,
        suggestions: Vec::new(),
        condition: Some(SubCondition {
            expected_value: Expected::One("sim".into()),
        }),
    };
    let mut owner = question("Do you smoke?", QuestionKind::YesNo);
    owner.sub_question = Some(sub.clone());

    assert!(is_sub_visible(&owner, &sub, Some(&AnswerValue::from("sim"))));
    assert!(!is_sub_visible(&owner, &sub, Some(&AnswerValue::from("nao"))));
    assert!(!is_sub_visible(&owner, &sub, None));
}

#[test]
fn prune_drops_sub_answer_when_sub_condition_stops_matching() {
    let sub = SubQuestion {
        text: "How often?".into(),
        kind: QuestionKind::FreeText,
        options: Vec::new(),
        required: false,
        suggestions: Vec::new(),
        condition: Some(SubCondition {
            expected_value: Expected::One("sim".into()),
        }),
    };
    let mut owner = question("Do you smoke?", QuestionKind::YesNo);
    owner.sub_question = Some(sub);

    let mut values = answers(&[
        ("question-0", AnswerValue::from("nao")),
        ("question-0-sub", AnswerValue::from("daily")),
    ]);

    let removed = prune_hidden(std::slice::from_ref(&owner), &mut values);
    assert_eq!(removed, vec![sub_field_key(0)]);
    assert_eq!(values.len(), 1);
}
