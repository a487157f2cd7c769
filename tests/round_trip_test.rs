use std::fmt::Debug;

use assessment_schemas::{
    validate_named, AnswerCreateRequest, AnswerRecord, Error, LoginRequest, QuestionCreateRequest,
    QuestionRecord, Schema, TestCreateRequest, TestRecord, UserCreateRequest, UserRecord,
    SCHEMA_NAMES,
};
use serde_json::{json, Value};

fn assert_round_trip<T: Schema + PartialEq + Debug>(input: Value) {
    let first = T::from_value(input).unwrap();
    let wire = first.to_json().unwrap();
    let second = T::from_json(&wire).unwrap();
    assert_eq!(first, second, "{} did not survive the wire", T::NAME);
}

fn question() -> Value {
    json!({
        "id": "3f97fc69-9253-40c2-94c7-f8307ff70301",
        "test_id": "3f97fc69-9253-40c2-94c7-f8307ff70302",
        "question_number": 1,
        "question_text": "Pick the borrow checker's job",
        "question_type": "MULTIPLE CHOICE",
        "possible_answers": { "A": "aliasing rules", "B": "lifetimes", "C": "garbage collection" },
        "correct_answers": ["A", "B"],
    })
}

#[test]
fn every_schema_survives_serialization() {
    assert_round_trip::<UserCreateRequest>(json!({
        "first_name": "Ada",
        "surname": "Lovelace",
        "email": "ada@example.com",
        "password": "Str0ng!Password",
        "confirm_password": "Str0ng!Password",
    }));
    assert_round_trip::<UserRecord>(json!({
        "id": "3f97fc69-9253-40c2-94c7-f8307ff70309",
        "first_name": "Ada",
        "surname": "Lovelace",
        "email": "ada@example.com",
        "roles": ["MANAGER", "AUTH_SERVICE"],
        "tests": [{ "anything": true }],
    }));
    assert_round_trip::<LoginRequest>(json!({ "username": "ada", "password": "secret" }));
    assert_round_trip::<TestCreateRequest>(json!({
        "owner_id": "3f97fc69-9253-40c2-94c7-f8307ff70309",
        "position": "Backend Engineer",
        "level": "MIDDLE",
        "type_of_question": ["MULTIPLE CHOICE", "TRUE FALSE"],
    }));
    assert_round_trip::<QuestionCreateRequest>(json!({
        "test_id": "3f97fc69-9253-40c2-94c7-f8307ff70302",
        "question_number": 9,
        "question_text": "True?",
        "question_type": "TRUE FALSE",
        "possible_answers": { "T": "True", "F": "False" },
        "correct_answers": ["T"],
    }));
    assert_round_trip::<QuestionRecord>(question());
    assert_round_trip::<AnswerCreateRequest>(json!({
        "question_id": "3f97fc69-9253-40c2-94c7-f8307ff70301",
        "answer_choice": ["A"],
    }));
    assert_round_trip::<AnswerRecord>(json!({
        "id": "3f97fc69-9253-40c2-94c7-f8307ff70303",
        "question_id": "3f97fc69-9253-40c2-94c7-f8307ff70301",
    }));
    assert_round_trip::<TestRecord>(json!({
        "id": "3f97fc69-9253-40c2-94c7-f8307ff70302",
        "owner_id": "3f97fc69-9253-40c2-94c7-f8307ff70309",
        "position": "Backend Engineer",
        "level": "EXPERT",
        "number_of_questions": 1,
        "type_of_question": ["MULTIPLE CHOICE"],
        "is_solved": true,
        "questions": [question()],
        "answers": [{
            "id": "3f97fc69-9253-40c2-94c7-f8307ff70303",
            "question_id": "3f97fc69-9253-40c2-94c7-f8307ff70301",
            "answer_choice": ["A", "B"],
        }],
        "result": 87.5,
    }));
}

#[test]
fn enum_wire_strings_are_preserved() {
    let value = validate_named("question", question()).unwrap();
    assert_eq!(value["question_type"], "MULTIPLE CHOICE");

    let value = validate_named(
        "test-create",
        json!({
            "owner_id": "3f97fc69-9253-40c2-94c7-f8307ff70309",
            "position": "QA",
            "level": "JUNIOR",
            "type_of_question": ["TRUE FALSE"],
        }),
    )
    .unwrap();
    assert_eq!(value["type_of_question"], json!(["TRUE FALSE"]));
    assert_eq!(value["level"], "JUNIOR");
    assert_eq!(value["number_of_questions"], 20);
}

#[test]
fn validate_named_knows_every_schema() {
    for name in SCHEMA_NAMES {
        match validate_named(name, json!({})) {
            Err(Error::Validation(report)) => assert!(!report.is_empty(), "{}", name),
            other => panic!("{} accepted an empty object: {:?}", name, other),
        }
    }
    assert!(matches!(
        validate_named("grades", json!({})),
        Err(Error::UnknownSchema(name)) if name == "grades"
    ));
}
