use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::test_dto::QuestionCreateRequest;
use crate::error::{ErrorKind, FieldError, ValidationReport};
use crate::utils::validation::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, ToSchema)]
pub enum QuestionType {
    // The space is part of the wire contract.
    #[serde(rename = "TRUE FALSE")]
    TrueFalse,
    #[serde(rename = "SINGLE CHOICE")]
    SingleChoice,
    #[default]
    #[serde(rename = "MULTIPLE CHOICE")]
    MultipleChoice,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::TrueFalse,
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::TrueFalse => "TRUE FALSE",
            QuestionType::SingleChoice => "SINGLE CHOICE",
            QuestionType::MultipleChoice => "MULTIPLE CHOICE",
        }
    }

    /// Exact number of correct answers this type admits, if it fixes one.
    pub fn required_correct_answers(&self) -> Option<usize> {
        match self {
            QuestionType::TrueFalse | QuestionType::SingleChoice => Some(1),
            QuestionType::MultipleChoice => None,
        }
    }

    /// Exact number of possible answers this type admits, if it fixes one.
    pub fn required_possible_answers(&self) -> Option<usize> {
        match self {
            QuestionType::TrueFalse => Some(2),
            QuestionType::SingleChoice | QuestionType::MultipleChoice => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                FieldError::new(
                    &[],
                    ErrorKind::InvalidValue,
                    format!("invalid enumeration value: {}", s),
                )
            })
    }
}

/// Cross-field rules shared by question requests and stored questions.
///
/// All failing rules are reported, each located at the field it concerns.
pub fn check_answers(
    question_type: QuestionType,
    possible_answers: &BTreeMap<String, String>,
    correct_answers: &[String],
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let unknown: Vec<&str> = correct_answers
        .iter()
        .filter(|label| !possible_answers.contains_key(label.as_str()))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        errors.push(FieldError::constraint(
            &["correct_answers"],
            format!(
                "Correct answers must be keys of possible_answers; invalid keys: {}",
                unknown
                    .iter()
                    .map(|k| format!("\"{}\"", k))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ));
    }

    if let Some(expected) = question_type.required_possible_answers() {
        if possible_answers.len() != expected {
            errors.push(FieldError::constraint(
                &["possible_answers"],
                format!(
                    "{} questions must have exactly {} possible answers",
                    question_type, expected
                ),
            ));
        }
    }

    if let Some(expected) = question_type.required_correct_answers() {
        if correct_answers.len() != expected {
            errors.push(FieldError::constraint(
                &["correct_answers"],
                format!(
                    "{} questions must have exactly {} correct answer",
                    question_type, expected
                ),
            ));
        }
    }

    errors
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct QuestionRecord {
    pub id: Uuid,
    pub test_id: Uuid,
    pub question_number: i32,
    pub question_text: String,
    pub question_type: QuestionType,
    #[validate(length(min = 2, message = "At least 2 possible answers are required"))]
    pub possible_answers: BTreeMap<String, String>,
    #[validate(length(min = 1, message = "At least 1 correct answer is required"))]
    pub correct_answers: Vec<String>,
}

impl QuestionRecord {
    pub fn from_request(id: Uuid, request: QuestionCreateRequest) -> Result<Self, ValidationReport> {
        Self {
            id,
            test_id: request.test_id,
            question_number: request.question_number,
            question_text: request.question_text,
            question_type: request.question_type,
            possible_answers: request.possible_answers,
            correct_answers: request.correct_answers,
        }
        .validated()
    }

    /// Whether `chosen` names exactly the correct labels, ignoring order and repeats.
    pub fn is_correct(&self, chosen: &[String]) -> bool {
        let chosen: BTreeSet<&str> = chosen.iter().map(String::as_str).collect();
        let correct: BTreeSet<&str> = self.correct_answers.iter().map(String::as_str).collect();
        chosen == correct
    }
}

impl Schema for QuestionRecord {
    const NAME: &'static str = "question";
    const CROSS_FIELD_INPUTS: &'static [&'static str] =
        &["question_type", "possible_answers", "correct_answers"];

    fn cross_field(&self) -> Vec<FieldError> {
        check_answers(self.question_type, &self.possible_answers, &self.correct_answers)
    }
}
