use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::FieldError;
use crate::models::question::{check_answers, QuestionType};
use crate::models::test::Level;
use crate::utils::validation::{first_duplicate, Schema};

pub const DEFAULT_NUMBER_OF_QUESTIONS: u32 = 20;

pub(crate) fn default_number_of_questions() -> u32 {
    DEFAULT_NUMBER_OF_QUESTIONS
}

pub(crate) fn unique_question_types(value: &[QuestionType]) -> Result<(), ValidationError> {
    if let Some(duplicate) = first_duplicate(value) {
        let mut err = ValidationError::new("unique");
        err.message = Some(Cow::Borrowed("Question types must contain unique elements."));
        err.add_param(Cow::Borrowed("duplicate"), &duplicate.as_str());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct TestCreateRequest {
    #[serde(alias = "user_id")]
    pub owner_id: Uuid,
    #[validate(length(max = 100, message = "Position must be at most 100 characters"))]
    pub position: String,
    pub level: Level,
    #[serde(default = "default_number_of_questions", alias = "number_of_question")]
    #[validate(range(min = 1, max = 50, message = "Number of questions must be between 1 and 50"))]
    pub number_of_questions: u32,
    #[validate(
        length(min = 1, message = "At least one question type is required"),
        custom(function = "unique_question_types")
    )]
    pub type_of_question: Vec<QuestionType>,
    #[serde(default)]
    pub skills_or_tools: Option<Vec<String>>,
}

impl Schema for TestCreateRequest {
    const NAME: &'static str = "test-create";
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("user_id", "owner_id"),
        ("number_of_question", "number_of_questions"),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct QuestionCreateRequest {
    pub test_id: Uuid,
    pub question_number: i32,
    pub question_text: String,
    pub question_type: QuestionType,
    #[validate(length(min = 2, message = "At least 2 possible answers are required"))]
    pub possible_answers: BTreeMap<String, String>,
    #[validate(length(min = 1, message = "At least 1 correct answer is required"))]
    pub correct_answers: Vec<String>,
}

impl Schema for QuestionCreateRequest {
    const NAME: &'static str = "question-create";
    const CROSS_FIELD_INPUTS: &'static [&'static str] =
        &["question_type", "possible_answers", "correct_answers"];

    fn cross_field(&self) -> Vec<FieldError> {
        check_answers(self.question_type, &self.possible_answers, &self.correct_answers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct AnswerCreateRequest {
    pub question_id: Uuid,
    #[serde(default)]
    pub answer_choice: Vec<String>,
}

impl Schema for AnswerCreateRequest {
    const NAME: &'static str = "answer-create";
}
