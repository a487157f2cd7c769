use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::test_dto::AnswerCreateRequest;
use crate::error::ValidationReport;
use crate::utils::validation::Schema;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct AnswerRecord {
    pub id: Uuid,
    pub question_id: Uuid,
    #[serde(default)]
    pub answer_choice: Vec<String>,
}

impl AnswerRecord {
    pub fn from_request(id: Uuid, request: AnswerCreateRequest) -> Result<Self, ValidationReport> {
        Self {
            id,
            question_id: request.question_id,
            answer_choice: request.answer_choice,
        }
        .validated()
    }
}

impl Schema for AnswerRecord {
    const NAME: &'static str = "answer";
}
