//! Shared request/response schemas for the user, auth and tests services.
//!
//! Every type implements [`Schema`]: build it from raw JSON with
//! [`Schema::from_value`] / [`Schema::from_json`], or check a typed draft with
//! [`Schema::validated`]. Failures come back as a [`ValidationReport`].

pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod openapi;
pub mod utils;

use serde_json::Value as JsonValue;

pub use crate::dto::test_dto::{AnswerCreateRequest, QuestionCreateRequest, TestCreateRequest};
pub use crate::dto::user_dto::{LoginRequest, UserCreateRequest};
pub use crate::error::{Error, ErrorKind, FieldError, Result, ValidationReport};
pub use crate::models::answer::AnswerRecord;
pub use crate::models::question::{QuestionRecord, QuestionType};
pub use crate::models::test::{Level, TestRecord};
pub use crate::models::user::{Role, UserRecord};
pub use crate::utils::validation::Schema;

/// Wire names accepted by [`validate_named`].
pub const SCHEMA_NAMES: [&str; 9] = [
    UserCreateRequest::NAME,
    UserRecord::NAME,
    LoginRequest::NAME,
    TestCreateRequest::NAME,
    TestRecord::NAME,
    QuestionCreateRequest::NAME,
    QuestionRecord::NAME,
    AnswerCreateRequest::NAME,
    AnswerRecord::NAME,
];

/// Validates `value` against the schema called `name` and returns its
/// normalised form, with every default filled in.
pub fn validate_named(name: &str, value: JsonValue) -> Result<JsonValue> {
    fn run<T: Schema>(value: JsonValue) -> Result<JsonValue> {
        let parsed = T::from_value(value)?;
        Ok(parsed.to_value()?)
    }

    if name == UserCreateRequest::NAME {
        run::<UserCreateRequest>(value)
    } else if name == UserRecord::NAME {
        run::<UserRecord>(value)
    } else if name == LoginRequest::NAME {
        run::<LoginRequest>(value)
    } else if name == TestCreateRequest::NAME {
        run::<TestCreateRequest>(value)
    } else if name == TestRecord::NAME {
        run::<TestRecord>(value)
    } else if name == QuestionCreateRequest::NAME {
        run::<QuestionCreateRequest>(value)
    } else if name == QuestionRecord::NAME {
        run::<QuestionRecord>(value)
    } else if name == AnswerCreateRequest::NAME {
        run::<AnswerCreateRequest>(value)
    } else if name == AnswerRecord::NAME {
        run::<AnswerRecord>(value)
    } else {
        Err(Error::UnknownSchema(name.to_string()))
    }
}
