use utoipa::OpenApi;

use crate::dto::test_dto::{AnswerCreateRequest, QuestionCreateRequest, TestCreateRequest};
use crate::dto::user_dto::{LoginRequest, UserCreateRequest};
use crate::error::{ErrorKind, FieldError, ValidationReport};
use crate::models::answer::AnswerRecord;
use crate::models::question::{QuestionRecord, QuestionType};
use crate::models::test::{Level, TestRecord};
use crate::models::user::{Role, UserRecord};

/// Shared components for services that expose these payloads. Merge into a
/// service document with `ApiDoc::openapi()` and `OpenApi::merge`.
#[derive(OpenApi)]
#[openapi(components(schemas(
    Role,
    Level,
    QuestionType,
    UserCreateRequest,
    UserRecord,
    LoginRequest,
    TestCreateRequest,
    TestRecord,
    QuestionCreateRequest,
    QuestionRecord,
    AnswerCreateRequest,
    AnswerRecord,
    ErrorKind,
    FieldError,
    ValidationReport,
)))]
pub struct ApiDoc;
