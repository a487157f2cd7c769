use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationReport),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    #[error("Payload too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: u64, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required field absent from the input.
    Missing,
    /// Value present but not parseable as the declared type.
    InvalidValue,
    /// Value parsed but broke a declared rule.
    ConstraintViolation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Missing => "missing",
            ErrorKind::InvalidValue => "invalid_value",
            ErrorKind::ConstraintViolation => "constraint_violation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(loc: &[&str], kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            kind,
            message: message.into(),
        }
    }

    pub fn constraint(loc: &[&str], message: impl Into<String>) -> Self {
        Self::new(loc, ErrorKind::ConstraintViolation, message)
    }

    /// Prefixes the location, used when a nested record reports through its parent.
    pub fn within(mut self, prefix: &[String]) -> Self {
        let mut loc = prefix.to_vec();
        loc.append(&mut self.loc);
        self.loc = loc;
        self
    }

    /// First location segment, i.e. the top-level field name.
    pub fn field(&self) -> Option<&str> {
        self.loc.first().map(String::as_str)
    }

    /// Classifies a serde failure found at `path` (the container that was being
    /// read). A missing field is located at `path` plus the field name.
    pub fn from_parse(mut path: Vec<String>, err: &serde_json::Error) -> Self {
        let raw = err.to_string();
        // serde_json appends a position suffix when parsing from text
        let text = match raw.find(" at line ") {
            Some(idx) => &raw[..idx],
            None => raw.as_str(),
        };

        if let Some(field) = text
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next())
        {
            path.push(field.to_string());
            return Self {
                loc: path,
                kind: ErrorKind::Missing,
                message: "Field required".to_string(),
            };
        }

        let message = if text.starts_with("unknown variant") {
            format!("invalid enumeration value: {}", text)
        } else {
            text.to_string()
        };
        Self {
            loc: path,
            kind: ErrorKind::InvalidValue,
            message,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loc.is_empty() {
            write!(f, "[{}] {}", self.kind.as_str(), self.message)
        } else {
            write!(
                f,
                "{} [{}] {}",
                self.loc.join("."),
                self.kind.as_str(),
                self.message
            )
        }
    }
}

/// Every failure found while constructing one schema value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        self.errors.extend(errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Errors whose top-level field is `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field() == Some(field))
    }

    /// Wraps a failure to read the input as JSON at all.
    pub fn from_serde(err: &serde_json::Error) -> Self {
        Self::single(FieldError::from_parse(Vec::new(), err))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", lines.join("; "))
    }
}

impl std::error::Error for ValidationReport {}

impl From<ValidationErrors> for ValidationReport {
    fn from(errors: ValidationErrors) -> Self {
        let mut report = ValidationReport::new();
        collect(&errors, &[], &mut report);
        report.errors.sort_by(|a, b| a.loc.cmp(&b.loc));
        report
    }
}

fn collect(errors: &ValidationErrors, prefix: &[String], report: &mut ValidationReport) {
    for (field, kind) in errors.errors() {
        let mut loc = prefix.to_vec();
        loc.push(field.to_string());
        match kind {
            ValidationErrorsKind::Field(items) => {
                for item in items {
                    let message = item
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| default_message(&item.code, &item.params));
                    report.push(FieldError {
                        loc: loc.clone(),
                        kind: ErrorKind::ConstraintViolation,
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &loc, report),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let mut item_loc = loc.clone();
                    item_loc.push(index.to_string());
                    collect(inner, &item_loc, report);
                }
            }
        }
    }
}

fn default_message(
    code: &str,
    params: &std::collections::HashMap<std::borrow::Cow<'static, str>, serde_json::Value>,
) -> String {
    let param = |name: &str| params.get(name).map(|v| v.to_string());
    match code {
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Length must be between {} and {}", min, max),
            (Some(min), None) => format!("Length must be at least {}", min),
            (None, Some(max)) => format!("Length must be at most {}", max),
            (None, None) => "Invalid length".to_string(),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Value must be between {} and {}", min, max),
            (Some(min), None) => format!("Value must be at least {}", min),
            (None, Some(max)) => format!("Value must be at most {}", max),
            (None, None) => "Value out of range".to_string(),
        },
        "email" => "Invalid email format".to_string(),
        other => format!("Failed validation: {}", other),
    }
}
