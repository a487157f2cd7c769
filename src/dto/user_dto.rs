use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::FieldError;
use crate::utils::validation::{is_blank, Schema};

pub const PASSWORD_MIN_LENGTH: usize = 10;
pub const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserCreateRequest {
    #[validate(length(max = 50, message = "First name must be at most 50 characters"))]
    pub first_name: String,
    #[validate(length(max = 50, message = "Surname must be at most 50 characters"))]
    pub surname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "password_policy"))]
    pub password: String,
    pub confirm_password: String,
}

impl Schema for UserCreateRequest {
    const NAME: &'static str = "user-create";
    const CROSS_FIELD_INPUTS: &'static [&'static str] = &["password", "confirm_password"];

    fn cross_field(&self) -> Vec<FieldError> {
        // A password that already failed the policy has nothing to be confirmed against.
        if !password_problems(&self.password).is_empty() {
            return Vec::new();
        }
        if self.confirm_password != self.password {
            return vec![FieldError::constraint(
                &["confirm_password"],
                "Passwords do not match",
            )];
        }
        Vec::new()
    }
}

/// Every strength rule `value` breaks, in a fixed order.
pub fn password_problems(value: &str) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if value.chars().count() < PASSWORD_MIN_LENGTH {
        problems.push("Password must be at least 10 characters long.");
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        problems.push("Password must contain at least one lowercase letter.");
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Password must contain at least one uppercase letter.");
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain at least one digit.");
    }
    if !value.chars().any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c)) {
        problems.push("Password must contain at least one special character.");
    }
    problems
}

fn password_policy(value: &str) -> Result<(), ValidationError> {
    let problems = password_problems(value);
    if problems.is_empty() {
        return Ok(());
    }
    let mut err = ValidationError::new("password_policy");
    err.message = Some(Cow::Owned(problems.join("\n")));
    Err(err)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(custom(function = "username_not_blank"))]
    pub username: String,
    #[validate(custom(function = "password_not_blank"))]
    pub password: String,
}

impl Schema for LoginRequest {
    const NAME: &'static str = "login";
}

fn username_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Username cannot be empty")
}

fn password_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Password cannot be empty")
}

fn not_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if is_blank(value) {
        let mut err = ValidationError::new("not_blank");
        err.message = Some(Cow::Borrowed(message));
        return Err(err);
    }
    Ok(())
}
