use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user_dto::UserCreateRequest;
use crate::error::{ErrorKind, FieldError, ValidationReport};
use crate::utils::validation::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[default]
    #[serde(rename = "REGULAR")]
    Regular,
    #[serde(rename = "MANAGER")]
    Manager,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "DB_MANAGEMENT_SERVICE")]
    DbManagementService,
    #[serde(rename = "AUTH_SERVICE")]
    AuthService,
    #[serde(rename = "TESTS_SERVICE")]
    TestsService,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Regular,
        Role::Manager,
        Role::Admin,
        Role::DbManagementService,
        Role::AuthService,
        Role::TestsService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Regular => "REGULAR",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
            Role::DbManagementService => "DB_MANAGEMENT_SERVICE",
            Role::AuthService => "AUTH_SERVICE",
            Role::TestsService => "TESTS_SERVICE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                FieldError::new(
                    &[],
                    ErrorKind::InvalidValue,
                    format!("invalid enumeration value: {}", s),
                )
            })
    }
}

fn default_roles() -> Vec<Role> {
    vec![Role::Regular]
}

// Older producers send `null` for a user without tests.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<JsonValue>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Stored user account as exchanged between services.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserRecord {
    pub id: Uuid,
    #[validate(length(max = 50, message = "First name must be at most 50 characters"))]
    pub first_name: String,
    #[validate(length(max = 50, message = "Surname must be at most 50 characters"))]
    pub surname: String,
    #[serde(alias = "username_email")]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default = "default_roles")]
    #[validate(length(min = 1, message = "At least one role is required"))]
    pub roles: Vec<Role>,
    // Shape is owned by the tests service; kept opaque here.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(value_type = Vec<Object>)]
    pub tests: Vec<JsonValue>,
    #[serde(default = "crate::utils::time::now", alias = "create_datetime")]
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Builds the stored form of an accepted sign-up. The password never leaves
    /// the request; roles, tests and the timestamp take their defaults.
    pub fn from_request(id: Uuid, request: &UserCreateRequest) -> Result<Self, ValidationReport> {
        Self {
            id,
            first_name: request.first_name.clone(),
            surname: request.surname.clone(),
            email: request.email.clone(),
            roles: default_roles(),
            tests: Vec::new(),
            created_at: crate::utils::time::now(),
        }
        .validated()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

impl Schema for UserRecord {
    const NAME: &'static str = "user";
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("username_email", "email"),
        ("create_datetime", "created_at"),
    ];
}
