//! Student model

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    /// Server-assigned identifier, never changes after creation
    pub id: i64,
    pub name: String,
    pub email: String,
    pub course: Option<String>,
    pub age: Option<i32>,
}

/// Create / update student request.
///
/// Updates replace all four fields. An `id` in the body is ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StudentInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    pub course: Option<String>,
    pub age: Option<i32>,
}

/// `null` reaches validation as an empty string, like a missing field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl StudentInput {
    /// Apply this payload to a stored row, keeping its id
    pub fn apply_to(&self, id: i64) -> Student {
        Student {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            course: self.course.clone(),
            age: self.age,
        }
    }
}
