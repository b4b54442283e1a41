use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::PHONE_REGEX;

/// Payment status enum matching database enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(format!(
                "paymentStatus must be one of pending, paid, failed (got \"{}\")",
                other
            )),
        }
    }
}

/// Database model for a persisted registration
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub student_id: Option<String>,
    pub major_program: String,
    pub additional_program: Option<String>,
    pub semester: String,
    pub expected_graduation_date: Option<String>,
    pub total_semester_hours: f64,
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalized candidate, ready to insert.
///
/// Built from a submission after trimming and lowercasing; `validate()` must
/// pass before it reaches a repository.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewRegistration {
    pub id: Uuid,
    #[validate(length(min = 1, message = "firstName is required"))]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[validate(length(min = 1, message = "lastName is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(regex(path = *PHONE_REGEX, message = "phone must contain digits only"))]
    pub phone: String,
    pub student_id: Option<String>,
    #[validate(length(min = 1, message = "majorProgram is required"))]
    pub major_program: String,
    pub additional_program: Option<String>,
    #[validate(length(min = 1, message = "semester is required"))]
    pub semester: String,
    /// Free-form, conventionally dd/mm/yyyy
    pub expected_graduation_date: Option<String>,
    pub total_semester_hours: f64,
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
}
