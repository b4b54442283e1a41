//! Submission validation, run before anything touches storage.
//!
//! Two stages, each with its own outcome:
//!
//! 1. Presence check: a required field that is absent, null or empty yields
//!    `AppError::BadRequest("Missing required fields")`.
//! 2. Schema check: the submission is normalized into a [`NewRegistration`]
//!    (names and email trimmed, email lowercased, defaults applied) and
//!    validated. Every failed rule is reported in `AppError::Validation`.

use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result, MISSING_REQUIRED_FIELDS};
use crate::features::registrations::dtos::RegisterStudentDto;
use crate::features::registrations::models::{NewRegistration, PaymentStatus};
use crate::shared::validation::error_messages;

const HOURS_NOT_A_NUMBER: &str = "totalSemesterHours must be a number";

pub fn validate_submission(dto: RegisterStudentDto) -> Result<NewRegistration> {
    let missing = dto.missing_required_fields();
    if !missing.is_empty() {
        tracing::debug!("Registration missing required fields: {:?}", missing);
        return Err(AppError::BadRequest(MISSING_REQUIRED_FIELDS.to_string()));
    }

    let mut problems = Vec::new();

    let total_semester_hours = match parse_semester_hours(dto.total_semester_hours) {
        Ok(hours) => hours,
        Err(message) => {
            problems.push(message.to_string());
            0.0
        }
    };

    let payment_status = match dto.payment_status.as_deref() {
        None => PaymentStatus::default(),
        Some(raw) => raw.parse().unwrap_or_else(|message| {
            problems.push(message);
            PaymentStatus::default()
        }),
    };

    let candidate = NewRegistration {
        id: Uuid::now_v7(),
        first_name: trimmed(dto.first_name),
        middle_name: dto.middle_name.map(|s| s.trim().to_string()),
        last_name: trimmed(dto.last_name),
        email: trimmed(dto.email).to_lowercase(),
        phone: dto.phone.unwrap_or_default(),
        student_id: dto.student_id,
        major_program: dto.major_program.unwrap_or_default(),
        additional_program: dto.additional_program,
        semester: dto.semester.unwrap_or_default(),
        expected_graduation_date: dto.expected_graduation_date,
        total_semester_hours,
        payment_id: dto.payment_id,
        payment_status,
    };

    if let Err(errors) = candidate.validate() {
        let mut messages = error_messages(&errors);
        messages.append(&mut problems);
        problems = messages;
    }

    if !problems.is_empty() {
        return Err(AppError::Validation(problems));
    }

    Ok(candidate)
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Absent, null and blank strings fall back to 0; booleans count as 1 or 0.
fn parse_semester_hours(value: Option<Value>) -> std::result::Result<f64, &'static str> {
    let hours = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::Bool(b)) => Some(if b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    hours.filter(|h| h.is_finite()).ok_or(HOURS_NOT_A_NUMBER)
}
