use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::registrations::models::{PaymentStatus, Registration};

/// Request DTO for a student registration
///
/// Every field is optional at the wire level so the presence check can report
/// missing fields itself instead of failing deserialization. Scalar text
/// fields also accept numbers and booleans, which are kept in textual form.
/// For required fields `0` and `false` read as empty, so they count as missing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStudentDto {
    #[serde(default, deserialize_with = "required_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub middle_name: Option<String>,
    #[serde(default, deserialize_with = "required_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "required_string")]
    pub email: Option<String>,
    /// Digits only
    #[serde(default, deserialize_with = "required_string")]
    #[schema(example = "5551234567")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "required_string")]
    pub major_program: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub additional_program: Option<String>,
    #[serde(default, deserialize_with = "required_string")]
    pub semester: Option<String>,
    /// Conventionally dd/mm/yyyy, stored as given
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "15/05/2026")]
    pub expected_graduation_date: Option<String>,
    /// Number or numeric string, defaults to 0
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub total_semester_hours: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub payment_id: Option<String>,
    /// One of `pending`, `paid`, `failed`; defaults to `pending`
    #[serde(default, deserialize_with = "lenient_string")]
    pub payment_status: Option<String>,
}

impl RegisterStudentDto {
    /// Wire names of required fields that are absent, null or empty.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("majorProgram", &self.major_program),
            ("semester", &self.semester),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Array(_)) => Err(de::Error::custom("expected a string, found an array")),
        Some(Value::Object(_)) => Err(de::Error::custom("expected a string, found an object")),
    }
}

/// Like [`lenient_string`], but the falsy scalars `0` and `false` become an
/// empty string.
fn required_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(false)) => Ok(Some(String::new())),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(Some(String::new())),
        other => lenient_string(other.unwrap_or(Value::Null)).map_err(de::Error::custom),
    }
}

/// Response DTO for a persisted registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponseDto {
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

impl From<Registration> for RegistrationResponseDto {
    fn from(r: Registration) -> Self {
        Self {
            id: r.id,
            first_name: r.first_name,
            middle_name: r.middle_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            student_id: r.student_id,
            major_program: r.major_program,
            additional_program: r.additional_program,
            semester: r.semester,
            expected_graduation_date: r.expected_graduation_date,
            total_semester_hours: r.total_semester_hours,
            payment_id: r.payment_id,
            payment_status: r.payment_status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
