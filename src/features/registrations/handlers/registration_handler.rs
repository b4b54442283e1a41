//! Registration handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::registrations::dtos::{RegisterStudentDto, RegistrationResponseDto};
use crate::features::registrations::services::RegistrationService;
use crate::features::registrations::validation::validate_submission;
use crate::shared::types::{ApiResponse, ErrorResponse};

pub const LIVENESS_MESSAGE: &str = "Student Registration API is running ✅";
pub const REGISTRATION_SUCCESSFUL: &str = "Registration successful";

/// Liveness message
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = String, content_type = "text/plain")
    ),
    tag = "registrations"
)]
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// Register a student
///
/// Public endpoint. Required fields are checked first (400), then the
/// submission is normalized and validated before it is stored. Validation and
/// storage failures share the generic 500 response.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterStudentDto,
    responses(
        (status = 201, description = "Registration stored", body = ApiResponse<RegistrationResponseDto>),
        (status = 400, description = "Missing required fields or malformed JSON", body = ErrorResponse),
        (status = 500, description = "Invalid field values, email already registered or storage failure", body = ErrorResponse)
    ),
    tag = "registrations"
)]
pub async fn register_student(
    State(service): State<Arc<RegistrationService>>,
    AppJson(dto): AppJson<RegisterStudentDto>,
) -> Result<(StatusCode, Json<ApiResponse<RegistrationResponseDto>>)> {
    let candidate = validate_submission(dto)?;
    let registration = service.register(candidate).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(registration, REGISTRATION_SUCCESSFUL)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{INTERNAL_SERVER_ERROR, MISSING_REQUIRED_FIELDS};
    use crate::features::registrations::repositories::memory::{
        InMemoryRegistrationRepository, UnavailableRegistrationRepository,
    };
    use crate::features::registrations::repositories::RegistrationRepository;
    use crate::features::registrations::routes;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server_with(repository: Arc<dyn RegistrationRepository>) -> TestServer {
        let service = Arc::new(RegistrationService::new(repository));
        TestServer::new(routes::routes(service)).unwrap()
    }

    fn server() -> (TestServer, Arc<InMemoryRegistrationRepository>) {
        let repository = Arc::new(InMemoryRegistrationRepository::new());
        (server_with(repository.clone()), repository)
    }

    fn ana() -> Value {
        json!({
            "firstName": "Ana",
            "lastName": "Lee",
            "email": "Ana@X.com",
            "phone": "5551234567",
            "majorProgram": "CS",
            "semester": "Fall2024"
        })
    }

    #[tokio::test]
    async fn test_root_reports_liveness() {
        let (server, _) = server();

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text(LIVENESS_MESSAGE);
    }

    #[tokio::test]
    async fn test_register_minimal_submission() {
        let (server, repository) = server();

        let response = server.post("/api/register").json(&ana()).await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["message"], REGISTRATION_SUCCESSFUL);

        let data = &body["data"];
        assert!(data["id"].is_string());
        assert_eq!(data["firstName"], "Ana");
        assert_eq!(data["email"], "ana@x.com");
        assert_eq!(data["paymentStatus"], "pending");
        assert_eq!(data["totalSemesterHours"].as_f64(), Some(0.0));
        assert!(data["studentId"].is_null());
        assert!(data["additionalProgram"].is_null());
        assert!(data["paymentId"].is_null());
        assert!(data["createdAt"].is_string());
        assert!(data["updatedAt"].is_string());

        assert_eq!(repository.count().await, 1);
        let stored = repository.find_by_email("ana@x.com").await.unwrap();
        assert_eq!(data["id"], stored.id.to_string());
    }

    #[tokio::test]
    async fn test_register_full_submission_round_trips() {
        let (server, _) = server();
        let mut body = ana();
        body["middleName"] = json!(" Maria ");
        body["studentId"] = json!("S-2024-001");
        body["additionalProgram"] = json!("Data Science");
        body["expectedGraduationDate"] = json!("15/05/2027");
        body["totalSemesterHours"] = json!(15);
        body["paymentId"] = json!("pay_42");
        body["paymentStatus"] = json!("paid");

        let response = server.post("/api/register").json(&body).await;

        response.assert_status(StatusCode::CREATED);
        let data = response.json::<Value>()["data"].clone();
        assert_eq!(data["middleName"], "Maria");
        assert_eq!(data["studentId"], "S-2024-001");
        assert_eq!(data["additionalProgram"], "Data Science");
        assert_eq!(data["expectedGraduationDate"], "15/05/2027");
        assert_eq!(data["totalSemesterHours"].as_f64(), Some(15.0));
        assert_eq!(data["paymentId"], "pay_42");
        assert_eq!(data["paymentStatus"], "paid");
    }

    #[tokio::test]
    async fn test_missing_required_fields_is_bad_request() {
        for field in [
            "firstName",
            "lastName",
            "email",
            "phone",
            "majorProgram",
            "semester",
        ] {
            let (server, repository) = server();
            let mut body = ana();
            body.as_object_mut().unwrap().remove(field);

            let response = server.post("/api/register").json(&body).await;

            response.assert_status_bad_request();
            response.assert_json(&json!({ "error": MISSING_REQUIRED_FIELDS }));
            assert_eq!(repository.count().await, 0, "{} missing", field);
        }
    }

    #[tokio::test]
    async fn test_empty_body_is_bad_request() {
        let (server, repository) = server();

        let response = server.post("/api/register").json(&json!({})).await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": MISSING_REQUIRED_FIELDS }));
        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_falsy_required_values_are_missing() {
        for (field, value) in [
            ("phone", json!(0)),
            ("firstName", json!(false)),
            ("semester", json!(0.0)),
        ] {
            let (server, repository) = server();
            let mut body = ana();
            body[field] = value;

            let response = server.post("/api/register").json(&body).await;

            response.assert_status_bad_request();
            response.assert_json(&json!({ "error": MISSING_REQUIRED_FIELDS }));
            assert_eq!(repository.count().await, 0, "{} falsy", field);
        }
    }

    #[tokio::test]
    async fn test_non_digit_phone_is_rejected_before_storage() {
        let (server, repository) = server();
        let mut body = ana();
        body["phone"] = json!("555-1234");

        let response = server.post("/api/register").json(&body).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": INTERNAL_SERVER_ERROR }));
        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_schema_violations_are_internal_errors() {
        for (field, value) in [
            ("paymentStatus", json!("refunded")),
            ("totalSemesterHours", json!("abc")),
            ("lastName", json!("   ")),
        ] {
            let (server, repository) = server();
            let mut body = ana();
            body[field] = value;

            let response = server.post("/api/register").json(&body).await;

            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            response.assert_json(&json!({ "error": INTERNAL_SERVER_ERROR }));
            assert_eq!(repository.count().await, 0, "{} invalid", field);
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_case_insensitive() {
        let (server, repository) = server();

        server
            .post("/api/register")
            .json(&ana())
            .await
            .assert_status(StatusCode::CREATED);

        let mut again = ana();
        again["email"] = json!("  ANA@x.COM ");
        again["firstName"] = json!("Another");
        let response = server.post("/api/register").json(&again).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": INTERNAL_SERVER_ERROR }));
        assert_eq!(repository.count().await, 1);
        let stored = repository.find_by_email("ana@x.com").await.unwrap();
        assert_eq!(stored.first_name, "Ana");
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal_error() {
        let server = server_with(Arc::new(UnavailableRegistrationRepository));

        let response = server.post("/api/register").json(&ana()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": INTERNAL_SERVER_ERROR }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (server, repository) = server();

        let response = server
            .post("/api/register")
            .text("{\"firstName\": ")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
        let error = response.json::<Value>()["error"].clone();
        assert!(error.as_str().unwrap().starts_with("Invalid JSON syntax"));
        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_structured_field_value_is_bad_request() {
        let (server, _) = server();
        let mut body = ana();
        body["email"] = json!({ "address": "ana@x.com" });

        let response = server.post("/api/register").json(&body).await;

        response.assert_status_bad_request();
        let error = response.json::<Value>()["error"].clone();
        assert!(error.as_str().unwrap().starts_with("Invalid JSON data"));
    }
}
