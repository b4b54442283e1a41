use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope: `{ "message": ..., "data": ... }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Error envelope: `{ "error": ... }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new("Missing required fields")).unwrap();
        assert_eq!(body, json!({ "error": "Missing required fields" }));
    }

    #[test]
    fn test_api_response_shape() {
        let body =
            serde_json::to_value(ApiResponse::success(json!({ "id": 1 }), "Registration successful"))
                .unwrap();
        assert_eq!(
            body,
            json!({ "message": "Registration successful", "data": { "id": 1 } })
        );
    }
}
