use utoipa::{Modify, OpenApi};

use crate::features::registrations::{
    dtos as registrations_dtos, handlers as registrations_handlers,
    models as registrations_models,
};
use crate::shared::types::{ApiResponse, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Registrations (public)
        registrations_handlers::root,
        registrations_handlers::register_student,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Registrations
            registrations_models::PaymentStatus,
            registrations_dtos::RegisterStudentDto,
            registrations_dtos::RegistrationResponseDto,
            ApiResponse<registrations_dtos::RegistrationResponseDto>,
        )
    ),
    tags(
        (name = "registrations", description = "Student registration (public)"),
    ),
    info(
        title = "Student Registration API",
        version = "0.1.0",
        description = "API documentation for student registration",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
