//! Registration Service - persists validated submissions

use std::sync::Arc;

use crate::core::error::Result;
use crate::features::registrations::dtos::RegistrationResponseDto;
use crate::features::registrations::models::NewRegistration;
use crate::features::registrations::repositories::RegistrationRepository;

/// Service for storing student registrations
pub struct RegistrationService {
    repository: Arc<dyn RegistrationRepository>,
}

impl RegistrationService {
    pub fn new(repository: Arc<dyn RegistrationRepository>) -> Self {
        Self { repository }
    }

    /// Store a validated registration. No retries: a storage failure is
    /// returned to the caller as is.
    pub async fn register(&self, candidate: NewRegistration) -> Result<RegistrationResponseDto> {
        let registration = self
            .repository
            .insert(candidate)
            .await
            .inspect_err(|e| tracing::debug!("Registration insert failed: {}", e))?;

        tracing::info!(
            "Student registered: id={}, payment_status={}",
            registration.id,
            registration.payment_status
        );

        Ok(registration.into())
    }
}
