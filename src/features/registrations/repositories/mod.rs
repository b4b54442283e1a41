//! Storage for registrations.
//!
//! The repository is the only component that writes registrations. It
//! enforces email uniqueness: a second insert with an email that is already
//! stored fails with `AppError::DuplicateEmail` and leaves no partial record.

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::registrations::models::{NewRegistration, Registration};

mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgRegistrationRepository;

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Persist a validated candidate and return the stored record, with
    /// timestamps filled in.
    async fn insert(&self, registration: NewRegistration) -> Result<Registration>;
}
