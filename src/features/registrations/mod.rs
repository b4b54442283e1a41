//! Student registration feature.
//!
//! Public form submissions are checked for required fields, normalized and
//! validated, then stored with a unique email. Payment fields are recorded
//! as submitted; nothing here processes payments.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/` | No | Liveness message |
//! | POST | `/api/register` | No | Register a student |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod validation;

pub use repositories::{PgRegistrationRepository, RegistrationRepository};
pub use services::RegistrationService;
