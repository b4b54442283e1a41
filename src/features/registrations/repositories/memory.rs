use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::registrations::models::{NewRegistration, Registration};
use crate::features::registrations::repositories::RegistrationRepository;

/// In-process store keyed by email, mirroring the unique index.
#[derive(Default)]
pub struct InMemoryRegistrationRepository {
    records: Mutex<HashMap<String, Registration>>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<Registration> {
        self.records.lock().await.get(email).cloned()
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn insert(&self, registration: NewRegistration) -> Result<Registration> {
        let mut records = self.records.lock().await;
        if records.contains_key(&registration.email) {
            return Err(AppError::DuplicateEmail(registration.email));
        }

        let now = Utc::now();
        let stored = Registration {
            id: registration.id,
            first_name: registration.first_name,
            middle_name: registration.middle_name,
            last_name: registration.last_name,
            email: registration.email,
            phone: registration.phone,
            student_id: registration.student_id,
            major_program: registration.major_program,
            additional_program: registration.additional_program,
            semester: registration.semester,
            expected_graduation_date: registration.expected_graduation_date,
            total_semester_hours: registration.total_semester_hours,
            payment_id: registration.payment_id,
            payment_status: registration.payment_status,
            created_at: now,
            updated_at: now,
        };
        records.insert(stored.email.clone(), stored.clone());

        Ok(stored)
    }
}

/// Repository whose every write fails, standing in for an unreachable database.
pub struct UnavailableRegistrationRepository;

#[async_trait]
impl RegistrationRepository for UnavailableRegistrationRepository {
    async fn insert(&self, _registration: NewRegistration) -> Result<Registration> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}
