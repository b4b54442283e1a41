use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::core::error::{AppError, Result};
use crate::features::registrations::models::{NewRegistration, Registration};
use crate::features::registrations::repositories::RegistrationRepository;

/// PostgreSQL-backed registration storage
///
/// The schema is migrated on first use, so a database that was down at
/// startup gets its table as soon as it is reachable.
pub struct PgRegistrationRepository {
    pool: PgPool,
    schema_ready: OnceCell<()>,
}

impl PgRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema_ready: OnceCell::new(),
        }
    }

    /// Run pending migrations once. A failed attempt is retried by the next
    /// caller.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.schema_ready
            .get_or_try_init(|| async {
                tracing::info!("Running database migrations...");
                sqlx::migrate!("./migrations").run(&self.pool).await?;
                tracing::info!("Database migrations completed successfully");
                Ok::<_, AppError>(())
            })
            .await?;
        Ok(())
    }

    pub fn schema_ready(&self) -> bool {
        self.schema_ready.initialized()
    }
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    async fn insert(&self, registration: NewRegistration) -> Result<Registration> {
        self.ensure_schema().await?;

        sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (
                id,
                first_name, middle_name, last_name,
                email, phone, student_id,
                major_program, additional_program, semester,
                expected_graduation_date, total_semester_hours,
                payment_id, payment_status
            ) VALUES (
                $1,
                $2, $3, $4,
                $5, $6, $7,
                $8, $9, $10,
                $11, $12,
                $13, $14
            )
            RETURNING *
            "#,
        )
        .bind(registration.id)
        .bind(&registration.first_name)
        .bind(&registration.middle_name)
        .bind(&registration.last_name)
        .bind(&registration.email)
        .bind(&registration.phone)
        .bind(&registration.student_id)
        .bind(&registration.major_program)
        .bind(&registration.additional_program)
        .bind(&registration.semester)
        .bind(&registration.expected_graduation_date)
        .bind(registration.total_semester_hours)
        .bind(&registration.payment_id)
        .bind(registration.payment_status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());

            if unique_violation {
                AppError::DuplicateEmail(registration.email.clone())
            } else {
                AppError::Database(e)
            }
        })
    }
}
