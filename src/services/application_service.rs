use crate::error::{Error, Result};
use crate::models::candidate::{Application, ApplicationStatus};
use crate::models::user::Principal;
use crate::services::policy_service::{self, Action, Resource};
use sqlx::PgPool;
use uuid::Uuid;

const APPLICATION_COLUMNS: &str =
    "id, candidate_id, vacancy_id, status, notes, created_by, applied_at";

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attaches a candidate to a vacancy. Idempotent: if the pair is already
    /// linked, the stored application comes back with `created = false` and
    /// nothing is written.
    pub async fn attach_candidate(
        &self,
        candidate_id: Uuid,
        vacancy_id: Uuid,
        caller: &Principal,
        notes: Option<String>,
    ) -> Result<(Application, bool)> {
        let candidate_exists =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM candidates WHERE id = $1")
                .bind(candidate_id)
                .fetch_optional(&self.pool)
                .await?;
        if candidate_exists.is_none() {
            return Err(Error::NotFound("Candidate not found".to_string()));
        }
        let vacancy_exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM vacancies WHERE id = $1")
            .bind(vacancy_id)
            .fetch_optional(&self.pool)
            .await?;
        if vacancy_exists.is_none() {
            return Err(Error::NotFound("Vacancy not found".to_string()));
        }

        // The unique constraint arbitrates concurrent attaches; DO NOTHING
        // means the loser of a race simply falls through to the select.
        let inserted = sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (candidate_id, vacancy_id, status, notes, created_by)
             VALUES ($1, $2, 'pending', $3, $4)
             ON CONFLICT (candidate_id, vacancy_id) DO NOTHING
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(candidate_id)
        .bind(vacancy_id)
        .bind(notes.as_deref().unwrap_or(""))
        .bind(&caller.username)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(application) = inserted {
            return Ok((application, true));
        }

        let existing = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications
             WHERE candidate_id = $1 AND vacancy_id = $2"
        ))
        .bind(candidate_id)
        .bind(vacancy_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((existing, false))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        new_status: &str,
        caller: &Principal,
    ) -> Result<Application> {
        let status = ApplicationStatus::parse(new_status).ok_or_else(|| {
            Error::InvalidState(format!("Unknown application status: {}", new_status))
        })?;

        let mut tx = self.pool.begin().await?;
        let current = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        policy_service::authorize(caller, Action::Edit, &Resource::Application(&current))
            .require()?;

        let application = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications SET status = $2 WHERE id = $1
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(application)
    }

    pub async fn list_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications
             WHERE candidate_id = $1
             ORDER BY applied_at DESC"
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    pub async fn list_for_vacancy(&self, vacancy_id: Uuid) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications
             WHERE vacancy_id = $1
             ORDER BY applied_at DESC"
        ))
        .bind(vacancy_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }
}
