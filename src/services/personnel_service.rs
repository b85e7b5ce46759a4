use crate::dto::personnel_dto::CreatePersonnelFormPayload;
use crate::error::{Error, Result};
use crate::models::personnel_form::PersonnelForm;
use crate::models::user::Principal;
use crate::services::policy_service::{self, Action, Resource};
use sqlx::PgPool;
use uuid::Uuid;

const FORM_COLUMNS: &str = "id, last_name, first_name, patronymic, birth_date, address, phone, \
     email, education, institution, specialty, graduation_year, marital_status, \
     work_experience_total, work_experience_specialty, additional_info, is_approved, \
     created_by, created_at, updated_at";

#[derive(Clone)]
pub struct PersonnelService {
    pool: PgPool,
}

impl PersonnelService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        payload: CreatePersonnelFormPayload,
        caller: &Principal,
    ) -> Result<PersonnelForm> {
        let form = sqlx::query_as::<_, PersonnelForm>(&format!(
            "INSERT INTO personnel_forms (last_name, first_name, patronymic, birth_date, address, \
             phone, email, education, institution, specialty, graduation_year, marital_status, \
             work_experience_total, work_experience_specialty, additional_info, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {FORM_COLUMNS}"
        ))
        .bind(&payload.last_name)
        .bind(&payload.first_name)
        .bind(payload.patronymic.as_deref().unwrap_or(""))
        .bind(payload.birth_date)
        .bind(payload.address.as_deref().unwrap_or(""))
        .bind(payload.phone.as_deref().unwrap_or(""))
        .bind(&payload.email)
        .bind(payload.education.as_deref().unwrap_or(""))
        .bind(payload.institution.as_deref().unwrap_or(""))
        .bind(payload.specialty.as_deref().unwrap_or(""))
        .bind(payload.graduation_year)
        .bind(payload.marital_status.as_deref().unwrap_or(""))
        .bind(payload.work_experience_total.unwrap_or(0))
        .bind(payload.work_experience_specialty.unwrap_or(0))
        .bind(payload.additional_info.as_deref().unwrap_or(""))
        .bind(&caller.username)
        .fetch_one(&self.pool)
        .await?;

        Ok(form)
    }

    pub async fn list(&self) -> Result<Vec<PersonnelForm>> {
        let forms = sqlx::query_as::<_, PersonnelForm>(&format!(
            "SELECT {FORM_COLUMNS} FROM personnel_forms ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(forms)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PersonnelForm> {
        let form = sqlx::query_as::<_, PersonnelForm>(&format!(
            "SELECT {FORM_COLUMNS} FROM personnel_forms WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Personnel form not found".to_string()))?;

        Ok(form)
    }

    pub async fn approve(&self, id: Uuid, caller: &Principal) -> Result<PersonnelForm> {
        let mut tx = self.pool.begin().await?;
        let current = sqlx::query_as::<_, PersonnelForm>(&format!(
            "SELECT {FORM_COLUMNS} FROM personnel_forms WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Personnel form not found".to_string()))?;

        policy_service::authorize(caller, Action::Edit, &Resource::PersonnelForm(&current))
            .require()?;

        let form = sqlx::query_as::<_, PersonnelForm>(&format!(
            "UPDATE personnel_forms SET is_approved = TRUE, updated_at = NOW() WHERE id = $1
             RETURNING {FORM_COLUMNS}"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(form)
    }
}
