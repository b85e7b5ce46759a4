use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// HR-department intake form, kept separate from the recruiting pipeline's
/// Candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PersonnelForm {
    pub id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: String,
    pub birth_date: NaiveDate,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub education: String,
    pub institution: String,
    pub specialty: String,
    pub graduation_year: Option<i32>,
    pub marital_status: String,
    pub work_experience_total: i32,
    pub work_experience_specialty: i32,
    pub additional_info: String,
    pub is_approved: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
