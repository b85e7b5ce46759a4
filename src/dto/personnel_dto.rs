use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::personnel_form::PersonnelForm;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePersonnelFormPayload {
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    pub patronymic: Option<String>,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: String,
    pub education: Option<String>,
    pub institution: Option<String>,
    pub specialty: Option<String>,
    pub graduation_year: Option<i32>,
    pub marital_status: Option<String>,
    pub work_experience_total: Option<i32>,
    pub work_experience_specialty: Option<i32>,
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonnelFormResponse {
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

impl From<PersonnelForm> for PersonnelFormResponse {
    fn from(value: PersonnelForm) -> Self {
        Self {
            id: value.id,
            last_name: value.last_name,
            first_name: value.first_name,
            patronymic: value.patronymic,
            birth_date: value.birth_date,
            address: value.address,
            phone: value.phone,
            email: value.email,
            education: value.education,
            institution: value.institution,
            specialty: value.specialty,
            graduation_year: value.graduation_year,
            marital_status: value.marital_status,
            work_experience_total: value.work_experience_total,
            work_experience_specialty: value.work_experience_specialty,
            additional_info: value.additional_info,
            is_approved: value.is_approved,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
