use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vacancy::{Skill, Vacancy};
use crate::services::vacancy_service::{StatusChange, VacancyList};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub required_experience: Option<i32>,
    pub salary: Option<Decimal>,
    pub work_format: Option<String>,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub assigned_recruiter: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub required_experience: Option<i32>,
    pub salary: Option<Decimal>,
    pub work_format: Option<String>,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub assigned_recruiter: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeVacancyStatusPayload {
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyResponse {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub required_experience: i32,
    pub salary: Option<Decimal>,
    pub work_format: String,
    pub employment_type: String,
    pub location: String,
    pub status: String,
    pub created_by: String,
    pub assigned_recruiter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyDetailResponse {
    #[serde(flatten)]
    pub vacancy: VacancyResponse,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyStatusChangeResponse {
    pub id: uuid::Uuid,
    pub previous_status: String,
    pub new_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyListResponse {
    pub items: Vec<VacancyResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VacancyListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl From<Vacancy> for VacancyResponse {
    fn from(value: Vacancy) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            required_experience: value.required_experience,
            salary: value.salary,
            work_format: value.work_format,
            employment_type: value.employment_type,
            location: value.location,
            status: value.status,
            created_by: value.created_by,
            assigned_recruiter: value.assigned_recruiter,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl VacancyDetailResponse {
    pub fn new(vacancy: Vacancy, skills: Vec<Skill>) -> Self {
        Self {
            vacancy: vacancy.into(),
            required_skills: skills.into_iter().map(|s| s.name).collect(),
        }
    }
}

impl From<StatusChange> for VacancyStatusChangeResponse {
    fn from(value: StatusChange) -> Self {
        Self {
            id: value.vacancy.id,
            previous_status: value.previous,
            new_status: value.current,
        }
    }
}

impl From<VacancyList> for VacancyListResponse {
    fn from(value: VacancyList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
