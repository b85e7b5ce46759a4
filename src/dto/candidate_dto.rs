use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::candidate::{Application, Candidate};
use crate::models::vacancy::Skill;
use crate::services::candidate_service::CandidateList;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub patronymic: Option<String>,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub experience_years: Option<i32>,
    pub specialization: Option<String>,
    pub position_level: Option<String>,
    pub employment_status: Option<String>,
    pub work_format: Option<String>,
    pub education_level: Option<String>,
    pub education_institution: Option<String>,
    pub graduation_year: Option<i32>,
    pub source: Option<String>,
    pub source_details: Option<String>,
    pub resume_url: Option<String>,
    pub recruiter_notes: Option<String>,
    pub next_actions: Option<String>,
    pub desired_salary: Option<Decimal>,
    pub notice_period: Option<String>,
    pub assigned_recruiter: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    pub patronymic: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub experience_years: Option<i32>,
    pub specialization: Option<String>,
    pub position_level: Option<String>,
    pub employment_status: Option<String>,
    pub work_format: Option<String>,
    pub education_level: Option<String>,
    pub education_institution: Option<String>,
    pub graduation_year: Option<i32>,
    pub source: Option<String>,
    pub source_details: Option<String>,
    pub resume_url: Option<String>,
    pub recruiter_notes: Option<String>,
    pub next_actions: Option<String>,
    pub desired_salary: Option<Decimal>,
    pub notice_period: Option<String>,
    pub assigned_recruiter: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    pub email: String,
    pub phone: String,
    pub age: Option<i32>,
    pub experience_years: i32,
    pub specialization: String,
    pub position_level: String,
    pub employment_status: String,
    pub work_format: String,
    pub education_level: String,
    pub education_institution: String,
    pub graduation_year: Option<i32>,
    pub source: String,
    pub source_details: String,
    pub resume_url: Option<String>,
    pub recruiter_notes: String,
    pub next_actions: String,
    pub desired_salary: Option<Decimal>,
    pub notice_period: String,
    pub created_by: String,
    pub assigned_recruiter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDetailResponse {
    #[serde(flatten)]
    pub candidate: CandidateResponse,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListResponse {
    pub items: Vec<CandidateResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CandidateListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub min_experience: Option<i32>,
    pub education: Option<String>,
    pub position_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttachCandidatePayload {
    pub vacancy_id: Uuid,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub vacancy_id: Uuid,
    pub status: String,
    pub notes: String,
    pub created_by: String,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachCandidateResponse {
    pub created: bool,
    pub application: ApplicationResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateApplicationStatusPayload {
    #[validate(length(min = 1))]
    pub status: String,
}

impl From<Candidate> for CandidateResponse {
    fn from(value: Candidate) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            patronymic: value.patronymic,
            email: value.email,
            phone: value.phone,
            age: value.age,
            experience_years: value.experience_years,
            specialization: value.specialization,
            position_level: value.position_level,
            employment_status: value.employment_status,
            work_format: value.work_format,
            education_level: value.education_level,
            education_institution: value.education_institution,
            graduation_year: value.graduation_year,
            source: value.source,
            source_details: value.source_details,
            resume_url: value.resume_url,
            recruiter_notes: value.recruiter_notes,
            next_actions: value.next_actions,
            desired_salary: value.desired_salary,
            notice_period: value.notice_period,
            created_by: value.created_by,
            assigned_recruiter: value.assigned_recruiter,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl CandidateDetailResponse {
    pub fn new(candidate: Candidate, skills: Vec<Skill>) -> Self {
        Self {
            candidate: candidate.into(),
            skills: skills.into_iter().map(|s| s.name).collect(),
        }
    }
}

impl From<Application> for ApplicationResponse {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            vacancy_id: value.vacancy_id,
            status: value.status,
            notes: value.notes,
            created_by: value.created_by,
            applied_at: value.applied_at,
        }
    }
}

impl From<CandidateList> for CandidateListResponse {
    fn from(value: CandidateList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
