use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
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

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.last_name, self.first_name, self.patronymic)
            .trim()
            .to_string()
    }
}

/// A candidate-to-vacancy link. `(candidate_id, vacancy_id)` is unique in
/// the store; attaching the same pair twice reuses the stored row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub vacancy_id: Uuid,
    pub status: String,
    pub notes: String,
    pub created_by: String,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_skips_empty_patronymic() {
        let mut candidate = sample();
        candidate.patronymic = String::new();
        assert_eq!(candidate.full_name(), "Petrova Anna");
    }

    #[test]
    fn application_status_is_a_closed_set() {
        assert_eq!(ApplicationStatus::parse("pending"), Some(ApplicationStatus::Pending));
        assert_eq!(ApplicationStatus::parse("approved"), Some(ApplicationStatus::Approved));
        assert_eq!(ApplicationStatus::parse("rejected"), Some(ApplicationStatus::Rejected));
        assert_eq!(ApplicationStatus::parse("on_hold"), None);
    }

    fn sample() -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            first_name: "Anna".to_string(),
            last_name: "Petrova".to_string(),
            patronymic: "Sergeevna".to_string(),
            email: "anna@example.com".to_string(),
            phone: String::new(),
            age: None,
            experience_years: 3,
            specialization: String::new(),
            position_level: String::new(),
            employment_status: "unemployed".to_string(),
            work_format: String::new(),
            education_level: String::new(),
            education_institution: String::new(),
            graduation_year: None,
            source: "hh".to_string(),
            source_details: String::new(),
            resume_url: None,
            recruiter_notes: String::new(),
            next_actions: String::new(),
            desired_salary: None,
            notice_period: String::new(),
            created_by: "recruiter1".to_string(),
            assigned_recruiter: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
