use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: Uuid,
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

impl Vacancy {
    pub fn is_open(&self) -> bool {
        VacancyStatus::parse(&self.status) == Some(VacancyStatus::Open)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacancyStatus {
    Draft,
    Open,
    Closed,
}

impl VacancyStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "draft" => Some(Self::Draft),
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_three_statuses_parse() {
        assert_eq!(VacancyStatus::parse("draft"), Some(VacancyStatus::Draft));
        assert_eq!(VacancyStatus::parse("open"), Some(VacancyStatus::Open));
        assert_eq!(VacancyStatus::parse("closed"), Some(VacancyStatus::Closed));
        assert_eq!(VacancyStatus::parse("published"), None);
        assert_eq!(VacancyStatus::parse("OPEN"), None);
        assert_eq!(VacancyStatus::parse(""), None);
    }
}
