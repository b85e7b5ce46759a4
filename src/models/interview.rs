use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    pub interview_type: String,
    pub notes: String,
    pub scheduled_by: String,
    pub status: String,
    pub feedback: String,
    pub result: Option<String>,
    pub reminder_sent: bool,
    pub reminder_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl InterviewStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            "no_show" => Some(Self::NoShow),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    Phone,
    Video,
    InPerson,
    Technical,
    Hr,
}

impl InterviewType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "phone" => Some(Self::Phone),
            "video" => Some(Self::Video),
            "in_person" => Some(Self::InPerson),
            "technical" => Some(Self::Technical),
            "hr" => Some(Self::Hr),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Video => "video",
            Self::InPerson => "in_person",
            Self::Technical => "technical",
            Self::Hr => "hr",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Phone => "Phone screen",
            Self::Video => "Video call",
            Self::InPerson => "In person",
            Self::Technical => "Technical",
            Self::Hr => "HR interview",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewResult {
    Positive,
    Negative,
    Neutral,
}

impl InterviewResult {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_type_are_closed_sets() {
        assert_eq!(InterviewStatus::parse("no_show"), Some(InterviewStatus::NoShow));
        assert_eq!(InterviewStatus::parse("rescheduled"), None);
        assert_eq!(InterviewType::parse("in_person"), Some(InterviewType::InPerson));
        assert_eq!(InterviewType::parse("onsite"), None);
        assert_eq!(InterviewResult::parse("neutral"), Some(InterviewResult::Neutral));
        assert_eq!(InterviewResult::parse("maybe"), None);
    }
}
