use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::interview::Interview;
use crate::services::interview_service::{SweepFailure, SweepOutcome};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScheduleInterviewPayload {
    pub candidate_id: Uuid,
    /// "YYYY-MM-DD HH:MM"
    #[validate(length(min = 1))]
    pub scheduled_date: String,
    #[validate(length(min = 1))]
    pub interview_type: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateInterviewStatusPayload {
    #[validate(length(min = 1))]
    pub status: String,
    pub result: Option<String>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewResponse {
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

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InterviewListQuery {
    pub candidate_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepFailureResponse {
    pub interview_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResponse {
    pub selected: usize,
    pub notified: Vec<Uuid>,
    pub failed: Vec<SweepFailureResponse>,
    pub summary: String,
}

impl From<Interview> for InterviewResponse {
    fn from(value: Interview) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            scheduled_date: value.scheduled_date,
            interview_type: value.interview_type,
            notes: value.notes,
            scheduled_by: value.scheduled_by,
            status: value.status,
            feedback: value.feedback,
            result: value.result,
            reminder_sent: value.reminder_sent,
            reminder_date: value.reminder_date,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<SweepFailure> for SweepFailureResponse {
    fn from(value: SweepFailure) -> Self {
        Self {
            interview_id: value.interview_id,
            reason: value.reason,
        }
    }
}

impl From<SweepOutcome> for SweepResponse {
    fn from(value: SweepOutcome) -> Self {
        let summary = value.summary();
        Self {
            selected: value.selected,
            notified: value.notified,
            failed: value.failures.into_iter().map(Into::into).collect(),
            summary,
        }
    }
}
