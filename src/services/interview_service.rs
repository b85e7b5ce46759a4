use crate::dto::interview_dto::{InterviewListQuery, ScheduleInterviewPayload, UpdateInterviewStatusPayload};
use crate::error::{Error, Result};
use crate::models::interview::{Interview, InterviewResult, InterviewStatus, InterviewType};
use crate::models::user::Principal;
use crate::services::notification_service::NotificationService;
use crate::services::policy_service::{self, Action, Resource};
use crate::utils::time;
use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

const INTERVIEW_COLUMNS: &str = "id, candidate_id, scheduled_date, interview_type, notes, \
     scheduled_by, status, feedback, result, reminder_sent, reminder_date, created_at, updated_at";

/// Reminders go out when a scheduled interview is within this many hours.
pub const REMINDER_LEAD_HOURS: i64 = 24;

#[derive(Clone)]
pub struct InterviewService {
    pool: PgPool,
}

/// Result of one reminder sweep. Failures are collected per interview so a
/// broken mailbox cannot stall the rest of the batch.
pub struct SweepOutcome {
    pub selected: usize,
    pub notified: Vec<Uuid>,
    pub failures: Vec<SweepFailure>,
}

pub struct SweepFailure {
    pub interview_id: Uuid,
    pub reason: String,
}

impl SweepOutcome {
    pub fn summary(&self) -> String {
        format!("{} of {} reminders sent", self.notified.len(), self.selected)
    }
}

/// One reminder-eligible interview joined with the data the email needs.
#[derive(Debug, FromRow)]
struct DueReminder {
    id: Uuid,
    scheduled_date: DateTime<Utc>,
    interview_type: String,
    notes: String,
    first_name: String,
    last_name: String,
    patronymic: String,
    specialization: String,
    recruiter_email: String,
}

impl DueReminder {
    fn candidate_name(&self) -> String {
        format!("{} {} {}", self.last_name, self.first_name, self.patronymic)
            .trim()
            .to_string()
    }
}

/// The selection window: strictly after `now`, up to and including the lead
/// horizon.
pub fn reminder_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + Duration::hours(REMINDER_LEAD_HOURS))
}

fn reminder_email(item: &DueReminder) -> (String, String) {
    let type_label = InterviewType::parse(&item.interview_type)
        .map(InterviewType::label)
        .unwrap_or(item.interview_type.as_str());
    let subject = format!("Interview reminder: {}", item.candidate_name());
    let body = format!(
        "Hello!\n\n\
         This is a reminder about an upcoming interview.\n\n\
         Candidate: {}\n\
         Position: {}\n\
         Date and time: {}\n\
         Interview type: {}\n\
         Notes: {}\n\n\
         HR System",
        item.candidate_name(),
        if item.specialization.is_empty() {
            "Not specified"
        } else {
            item.specialization.as_str()
        },
        item.scheduled_date.format("%Y-%m-%d %H:%M"),
        type_label,
        if item.notes.is_empty() {
            "No additional information"
        } else {
            item.notes.as_str()
        },
    );
    (subject, body)
}

impl InterviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn schedule(
        &self,
        payload: ScheduleInterviewPayload,
        caller: &Principal,
    ) -> Result<Interview> {
        let scheduled_date = time::parse_schedule_datetime(&payload.scheduled_date)?;
        let interview_type = InterviewType::parse(&payload.interview_type).ok_or_else(|| {
            Error::InvalidState(format!("Unknown interview type: {}", payload.interview_type))
        })?;

        let candidate_exists =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM candidates WHERE id = $1")
                .bind(payload.candidate_id)
                .fetch_optional(&self.pool)
                .await?;
        if candidate_exists.is_none() {
            return Err(Error::NotFound("Candidate not found".to_string()));
        }

        let interview = sqlx::query_as::<_, Interview>(&format!(
            "INSERT INTO interviews (candidate_id, scheduled_date, interview_type, notes, \
             scheduled_by, status, reminder_sent)
             VALUES ($1, $2, $3, $4, $5, 'scheduled', FALSE)
             RETURNING {INTERVIEW_COLUMNS}"
        ))
        .bind(payload.candidate_id)
        .bind(scheduled_date)
        .bind(interview_type.as_str())
        .bind(payload.notes.as_deref().unwrap_or(""))
        .bind(&caller.username)
        .fetch_one(&self.pool)
        .await?;

        Ok(interview)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        payload: UpdateInterviewStatusPayload,
        caller: &Principal,
    ) -> Result<Interview> {
        let status = InterviewStatus::parse(&payload.status).ok_or_else(|| {
            Error::InvalidState(format!("Unknown interview status: {}", payload.status))
        })?;
        let result = match payload.result.as_deref() {
            Some(raw) => Some(
                InterviewResult::parse(raw)
                    .ok_or_else(|| Error::InvalidState(format!("Unknown interview result: {}", raw)))?,
            ),
            None => None,
        };

        let mut tx = self.pool.begin().await?;
        let current = sqlx::query_as::<_, Interview>(&format!(
            "SELECT {INTERVIEW_COLUMNS} FROM interviews WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::NotFound("Interview not found".to_string()))?;

        policy_service::authorize(caller, Action::Edit, &Resource::Interview(&current)).require()?;

        let interview = sqlx::query_as::<_, Interview>(&format!(
            "UPDATE interviews
             SET status = $2,
                 result = COALESCE($3, result),
                 feedback = COALESCE($4, feedback),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {INTERVIEW_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(result.map(InterviewResult::as_str))
        .bind(payload.feedback.as_deref())
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(interview)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Interview> {
        let interview = sqlx::query_as::<_, Interview>(&format!(
            "SELECT {INTERVIEW_COLUMNS} FROM interviews WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Interview not found".to_string()))?;

        Ok(interview)
    }

    pub async fn list(&self, query: InterviewListQuery) -> Result<Vec<Interview>> {
        let mut filters = Vec::new();
        let mut statement = format!(
            "SELECT {INTERVIEW_COLUMNS} FROM interviews"
        );
        if query.candidate_id.is_some() {
            filters.push("candidate_id = $1".to_string());
        }
        if query.status.is_some() {
            filters.push(format!("status = ${}", filters.len() + 1));
        }
        if !filters.is_empty() {
            statement.push_str(" WHERE ");
            statement.push_str(&filters.join(" AND "));
        }
        statement.push_str(" ORDER BY scheduled_date DESC");

        let mut q = sqlx::query_as::<_, Interview>(&statement);
        if let Some(candidate_id) = query.candidate_id {
            q = q.bind(candidate_id);
        }
        if let Some(status) = query.status {
            q = q.bind(status);
        }
        let interviews = q.fetch_all(&self.pool).await?;

        Ok(interviews)
    }

    /// One reminder pass. Selects every scheduled, not-yet-reminded
    /// interview inside the lead window, emails the scheduling user, and
    /// flips `reminder_sent` only after a successful dispatch. A failed
    /// dispatch is recorded and the sweep moves on; re-running immediately
    /// selects nothing new.
    pub async fn sweep_reminders(
        &self,
        mailer: &NotificationService,
        now: DateTime<Utc>,
    ) -> Result<SweepOutcome> {
        let (window_start, window_end) = reminder_window(now);

        let due = sqlx::query_as::<_, DueReminder>(
            "SELECT i.id, i.scheduled_date, i.interview_type, i.notes,
                    c.first_name, c.last_name, c.patronymic, c.specialization,
                    u.email AS recruiter_email
             FROM interviews i
             JOIN candidates c ON c.id = i.candidate_id
             JOIN users u ON u.username = i.scheduled_by
             WHERE i.status = 'scheduled'
               AND i.reminder_sent = FALSE
               AND i.scheduled_date > $1
               AND i.scheduled_date <= $2
             ORDER BY i.scheduled_date ASC",
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_all(&self.pool)
        .await?;

        let mut outcome = SweepOutcome {
            selected: due.len(),
            notified: Vec::new(),
            failures: Vec::new(),
        };

        for item in due {
            let (subject, body) = reminder_email(&item);
            match mailer.send(&item.recruiter_email, &subject, &body).await {
                Ok(()) => {
                    sqlx::query(
                        "UPDATE interviews
                         SET reminder_sent = TRUE, reminder_date = $1, updated_at = NOW()
                         WHERE id = $2 AND reminder_sent = FALSE",
                    )
                    .bind(now)
                    .bind(item.id)
                    .execute(&self.pool)
                    .await?;
                    outcome.notified.push(item.id);
                }
                Err(err) => {
                    warn!(interview_id = %item.id, error = %err, "reminder dispatch failed");
                    outcome.failures.push(SweepFailure {
                        interview_id: item.id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn due(hours_ahead: i64) -> DueReminder {
        DueReminder {
            id: Uuid::new_v4(),
            scheduled_date: Utc.with_ymd_and_hms(2025, 3, 14, 10, 0, 0).unwrap()
                + Duration::hours(hours_ahead),
            interview_type: "technical".to_string(),
            notes: String::new(),
            first_name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
            patronymic: String::new(),
            specialization: "Backend".to_string(),
            recruiter_email: "r1@example.com".to_string(),
        }
    }

    #[test]
    fn window_spans_exactly_the_lead_time() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 10, 0, 0).unwrap();
        let (start, end) = reminder_window(now);
        assert_eq!(start, now);
        assert_eq!(end - start, Duration::hours(REMINDER_LEAD_HOURS));
        // An interview 20h out sits inside the window; 25h out does not.
        let in_window = now + Duration::hours(20);
        let beyond = now + Duration::hours(25);
        assert!(in_window > start && in_window <= end);
        assert!(!(beyond > start && beyond <= end));
        // The horizon itself is included, `now` itself is not.
        assert!(!(start > start && start <= end));
        assert!(end > start && end <= end);
    }

    #[test]
    fn summary_reports_sent_out_of_selected() {
        let outcome = SweepOutcome {
            selected: 5,
            notified: vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()],
            failures: vec![
                SweepFailure {
                    interview_id: Uuid::new_v4(),
                    reason: "mailer returned 500".to_string(),
                },
                SweepFailure {
                    interview_id: Uuid::new_v4(),
                    reason: "connection refused".to_string(),
                },
            ],
        };
        assert_eq!(outcome.summary(), "3 of 5 reminders sent");
    }

    #[test]
    fn reminder_email_carries_the_essentials() {
        let item = due(20);
        let (subject, body) = reminder_email(&item);
        assert!(subject.contains("Ivanov Ivan"));
        assert!(body.contains("Backend"));
        assert!(body.contains("Technical"));
        assert!(body.contains("2025-03-15 06:00"));
        assert!(body.contains("No additional information"));
    }
}
