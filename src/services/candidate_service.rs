use crate::dto::candidate_dto::{CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::user::Principal;
use crate::models::vacancy::Skill;
use crate::services::policy_service::{self, Action, Resource};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

const CANDIDATE_COLUMNS: &str = "id, first_name, last_name, patronymic, email, phone, age, \
     experience_years, specialization, position_level, employment_status, work_format, \
     education_level, education_institution, graduation_year, source, source_details, \
     resume_url, recruiter_notes, next_actions, desired_salary, notice_period, \
     created_by, assigned_recruiter, created_at, updated_at";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

pub struct CandidateList {
    pub items: Vec<Candidate>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        payload: CreateCandidatePayload,
        caller: &Principal,
    ) -> Result<Candidate> {
        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM candidates WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Err(Error::Conflict(
                "A candidate with this email address already exists".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "INSERT INTO candidates (first_name, last_name, patronymic, email, phone, age, \
             experience_years, specialization, position_level, employment_status, work_format, \
             education_level, education_institution, graduation_year, source, source_details, \
             resume_url, recruiter_notes, next_actions, desired_salary, notice_period, \
             created_by, assigned_recruiter)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
                     $18, $19, $20, $21, $22, $23)
             RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(payload.patronymic.as_deref().unwrap_or(""))
        .bind(&payload.email)
        .bind(payload.phone.as_deref().unwrap_or(""))
        .bind(payload.age)
        .bind(payload.experience_years.unwrap_or(0))
        .bind(payload.specialization.as_deref().unwrap_or(""))
        .bind(payload.position_level.as_deref().unwrap_or(""))
        .bind(payload.employment_status.as_deref().unwrap_or("unemployed"))
        .bind(payload.work_format.as_deref().unwrap_or(""))
        .bind(payload.education_level.as_deref().unwrap_or(""))
        .bind(payload.education_institution.as_deref().unwrap_or(""))
        .bind(payload.graduation_year)
        .bind(payload.source.as_deref().unwrap_or("hh"))
        .bind(payload.source_details.as_deref().unwrap_or(""))
        .bind(payload.resume_url.as_deref())
        .bind(payload.recruiter_notes.as_deref().unwrap_or(""))
        .bind(payload.next_actions.as_deref().unwrap_or(""))
        .bind(payload.desired_salary)
        .bind(payload.notice_period.as_deref().unwrap_or(""))
        .bind(&caller.username)
        .bind(payload.assigned_recruiter.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        if let Some(names) = &payload.skills {
            set_skills(&mut tx, candidate.id, names).await?;
        }
        tx.commit().await?;

        Ok(candidate)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: UpdateCandidatePayload,
        caller: &Principal,
    ) -> Result<Candidate> {
        let mut tx = self.pool.begin().await?;
        let current = lock_candidate(&mut tx, id).await?;
        policy_service::authorize(caller, Action::Edit, &Resource::Candidate(&current)).require()?;

        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "UPDATE candidates
             SET first_name = COALESCE($2, first_name),
                 last_name = COALESCE($3, last_name),
                 patronymic = COALESCE($4, patronymic),
                 email = COALESCE($5, email),
                 phone = COALESCE($6, phone),
                 age = COALESCE($7, age),
                 experience_years = COALESCE($8, experience_years),
                 specialization = COALESCE($9, specialization),
                 position_level = COALESCE($10, position_level),
                 employment_status = COALESCE($11, employment_status),
                 work_format = COALESCE($12, work_format),
                 education_level = COALESCE($13, education_level),
                 education_institution = COALESCE($14, education_institution),
                 graduation_year = COALESCE($15, graduation_year),
                 source = COALESCE($16, source),
                 source_details = COALESCE($17, source_details),
                 resume_url = COALESCE($18, resume_url),
                 recruiter_notes = COALESCE($19, recruiter_notes),
                 next_actions = COALESCE($20, next_actions),
                 desired_salary = COALESCE($21, desired_salary),
                 notice_period = COALESCE($22, notice_period),
                 assigned_recruiter = COALESCE($23, assigned_recruiter),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(id)
        .bind(payload.first_name.as_deref())
        .bind(payload.last_name.as_deref())
        .bind(payload.patronymic.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.phone.as_deref())
        .bind(payload.age)
        .bind(payload.experience_years)
        .bind(payload.specialization.as_deref())
        .bind(payload.position_level.as_deref())
        .bind(payload.employment_status.as_deref())
        .bind(payload.work_format.as_deref())
        .bind(payload.education_level.as_deref())
        .bind(payload.education_institution.as_deref())
        .bind(payload.graduation_year)
        .bind(payload.source.as_deref())
        .bind(payload.source_details.as_deref())
        .bind(payload.resume_url.as_deref())
        .bind(payload.recruiter_notes.as_deref())
        .bind(payload.next_actions.as_deref())
        .bind(payload.desired_salary)
        .bind(payload.notice_period.as_deref())
        .bind(payload.assigned_recruiter.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        if let Some(names) = &payload.skills {
            set_skills(&mut tx, candidate.id, names).await?;
        }
        tx.commit().await?;

        Ok(candidate)
    }

    pub async fn delete(&self, id: Uuid, caller: &Principal) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let current = lock_candidate(&mut tx, id).await?;
        policy_service::authorize(caller, Action::Delete, &Resource::Candidate(&current))
            .require()?;

        // Applications and interviews go with the candidate via FK cascade.
        sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        Ok(candidate)
    }

    pub async fn skills_for(&self, id: Uuid) -> Result<Vec<Skill>> {
        let skills = sqlx::query_as::<_, Skill>(
            "SELECT s.id, s.name FROM skills s
             JOIN candidate_skills cs ON cs.skill_id = s.id
             WHERE cs.candidate_id = $1
             ORDER BY s.name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    pub async fn list(&self, query: CandidateListQuery) -> Result<CandidateList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(search) = query.search {
            let first = args.len() + 1;
            let second = first + 1;
            let third = first + 2;
            filters.push(format!(
                "(first_name ILIKE ${} OR last_name ILIKE ${} OR email ILIKE ${})",
                first, second, third
            ));
            args.push(format!("%{}%", search.clone()));
            args.push(format!("%{}%", search.clone()));
            args.push(format!("%{}%", search));
        }
        if let Some(min_experience) = query.min_experience {
            // i32, safe to inline.
            filters.push(format!("experience_years >= {}", min_experience));
        }
        if let Some(education) = query.education {
            filters.push(format!("education_level = ${}", args.len() + 1));
            args.push(education);
        }
        if let Some(position_level) = query.position_level {
            filters.push(format!("position_level = ${}", args.len() + 1));
            args.push(position_level);
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let items_query = format!(
            "SELECT {CANDIDATE_COLUMNS}
             FROM candidates
             {}
             ORDER BY created_at DESC
             LIMIT ${} OFFSET ${}",
            where_clause,
            args.len() + 1,
            args.len() + 2
        );

        let total_query = format!("SELECT COUNT(*) FROM candidates {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Candidate>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(per_page).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(CandidateList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates)
    }
}

async fn lock_candidate(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<Candidate> {
    sqlx::query_as::<_, Candidate>(&format!(
        "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
}

async fn set_skills(
    tx: &mut Transaction<'_, Postgres>,
    candidate_id: Uuid,
    names: &[String],
) -> Result<()> {
    sqlx::query("DELETE FROM candidate_skills WHERE candidate_id = $1")
        .bind(candidate_id)
        .execute(&mut **tx)
        .await?;

    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        sqlx::query("INSERT INTO skills (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&mut **tx)
            .await?;
        sqlx::query(
            "INSERT INTO candidate_skills (candidate_id, skill_id)
             SELECT $1, id FROM skills WHERE name = $2
             ON CONFLICT DO NOTHING",
        )
        .bind(candidate_id)
        .bind(name)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
