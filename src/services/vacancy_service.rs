use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload, VacancyListQuery};
use crate::error::{Error, Result};
use crate::models::user::Principal;
use crate::models::vacancy::{Skill, Vacancy, VacancyStatus};
use crate::services::policy_service::{self, Action, Resource};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

const VACANCY_COLUMNS: &str = "id, title, description, required_experience, salary, work_format, \
     employment_type, location, status, created_by, assigned_recruiter, created_at, updated_at";

#[derive(Clone)]
pub struct VacancyService {
    pool: PgPool,
}

pub struct VacancyList {
    pub items: Vec<Vacancy>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Outcome of a lifecycle transition; both sides are reported so the caller
/// can build audit entries and user-facing messages.
pub struct StatusChange {
    pub vacancy: Vacancy,
    pub previous: String,
    pub current: String,
}

impl VacancyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateVacancyPayload, caller: &Principal) -> Result<Vacancy> {
        let status = match payload.status.as_deref() {
            Some(raw) => VacancyStatus::parse(raw)
                .ok_or_else(|| Error::InvalidState(format!("Unknown vacancy status: {}", raw)))?,
            None => VacancyStatus::Draft,
        };

        let mut tx = self.pool.begin().await?;
        let vacancy = sqlx::query_as::<_, Vacancy>(&format!(
            "INSERT INTO vacancies (title, description, required_experience, salary, work_format, \
             employment_type, location, status, created_by, assigned_recruiter)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {VACANCY_COLUMNS}"
        ))
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.required_experience.unwrap_or(0))
        .bind(payload.salary)
        .bind(payload.work_format.as_deref().unwrap_or("office"))
        .bind(payload.employment_type.as_deref().unwrap_or("full_time"))
        .bind(payload.location.as_deref().unwrap_or(""))
        .bind(status.as_str())
        .bind(&caller.username)
        .bind(payload.assigned_recruiter.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        if let Some(names) = &payload.skills {
            set_skills(&mut tx, vacancy.id, names).await?;
        }
        tx.commit().await?;

        Ok(vacancy)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: UpdateVacancyPayload,
        caller: &Principal,
    ) -> Result<Vacancy> {
        let mut tx = self.pool.begin().await?;
        let current = lock_vacancy(&mut tx, id).await?;
        policy_service::authorize(caller, Action::Edit, &Resource::Vacancy(&current)).require()?;

        let vacancy = sqlx::query_as::<_, Vacancy>(&format!(
            "UPDATE vacancies
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 required_experience = COALESCE($4, required_experience),
                 salary = COALESCE($5, salary),
                 work_format = COALESCE($6, work_format),
                 employment_type = COALESCE($7, employment_type),
                 location = COALESCE($8, location),
                 assigned_recruiter = COALESCE($9, assigned_recruiter),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {VACANCY_COLUMNS}"
        ))
        .bind(id)
        .bind(payload.title.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.required_experience)
        .bind(payload.salary)
        .bind(payload.work_format.as_deref())
        .bind(payload.employment_type.as_deref())
        .bind(payload.location.as_deref())
        .bind(payload.assigned_recruiter.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        if let Some(names) = &payload.skills {
            set_skills(&mut tx, vacancy.id, names).await?;
        }
        tx.commit().await?;

        Ok(vacancy)
    }

    /// Sets the vacancy status. The new value is validated before anything
    /// is touched, and ownership is re-checked against the freshly locked
    /// row, so a stale earlier authorization cannot slip a write through.
    pub async fn change_status(
        &self,
        id: Uuid,
        new_status: &str,
        caller: &Principal,
    ) -> Result<StatusChange> {
        let status = VacancyStatus::parse(new_status)
            .ok_or_else(|| Error::InvalidState(format!("Unknown vacancy status: {}", new_status)))?;

        let mut tx = self.pool.begin().await?;
        let current = lock_vacancy(&mut tx, id).await?;
        policy_service::authorize(caller, Action::ChangeStatus, &Resource::Vacancy(&current))
            .require()?;

        let vacancy = sqlx::query_as::<_, Vacancy>(&format!(
            "UPDATE vacancies SET status = $2, updated_at = NOW() WHERE id = $1
             RETURNING {VACANCY_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(StatusChange {
            previous: current.status,
            current: vacancy.status.clone(),
            vacancy,
        })
    }

    pub async fn delete(&self, id: Uuid, caller: &Principal) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let current = lock_vacancy(&mut tx, id).await?;
        policy_service::authorize(caller, Action::Delete, &Resource::Vacancy(&current)).require()?;

        sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vacancy> {
        let vacancy = sqlx::query_as::<_, Vacancy>(&format!(
            "SELECT {VACANCY_COLUMNS} FROM vacancies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Vacancy not found".to_string()))?;

        Ok(vacancy)
    }

    pub async fn skills_for(&self, id: Uuid) -> Result<Vec<Skill>> {
        let skills = sqlx::query_as::<_, Skill>(
            "SELECT s.id, s.name FROM skills s
             JOIN vacancy_skills vs ON vs.skill_id = s.id
             WHERE vs.vacancy_id = $1
             ORDER BY s.name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    pub async fn list(&self, query: VacancyListQuery) -> Result<VacancyList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            filters.push(format!("status = ${}", args.len() + 1));
            args.push(status);
        }
        if let Some(search) = query.search {
            let first = args.len() + 1;
            let second = first + 1;
            filters.push(format!(
                "(title ILIKE ${} OR location ILIKE ${})",
                first, second
            ));
            args.push(format!("%{}%", search.clone()));
            args.push(format!("%{}%", search));
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let items_query = format!(
            "SELECT {VACANCY_COLUMNS}
             FROM vacancies
             {}
             ORDER BY created_at DESC
             LIMIT ${} OFFSET ${}",
            where_clause,
            args.len() + 1,
            args.len() + 2
        );

        let total_query = format!("SELECT COUNT(*) FROM vacancies {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Vacancy>(&items_query);
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

        Ok(VacancyList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }
}

async fn lock_vacancy(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<Vacancy> {
    sqlx::query_as::<_, Vacancy>(&format!(
        "SELECT {VACANCY_COLUMNS} FROM vacancies WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| Error::NotFound("Vacancy not found".to_string()))
}

/// Replaces the required-skill set. Skill rows are shared, get-or-create by
/// unique name; removing a name only detaches it.
async fn set_skills(
    tx: &mut Transaction<'_, Postgres>,
    vacancy_id: Uuid,
    names: &[String],
) -> Result<()> {
    sqlx::query("DELETE FROM vacancy_skills WHERE vacancy_id = $1")
        .bind(vacancy_id)
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
            "INSERT INTO vacancy_skills (vacancy_id, skill_id)
             SELECT $1, id FROM skills WHERE name = $2
             ON CONFLICT DO NOTHING",
        )
        .bind(vacancy_id)
        .bind(name)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
