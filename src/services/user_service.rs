use crate::dto::user_dto::{CreateUserPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::user::{Role, User, SYSTEM_ADMIN_USERNAME};
use sqlx::PgPool;

const USER_COLUMNS: &str =
    "id, username, email, phone_number, role, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

pub struct AdminStats {
    pub total_users: i64,
    pub recruiters: i64,
    pub managers: i64,
    pub administrators: i64,
    pub total_candidates: i64,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    pub async fn create(&self, payload: CreateUserPayload) -> Result<User> {
        let role = Role::parse(&payload.role)
            .ok_or_else(|| Error::InvalidState(format!("Unknown role: {}", payload.role)))?;

        let exists = sqlx::query_scalar::<_, uuid::Uuid>("SELECT id FROM users WHERE username = $1")
            .bind(&payload.username)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Err(Error::Conflict(
                "A user with this username already exists".to_string(),
            ));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, phone_number, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&payload.username)
        .bind(&payload.email)
        .bind(payload.phone_number.as_deref().unwrap_or(""))
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn update(&self, username: &str, payload: UpdateUserPayload) -> Result<User> {
        ensure_mutable(username)?;
        let role = match payload.role.as_deref() {
            Some(raw) => Some(
                Role::parse(raw)
                    .ok_or_else(|| Error::InvalidState(format!("Unknown role: {}", raw)))?,
            ),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET email = COALESCE($2, email),
                 phone_number = COALESCE($3, phone_number),
                 role = COALESCE($4, role),
                 is_active = COALESCE($5, is_active),
                 updated_at = NOW()
             WHERE username = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(payload.email.as_deref())
        .bind(payload.phone_number.as_deref())
        .bind(role.map(Role::as_str))
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    pub async fn delete(&self, username: &str) -> Result<()> {
        ensure_mutable(username)?;
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    pub async fn stats(&self) -> Result<AdminStats> {
        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let recruiters =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = 'recruiter'")
                .fetch_one(&self.pool)
                .await?;
        let managers =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = 'manager'")
                .fetch_one(&self.pool)
                .await?;
        let administrators =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = 'administrator'")
                .fetch_one(&self.pool)
                .await?;
        let total_candidates = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;

        Ok(AdminStats {
            total_users,
            recruiters,
            managers,
            administrators,
            total_candidates,
        })
    }
}

/// Write-time re-check of the `systemadmin` protection. The policy engine
/// already refuses these requests; the service refuses them again so no
/// other code path can reach the distinguished account either.
fn ensure_mutable(username: &str) -> Result<()> {
    if username == SYSTEM_ADMIN_USERNAME {
        return Err(Error::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn systemadmin_is_never_mutable() {
        assert!(matches!(
            ensure_mutable(SYSTEM_ADMIN_USERNAME),
            Err(Error::Forbidden)
        ));
        assert!(ensure_mutable("any_other_user").is_ok());
    }
}
