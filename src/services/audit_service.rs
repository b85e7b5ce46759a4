use crate::error::Result;
use crate::models::audit_log::AuditLog;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct AuditService {
    pool: PgPool,
}

impl AuditService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn log(
        &self,
        username: Option<&str>,
        action: &str,
        entity_type: &str,
        entity_id: Uuid,
        changes: Option<JsonValue>,
        user_agent: Option<String>,
    ) -> Result<AuditLog> {
        let row = sqlx::query_as::<_, AuditLog>(
            "INSERT INTO audit_logs (username, action, entity_type, entity_id, changes, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, username, action, entity_type, entity_id, changes, user_agent, created_at",
        )
        .bind(username)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(changes)
        .bind(user_agent)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
