use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The distinguished administrator account. It can never be edited,
/// deleted, or have its role changed, regardless of who asks.
pub const SYSTEM_ADMIN_USERNAME: &str = "systemadmin";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_system_admin(&self) -> bool {
        self.username == SYSTEM_ADMIN_USERNAME
    }
}

/// Caller role. A token without a recognized role resolves to `Unknown`,
/// which the policy engine treats as its own case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Recruiter,
    Manager,
    Administrator,
    Unknown,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "recruiter" => Some(Self::Recruiter),
            "manager" => Some(Self::Manager),
            "administrator" => Some(Self::Administrator),
            _ => None,
        }
    }

    pub fn from_claim(claim: Option<&str>) -> Self {
        claim.and_then(Self::parse).unwrap_or(Self::Unknown)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recruiter => "recruiter",
            Self::Manager => "manager",
            Self::Administrator => "administrator",
            Self::Unknown => "unknown",
        }
    }
}

/// An authenticated caller. Always passed explicitly into policy and
/// workflow calls; there is no ambient "current user".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_roles_parse() {
        assert_eq!(Role::parse("recruiter"), Some(Role::Recruiter));
        assert_eq!(Role::parse("manager"), Some(Role::Manager));
        assert_eq!(Role::parse("administrator"), Some(Role::Administrator));
    }

    #[test]
    fn missing_or_unrecognized_claims_become_unknown() {
        assert_eq!(Role::from_claim(None), Role::Unknown);
        assert_eq!(Role::from_claim(Some("")), Role::Unknown);
        assert_eq!(Role::from_claim(Some("superuser")), Role::Unknown);
        assert_eq!(Role::from_claim(Some("Administrator")), Role::Unknown);
    }
}
