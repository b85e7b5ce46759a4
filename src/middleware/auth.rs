use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Error;
use crate::models::user::{Principal, Role};

/// Token payload issued by the identity provider. Only the signature and
/// expiry are checked here; what the caller may do is decided per request
/// by the policy engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn principal(&self) -> Principal {
        Principal::new(self.sub.clone(), Role::from_claim(self.role.as_deref()))
    }
}

/// Validates the bearer token and stashes the resulting `Principal` in the
/// request extensions. A token with an unrecognized role is still admitted;
/// the policy engine treats it as `Role::Unknown`.
pub async fn require_bearer_auth(mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"missing_authorization"})),
        )
            .into_response();
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"bad_authorization"})),
        )
            .into_response();
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"unsupported_scheme"})),
        )
            .into_response();
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => {
            let principal = data.claims.principal();
            req.extensions_mut().insert(data.claims);
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error":"invalid_token"})),
        )
            .into_response(),
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| Error::Unauthorized("Missing authentication context".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_resolve_roles_through_the_closed_enum() {
        let claims = Claims {
            sub: "r1".to_string(),
            exp: 0,
            role: Some("recruiter".to_string()),
        };
        assert_eq!(claims.principal().role, Role::Recruiter);

        let no_role = Claims {
            sub: "ghost".to_string(),
            exp: 0,
            role: None,
        };
        assert_eq!(no_role.principal().role, Role::Unknown);

        let odd_role = Claims {
            sub: "ghost".to_string(),
            exp: 0,
            role: Some("wizard".to_string()),
        };
        assert_eq!(odd_role.principal().role, Role::Unknown);
    }
}
