//! Explicit caller context.
//!
//! Session resolution lives outside this service: a trusted front layer
//! authenticates the user and forwards the resolved identity as headers.
//! Every core operation takes an [`AuthContext`] parameter; there is no
//! ambient session lookup, so services are deterministic under test. A
//! request without a complete identity fails closed with `Unauthorized`
//! before any side effect.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::ServiceError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const BUSINESS_ID_HEADER: &str = "x-business-id";
pub const ROLE_HEADER: &str = "x-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }
}

/// Resolved caller identity, threaded through every core operation.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub business_id: Uuid,
    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: Uuid, business_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            business_id,
            role,
        }
    }

    /// Role gate for administrative operations. Enforced at the entry
    /// point, not in persistence code.
    pub fn require_admin(&self) -> Result<(), ServiceError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(
                "admin role required".to_string(),
            ))
        }
    }
}

/// Request metadata recorded on audit entries.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub device_info: Option<String>,
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_str(parts, USER_ID_HEADER)
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(ServiceError::Unauthorized)?;
        let business_id = header_str(parts, BUSINESS_ID_HEADER)
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(ServiceError::Unauthorized)?;
        let role = header_str(parts, ROLE_HEADER)
            .and_then(Role::from_str)
            .ok_or(ServiceError::Unauthorized)?;

        Ok(AuthContext::new(user_id, business_id, role))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestMeta
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestMeta {
            ip_address: header_str(parts, "x-forwarded-for").map(str::to_string),
            device_info: header_str(parts, "user-agent").map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("staff"), Some(Role::Staff));
        assert_eq!(Role::from_str("superuser"), None);
        assert_eq!(Role::from_str(""), None);
    }

    #[test]
    fn staff_cannot_pass_admin_gate() {
        let ctx = AuthContext::new(Uuid::new_v4(), Uuid::new_v4(), Role::Staff);
        assert!(ctx.require_admin().is_err());
        let ctx = AuthContext::new(Uuid::new_v4(), Uuid::new_v4(), Role::Admin);
        assert!(ctx.require_admin().is_ok());
    }
}
