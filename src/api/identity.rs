//! Actor identity, resolved from the upstream session provider.
//!
//! Session issuance lives outside this service. The fronting provider
//! forwards the authenticated actor's id in the `x-user-id` header; the
//! user store supplies the current role. Requests without a resolvable
//! actor fail before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::domain::aggregates::Role;
use crate::error::AppError;
use crate::state::AppContext;

pub const ACTOR_HEADER: &str = "x-user-id";

#[derive(Clone, Copy, Debug)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

#[axum::async_trait]
impl FromRequestParts<AppContext> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, ctx: &AppContext) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthenticated("login required"))?;
        let user_id = Uuid::parse_str(raw).map_err(|_| AppError::Unauthenticated("login required"))?;
        let user = ctx
            .users
            .find(user_id)
            .await?
            .ok_or(AppError::Unauthenticated("login required"))?;
        Ok(Self { user_id: user.id, role: user.role })
    }
}
