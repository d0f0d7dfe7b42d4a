//! Account handlers. The password hash never leaves the service; the
//! user payload serializer skips it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::api::identity::Identity;
use crate::domain::aggregates::User;
use crate::error::{AppError, Result};
use crate::state::AppContext;
use crate::workflow::account::{self, LoginInput, ProfileInput, RegisterInput};

pub async fn register(
    State(ctx): State<AppContext>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<User>)> {
    input.validate()?;
    let user = account::register(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Credential check for the external session provider: a matching
/// username/password pair yields the account payload to build a session
/// from, anything else a 401.
pub async fn login(State(ctx): State<AppContext>, Json(input): Json<LoginInput>) -> Result<Json<User>> {
    input.validate()?;
    let user = account::verify_credentials(&ctx, input).await?;
    Ok(Json(user))
}

pub async fn profile(State(ctx): State<AppContext>, identity: Identity) -> Result<Json<User>> {
    let user = ctx.users.find(identity.user_id).await?.ok_or(AppError::NotFound("user"))?;
    Ok(Json(user))
}

pub async fn update_profile(
    State(ctx): State<AppContext>,
    identity: Identity,
    Json(input): Json<ProfileInput>,
) -> Result<Json<User>> {
    input.validate()?;
    let user = account::update_profile(&ctx, identity.user_id, input).await?;
    Ok(Json(user))
}
