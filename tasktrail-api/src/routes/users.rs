/// Profile endpoints
///
/// # Endpoints
///
/// - `GET /v1/users/me` - Current user's profile
/// - `PUT /v1/users/me` - Partial profile update (name and/or email)
///
/// Both run behind the session token layer; the user is always the
/// authenticated identity, never a path parameter.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::auth::UserResponse,
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use tasktrail_shared::{
    auth::middleware::AuthContext,
    models::user::{UpdateProfile, User},
};
use validator::Validate;

/// Profile response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// The profile
    pub user: UserResponse,
}

/// Partial profile update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, max = 100, message = "Name must not be empty"))]
    pub name: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Returns the authenticated user's profile
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid token (raised by the auth layer)
/// - `404 Not Found`: the account no longer exists
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ProfileResponse>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        user: UserResponse::from(&user),
    }))
}

/// Applies a partial profile update
///
/// Fields left out of the request body are unchanged.
///
/// # Errors
///
/// - `400 Bad Request`: invalid email format, empty name, duplicate email,
///   or a body carrying no fields at all
/// - `401 Unauthorized`: missing or invalid token
/// - `404 Not Found`: the account no longer exists
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    req.validate()?;

    let update = UpdateProfile {
        name: req.name,
        email: req.email,
    };
    if update.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let user = User::update_profile(&state.db, auth.user_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        user: UserResponse::from(&user),
    }))
}
