//! User handlers
//!
//! Registration, login, logout and the caller's profile.

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::{authorize, Operation, Registration};
use crate::auth::SessionToken;
use crate::domain::entities::{Role, User};
use crate::error::AppError;
use crate::AppState;

/// Request to register a new account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 5, max = 20, message = "Username must be 5-20 characters"))]
    pub username: String,
    #[validate(length(min = 5, max = 20, message = "Full name must be 5-20 characters"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(range(min = 0, max = 90, message = "Age must be between 0 and 90"))]
    pub age: i32,
    #[validate(length(min = 5, max = 20, message = "Password must be 5-20 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Request to log in
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub age: i32,
    pub roles: Vec<Role>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.to_string(),
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            age: user.age,
            roles: user.roles,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Response for a successful login. The token is shown only once.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    request.validate()?;

    let user = state
        .user_service
        .register(Registration {
            username: request.username,
            full_name: request.full_name,
            email: request.email,
            age: request.age,
            password: request.password,
            confirm_password: request.confirm_password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state
        .user_service
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token: session.token,
        token_type: "Bearer",
        expires_at: session.expires_at,
        user: session.user.into(),
    }))
}

/// POST /users/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> Result<StatusCode, AppError> {
    state.user_service.logout(&token.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/profile
pub async fn profile(Extension(user): Extension<User>) -> Result<Json<UserResponse>, AppError> {
    authorize(&user, Operation::Read)?;
    Ok(Json(user.into()))
}
