//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use projectdesk_core::error::CoreError;
use projectdesk_core::validation::FieldErrors;
use projectdesk_db::models::user::{CreateUser, User, UserResponse};
use projectdesk_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::issue_access_token;
use crate::auth::password::{check_unknown_user, hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const BAD_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
///
/// Fields are optional at the type level so that a missing field is reported
/// as a field error rather than a body-parsing failure.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "The name field is required."),
        length(max = 255, message = "The name field must not be greater than 255 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email field must be a valid email address.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "The password field is required."),
        length(min = 8, message = "The password field must be at least 8 characters.")
    )]
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Trim and normalize, validate every field, then hash the password.
    fn into_create(self) -> AppResult<CreateUser> {
        let input = Self {
            name: self.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            email: self.email.map(|e| normalize_email(&e)).filter(|e| !e.is_empty()),
            password: self.password,
        };
        input
            .validate()
            .map_err(|e| CoreError::Validation(FieldErrors::from(e)))?;

        let (Some(name), Some(email), Some(password)) = (input.name, input.email, input.password)
        else {
            return Err(AppError::InternalError(
                "Required registration field missing after validation".into(),
            ));
        };

        let password_hash = hash_password(&password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

        Ok(CreateUser {
            name,
            email,
            password_hash,
        })
    }
}

/// Request body for `POST /auth/login`. Missing fields read as empty and
/// simply fail to match.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and sign it in.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let new_user = input.into_create()?;

    if UserRepo::find_by_email(&state.pool, &new_user.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "The email has already been taken.".into(),
        )));
    }

    let user = UserRepo::create(&state.pool, &new_user).await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(auth_response(&state, &user)?)))
}

/// POST /api/v1/auth/login
///
/// Exchange email + password for an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&input.email);

    let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? else {
        check_unknown_user(&input.password);
        return Err(bad_credentials());
    };

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::info!(user_id = user.id, "Login rejected");
        return Err(bad_credentials());
    }

    Ok(Json(auth_response(&state, &user)?))
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserResponse>> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;
    Ok(Json(UserResponse::from(&row)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = issue_access_token(user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: jwt.expires_in_secs(),
        user: UserResponse::from(user),
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(BAD_CREDENTIALS.into()))
}
