use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::config::RegistrationMode;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Normalize an email address: trim whitespace and lowercase the domain part.
/// The local part is preserved as given.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    let Some((local, domain)) = trimmed.rsplit_once('@') else {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    };

    if local.is_empty() || domain.is_empty() {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    Ok(format!("{local}@{}", domain.to_lowercase()))
}

fn auth_cookies(access_token: &str, refresh_token: &str) -> CookieJar {
    let access = Cookie::build(("access_token", access_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(15))
        .build();

    let refresh = Cookie::build(("refresh_token", refresh_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(7))
        .build();

    CookieJar::new().add(access).add(refresh)
}

fn clear_auth_cookies() -> CookieJar {
    let access = Cookie::build(("access_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    let refresh = Cookie::build(("refresh_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(access).add(refresh)
}

fn generate_refresh_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

async fn issue_tokens(
    state: &SharedState,
    user: &User,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let claims = Claims::new(user.id, user.is_staff, user.is_superuser);
    let access_token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    let refresh = generate_refresh_token();
    let refresh_hash = hash_token(&refresh);
    db::refresh_tokens::create(
        &state.pool,
        user.id,
        &refresh_hash,
        Utc::now() + Duration::days(7),
    )
    .await?;

    let jar = auth_cookies(&access_token, &refresh);
    Ok((
        jar,
        Json(AuthResponse {
            access_token,
            refresh_token: refresh,
        }),
    ))
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let email = normalize_email(&req.email)?;

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // Advisory lock so concurrent first registrations cannot both bootstrap
    let mut tx = state.pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    let count = db::users::count_all(&mut *tx).await?;

    // The very first account becomes the superuser, regardless of mode
    let user = if count == 0 {
        db::users::create_superuser(&mut *tx, &email, &pw_hash, req.name.trim()).await
    } else {
        if state.config.registration == RegistrationMode::Closed {
            return Err(AppError::Forbidden(
                "Registration is disabled".to_string(),
            ));
        }
        db::users::create(&mut *tx, &email, &pw_hash, req.name.trim()).await
    }
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("An account with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tx.commit().await?;

    tracing::info!(user_id = %user.id, "User registered");

    issue_tokens(&state, &user).await
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let email = normalize_email(&req.email)?;

    if state.login_limiter.check(&email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    issue_tokens(&state, &user).await
}

pub async fn refresh(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let refresh_value = jar
        .get("refresh_token")
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".to_string()))?;

    let token_hash = hash_token(&refresh_value);

    // Single-use: only one caller can flip `used`, a loser replaying the
    // same token lands in the reuse branch below.
    let Some(stored) = db::refresh_tokens::consume(&state.pool, &token_hash).await? else {
        let known = db::refresh_tokens::find_by_hash(&state.pool, &token_hash).await?;
        if let Some(stored) = known {
            tracing::warn!(
                user_id = %stored.user_id,
                "Refresh token reuse detected, revoking all sessions"
            );
            db::refresh_tokens::delete_all_for_user(&state.pool, stored.user_id).await?;
            return Err(AppError::Unauthorized(
                "Refresh token reuse detected. All sessions revoked.".to_string(),
            ));
        }
        return Err(AppError::Unauthorized("Invalid refresh token".to_string()));
    };

    if stored.expires_at < Utc::now() {
        return Err(AppError::Unauthorized("Refresh token expired".to_string()));
    }

    let user = db::users::find_by_id(&state.pool, stored.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    issue_tokens(&state, &user).await
}

pub async fn logout(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    if let Some(cookie) = jar.get("refresh_token") {
        let token_hash = hash_token(cookie.value());
        db::refresh_tokens::delete_by_hash(&state.pool, &token_hash).await?;
    }

    Ok((
        clear_auth_cookies(),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

pub async fn change_password(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if req.new_password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let valid =
        password::verify(&req.current_password, &user.password_hash).map_err(AppError::Internal)?;

    if !valid {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.new_password).map_err(AppError::Internal)?;
    db::users::update_password(&state.pool, user.id, &pw_hash).await?;

    // Revoke every existing session before issuing fresh tokens
    db::refresh_tokens::delete_all_for_user(&state.pool, user.id).await?;

    issue_tokens(&state, &user).await
}

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<User>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    Ok(Json(user))
}
