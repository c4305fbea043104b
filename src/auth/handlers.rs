use axum::{
    extract::{FromRef, State},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, ChangePasswordRequest, LoginRequest, MessageResponse, ProfileResponse,
            PublicUser, SignupRequest, UpdateProfileRequest,
        },
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::{NewUser, User},
    },
    error::{ApiError, Result},
    models::{ActivityLevel, Gender, Goal},
    state::AppState,
};

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>> {
    let name = payload.name.as_deref().unwrap_or("").trim().to_string();
    let email = payload
        .email
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let password = payload.password.as_deref().unwrap_or("");

    if name.is_empty() || email.is_empty() || password.is_empty() {
        warn!("signup missing required fields");
        return Err(ApiError::BadRequest(
            "Missing required fields: name, email, password".into(),
        ));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "signup invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    // Best-effort pre-check; the unique constraint below is authoritative.
    if let Ok(Some(_)) = User::find_by_email(&state.db, &email).await {
        warn!(email = %email, "signup email already registered");
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let hash = hash_password(password)?;
    let user = match User::create(
        &state.db,
        NewUser {
            name: &name,
            email: &email,
            password_hash: &hash,
            age: payload.age,
            weight: payload.weight,
            height: payload.height,
            gender: payload.gender.unwrap_or(Gender::Male),
            goal: payload.goal.unwrap_or(Goal::WeightLoss),
            activity_level: payload.activity_level.unwrap_or(ActivityLevel::Moderate),
        },
    )
    .await
    {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "signup lost race on unique email");
            return Err(ApiError::Conflict("User already exists".into()));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(ApiError::Internal(e));
        }
    };

    let token = JwtKeys::from_ref(&state).sign(user.id)?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        success: true,
        token,
        user: PublicUser::from_user(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let email = payload
        .email
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let password = payload.password.as_deref().unwrap_or("");
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".into()));
    }

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(user) => user,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse {
        success: true,
        token,
        user: PublicUser::from_user(user),
    }))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(ProfileResponse {
        success: true,
        user: PublicUser::with_created_at(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    let mut user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    payload.apply(&mut user);
    let updated = User::update_profile(&state.db, &user).await?;

    info!(user_id = %user_id, "profile updated");
    Ok(Json(ProfileResponse {
        success: true,
        user: PublicUser::from_user(updated),
    }))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let current = payload.current_password.as_deref().unwrap_or("");
    let new = payload.new_password.as_deref().unwrap_or("");
    if current.is_empty() || new.is_empty() {
        return Err(ApiError::BadRequest(
            "Current and new password are required".into(),
        ));
    }
    if new.len() < 6 {
        return Err(ApiError::BadRequest(
            "New password must be at least 6 characters".into(),
        ));
    }

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    if !verify_password(current, &user.password_hash)? {
        warn!(user_id = %user_id, "change-password wrong current password");
        return Err(ApiError::BadRequest("Current password is incorrect".into()));
    }

    let hash = hash_password(new)?;
    User::update_password(&state.db, user_id, &hash).await?;

    info!(user_id = %user_id, "password changed");
    Ok(Json(MessageResponse {
        success: true,
        message: "Password updated successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MessageResponse>> {
    // Removes the account only; the user's saved plans are not cascaded.
    User::delete(&state.db, user_id).await?;

    info!(user_id = %user_id, "account deleted");
    Ok(Json(MessageResponse {
        success: true,
        message: "Account deleted successfully".into(),
    }))
}
