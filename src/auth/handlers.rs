use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, SignupRequest},
        repo_types::User,
        services::{check_login, check_signup, normalize_signup},
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/users/:user_id", get(get_user))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    if let Err(e) = normalize_signup(&mut payload) {
        warn!(username = %payload.username, error = %e, "signup rejected");
        return Err(e);
    }

    let taken = User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some();
    if let Err(e) = check_signup(&payload, taken) {
        warn!(username = %payload.username, error = %e, "signup rejected");
        return Err(e);
    }

    // A concurrent signup can still win the race; the unique index catches it.
    let user = User::create(
        &state.db,
        &payload.username,
        &payload.password,
        &payload.user_type,
    )
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "Username already registered"))?;

    info!(user_id = user.id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = payload.username.as_str();
    let found = User::find_by_username(&state.db, username).await?;

    let user = match check_login(found, username, &payload.password) {
        Ok(u) => u,
        Err(e) => {
            warn!(username = %username, "failed login attempt");
            return Err(e);
        }
    };

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful",
        user_data: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<PublicUser>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(user.into()))
}
