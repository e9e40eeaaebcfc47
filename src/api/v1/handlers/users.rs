/*
 * Responsibility
 * - /users handlers: registration, login (token issuance), profile, admin CRUD
 * - Only login issues tokens; everything else reads the identity the gate attached
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::users::{CountResponse, CreateUserRequest, LoginRequest, LoginResponse, UserResponse},
        extractors::{AdminCtx, AuthCtxExtractor},
    },
    error::AppError,
    repos::user_repo::NewUser,
    services::password,
    state::AppState,
};

async fn insert_user(
    state: &AppState,
    req: CreateUserRequest,
    is_admin: bool,
) -> Result<UserResponse, AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let password_hash = password::hash_password_blocking(req.password).await?;

    let row = state
        .users
        .create(NewUser {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            password_hash,
            phone: req.phone,
            is_admin,
            street: req.street,
            apartment: req.apartment,
            zip: req.zip,
            city: req.city,
            country: req.country,
        })
        .await?;

    tracing::info!(user_id = %row.id, is_admin, "user created");
    Ok(UserResponse::from(row))
}

/// Public sign-up. Always creates a customer, whatever `isAdmin` says.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = insert_user(&state, req, false).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn create_user(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let is_admin = req.is_admin;
    let user = insert_user(&state, req, is_admin).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    // Unknown email and wrong password look the same to the client, in body and in time.
    let user = state.users.find_by_email(req.email.trim()).await?;
    let stored = user.as_ref().map(|u| u.password_hash.clone());
    let verified = password::verify_credentials(stored, req.password).await;

    let user = match user {
        Some(user) if verified => user,
        Some(user) => {
            tracing::info!(user_id = %user.id, "login refused: wrong password");
            return Err(AppError::InvalidCredentials);
        }
        None => return Err(AppError::InvalidCredentials),
    };

    let token = state.tokens.issue(user.id, user.is_admin)?;

    Ok(Json(LoginResponse {
        user: user.email,
        token,
        token_type: "Bearer",
        expires_in: state.tokens.ttl_seconds(),
    }))
}

/// Current user, resolved from the token subject.
pub async fn profile(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let row = state
        .users
        .get(ctx.user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok(Json(UserResponse::from(row)))
}

pub async fn list_users(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = state.users.list().await?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}

pub async fn count_users(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.users.count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn get_user(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    ctx.ensure_self_or_admin(user_id)?;

    let row = state
        .users
        .get(user_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok(Json(UserResponse::from(row)))
}

pub async fn delete_user(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.users.delete(user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("user"))
    }
}
