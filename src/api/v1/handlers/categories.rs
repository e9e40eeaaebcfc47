/*
 * Responsibility
 * - /categories handlers
 * - Reads are public (exempt at the gate), writes need an admin
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::categories::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
        extractors::AdminCtx,
    },
    error::AppError,
    state::AppState,
};

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let rows = state.categories.list().await?;
    Ok(Json(rows.into_iter().map(CategoryResponse::from).collect()))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<CategoryResponse>, AppError> {
    let row = state
        .categories
        .get(category_id)
        .await?
        .ok_or(AppError::NotFound("category"))?;

    Ok(Json(CategoryResponse::from(row)))
}

pub async fn create_category(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let row = state
        .categories
        .create(req.name.trim(), req.icon.as_deref(), req.color.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(row))))
}

pub async fn update_category(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let row = state
        .categories
        .update(
            category_id,
            req.name.as_deref().map(str::trim),
            req.icon.as_deref(),
            req.color.as_deref(),
        )
        .await?
        .ok_or(AppError::NotFound("category"))?;

    Ok(Json(CategoryResponse::from(row)))
}

/// 409 while products still reference the category.
pub async fn delete_category(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.categories.delete(category_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("category"))
    }
}
