/*
 * Responsibility
 * - /products handlers (catalog reads, admin writes)
 * - A product must point at an existing category; checked here before the insert
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::{
            products::{
                CreateProductRequest, ListProductsQuery, ProductResponse, UpdateProductRequest,
            },
            users::CountResponse,
        },
        extractors::AdminCtx,
    },
    error::AppError,
    state::AppState,
};

const DEFAULT_FEATURED: i64 = 10;
const MAX_FEATURED: i64 = 100;

async fn ensure_category(state: &AppState, category_id: Uuid) -> Result<(), AppError> {
    match state.categories.get(category_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::invalid_request("invalid category")),
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let category_ids = query.category_ids().map_err(AppError::invalid_request)?;
    let rows = state.products.list(&category_ids).await?;
    Ok(Json(rows.into_iter().map(ProductResponse::from).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ProductResponse>, AppError> {
    let row = state
        .products
        .get(product_id)
        .await?
        .ok_or(AppError::NotFound("product"))?;

    Ok(Json(ProductResponse::from(row)))
}

pub async fn count_products(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.products.count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn featured_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let rows = state.products.featured(DEFAULT_FEATURED).await?;
    Ok(Json(rows.into_iter().map(ProductResponse::from).collect()))
}

pub async fn featured_products_limited(
    State(state): State<AppState>,
    Path(count): Path<i64>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    if !(1..=MAX_FEATURED).contains(&count) {
        return Err(AppError::invalid_request("count must be between 1 and 100"));
    }
    let rows = state.products.featured(count).await?;
    Ok(Json(rows.into_iter().map(ProductResponse::from).collect()))
}

pub async fn create_product(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;
    ensure_category(&state, req.category).await?;

    let row = state.products.create(req.into_new_product()).await?;
    tracing::info!(product_id = %row.id, "product created");

    Ok((StatusCode::CREATED, Json(ProductResponse::from(row))))
}

pub async fn update_product(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    req.validate().map_err(AppError::invalid_request)?;
    if let Some(category_id) = req.category {
        ensure_category(&state, category_id).await?;
    }

    let row = state
        .products
        .update(product_id, req.into_patch())
        .await?
        .ok_or(AppError::NotFound("product"))?;

    Ok(Json(ProductResponse::from(row)))
}

pub async fn delete_product(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.products.delete(product_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("product"))
    }
}
