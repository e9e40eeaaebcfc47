/*
 * Responsibility
 * - /orders handlers
 * - The owner always comes from the token, never from the body
 * - Totals are priced from the catalog at creation time
 */
use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::{
            orders::{
                CreateOrderRequest, DEFAULT_STATUS, OrderResponse, TotalSalesResponse,
                UpdateOrderStatusRequest,
            },
            users::CountResponse,
        },
        extractors::{AdminCtx, AuthCtxExtractor},
    },
    error::AppError,
    repos::order_repo::{NewOrder, NewOrderItem, Order},
    state::AppState,
};

fn to_responses(orders: Vec<Order>) -> Vec<OrderResponse> {
    orders.into_iter().map(OrderResponse::from).collect()
}

pub async fn create_order(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let product_ids: Vec<Uuid> = req.order_items.iter().map(|item| item.product).collect();
    let prices: HashMap<Uuid, f64> = state
        .products
        .get_many(&product_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p.price))
        .collect();

    let mut total_price = 0.0;
    let mut items = Vec::with_capacity(req.order_items.len());
    for item in &req.order_items {
        let Some(price) = prices.get(&item.product) else {
            return Err(AppError::invalid_request(format!(
                "unknown product {}",
                item.product
            )));
        };
        total_price += price * f64::from(item.quantity);
        items.push(NewOrderItem {
            product_id: item.product,
            quantity: item.quantity,
        });
    }

    let order = state
        .orders
        .create(NewOrder {
            user_id: ctx.user_id,
            items,
            shipping_address1: req.shipping_address1,
            shipping_address2: req.shipping_address2,
            city: req.city,
            zip: req.zip,
            country: req.country,
            phone: req.phone,
            status: DEFAULT_STATUS.to_string(),
            total_price,
        })
        .await?;

    tracing::info!(order_id = %order.order.id, user_id = %ctx.user_id, total_price, "order placed");
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

pub async fn list_orders(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state.orders.list().await?;
    Ok(Json(to_responses(orders)))
}

pub async fn get_order(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state
        .orders
        .get(order_id)
        .await?
        .ok_or(AppError::NotFound("order"))?;

    ctx.ensure_self_or_admin(order.order.user_id)?;
    Ok(Json(OrderResponse::from(order)))
}

pub async fn user_orders(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    ctx.ensure_self_or_admin(user_id)?;

    let orders = state.orders.list_by_user(user_id).await?;
    Ok(Json(to_responses(orders)))
}

pub async fn update_order_status(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let order = state
        .orders
        .update_status(order_id, &req.status)
        .await?
        .ok_or(AppError::NotFound("order"))?;

    Ok(Json(OrderResponse::from(order)))
}

pub async fn delete_order(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.orders.delete(order_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("order"))
    }
}

pub async fn total_sales(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
) -> Result<Json<TotalSalesResponse>, AppError> {
    let total_sales = state.orders.total_sales().await?;
    Ok(Json(TotalSalesResponse { total_sales }))
}

pub async fn count_orders(
    AdminCtx(_admin): AdminCtx,
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, AppError> {
    let count = state.orders.count().await?;
    Ok(Json(CountResponse { count }))
}
