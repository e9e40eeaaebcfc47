/*
 * Responsibility
 * - Orders request/response DTOs
 * - The client never sends a price: totals are computed from the catalog
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::order_repo::{Order, OrderItemRow};

pub const DEFAULT_STATUS: &str = "Pending";
pub const STATUSES: [&str; 4] = ["Pending", "Shipped", "Delivered", "Cancelled"];

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_items: Vec<OrderItemRequest>,
    pub shipping_address1: String,
    pub shipping_address2: Option<String>,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.order_items.is_empty() {
            return Err("orderItems cannot be empty");
        }
        if self.order_items.iter().any(|item| item.quantity < 1) {
            return Err("quantity must be at least 1");
        }
        let required = [
            &self.shipping_address1,
            &self.city,
            &self.zip,
            &self.country,
            &self.phone,
        ];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err("shipping address, city, zip, country and phone are required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

impl UpdateOrderStatusRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !STATUSES.contains(&self.status.as_str()) {
            return Err("status must be one of Pending, Shipped, Delivered, Cancelled");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product: Uuid,
    pub quantity: i32,
}

impl From<OrderItemRow> for OrderItemResponse {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: row.id,
            product: row.product_id,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub user: Uuid,
    pub order_items: Vec<OrderItemResponse>,
    pub shipping_address1: String,
    pub shipping_address2: Option<String>,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub status: String,
    pub total_price: f64,
    pub date_ordered: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(Order { order, items }: Order) -> Self {
        Self {
            id: order.id,
            user: order.user_id,
            order_items: items.into_iter().map(OrderItemResponse::from).collect(),
            shipping_address1: order.shipping_address1,
            shipping_address2: order.shipping_address2,
            city: order.city,
            zip: order.zip,
            country: order.country,
            phone: order.phone,
            status: order.status,
            total_price: order.total_price,
            date_ordered: order.date_ordered,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSalesResponse {
    pub total_sales: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_needs_items_with_positive_quantity() {
        let mut req: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "orderItems": [{ "product": Uuid::new_v4(), "quantity": 2 }],
            "shippingAddress1": "Rua A, 1",
            "city": "Lisboa",
            "zip": "1000-001",
            "country": "PT",
            "phone": "+351 000"
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        req.order_items[0].quantity = 0;
        assert!(req.validate().is_err());

        req.order_items.clear();
        assert_eq!(req.validate(), Err("orderItems cannot be empty"));
    }

    #[test]
    fn only_known_statuses() {
        let ok = UpdateOrderStatusRequest {
            status: "Shipped".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = UpdateOrderStatusRequest {
            status: "Teleported".into(),
        };
        assert!(bad.validate().is_err());
    }
}
