/*
 * Responsibility
 * - Products request/response DTOs
 * - `?categories=a,b` parsing for the list endpoint
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::product_repo::{NewProduct, ProductPatch, ProductRow};

const MAX_STOCK: i32 = 255;

fn validate_price(price: f64) -> Result<(), &'static str> {
    if !price.is_finite() || price < 0.0 {
        return Err("price must be a non-negative number");
    }
    Ok(())
}

fn validate_stock(count: i32) -> Result<(), &'static str> {
    if !(0..=MAX_STOCK).contains(&count) {
        return Err("countInStock must be between 0 and 255");
    }
    Ok(())
}

fn validate_rating(rating: f64) -> Result<(), &'static str> {
    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err("rating must be between 0 and 5");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub rich_description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: f64,
    pub category: Uuid,
    pub count_in_stock: i32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub num_reviews: i32,
    #[serde(default)]
    pub is_featured: bool,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.description.trim().is_empty() {
            return Err("description is required");
        }
        validate_price(self.price)?;
        validate_stock(self.count_in_stock)?;
        validate_rating(self.rating)?;
        if self.num_reviews < 0 {
            return Err("numReviews cannot be negative");
        }
        Ok(())
    }

    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            rich_description: self.rich_description,
            image: self.image,
            brand: self.brand,
            price: self.price,
            category_id: self.category,
            count_in_stock: self.count_in_stock,
            rating: self.rating,
            num_reviews: self.num_reviews,
            is_featured: self.is_featured,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rich_description: Option<String>,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Uuid>,
    pub count_in_stock: Option<i32>,
    pub rating: Option<f64>,
    pub num_reviews: Option<i32>,
    pub is_featured: Option<bool>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(description) = &self.description
            && description.trim().is_empty()
        {
            return Err("description cannot be empty");
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(count) = self.count_in_stock {
            validate_stock(count)?;
        }
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        if let Some(n) = self.num_reviews
            && n < 0
        {
            return Err("numReviews cannot be negative");
        }
        Ok(())
    }

    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            description: self.description,
            rich_description: self.rich_description,
            image: self.image,
            brand: self.brand,
            price: self.price,
            category_id: self.category,
            count_in_stock: self.count_in_stock,
            rating: self.rating,
            num_reviews: self.num_reviews,
            is_featured: self.is_featured,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    /// Comma-separated category ids.
    pub categories: Option<String>,
}

impl ListProductsQuery {
    pub fn category_ids(&self) -> Result<Vec<Uuid>, &'static str> {
        let Some(raw) = &self.categories else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Uuid::parse_str(s).map_err(|_| "categories must be comma-separated ids"))
            .collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub image: String,
    pub brand: String,
    pub price: f64,
    pub category: Uuid,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for ProductResponse {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            rich_description: row.rich_description,
            image: row.image,
            brand: row.brand,
            price: row.price,
            category: row.category_id,
            count_in_stock: row.count_in_stock,
            rating: row.rating,
            num_reviews: row.num_reviews,
            is_featured: row.is_featured,
            created_at: row.created_at,
        }
    }
}
