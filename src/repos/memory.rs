//! In-memory repositories for handler and router tests.
//!
//! They mirror the Postgres implementations closely enough for HTTP-level tests:
//! unique emails, RESTRICT on categories in use, newest-first listings.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::category_repo::{CategoryRepo, CategoryRow};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::order_repo::{NewOrder, Order, OrderItemRow, OrderRepo, OrderRow};
use crate::repos::product_repo::{NewProduct, ProductPatch, ProductRepo, ProductRow};
use crate::repos::user_repo::{NewUser, UserRepo, UserRow};

#[derive(Default)]
pub struct MemoryUserRepo {
    rows: RwLock<Vec<UserRow>>,
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn list(&self) -> RepoResult<Vec<UserRow>> {
        Ok(self.rows.read().await.iter().rev().cloned().collect())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        Ok(self.rows.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: NewUser) -> RepoResult<UserRow> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(RepoError::Conflict);
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            phone: user.phone,
            is_admin: user.is_admin,
            street: user.street,
            apartment: user.apartment,
            zip: user.zip,
            city: user.city,
            country: user.country,
            created_at: Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok(rows.len() < before)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.rows.read().await.len() as i64)
    }
}

#[derive(Default)]
pub struct MemoryCategoryRepo {
    rows: RwLock<Vec<CategoryRow>>,
    // Categories still referenced by products (emulates the RESTRICT FK).
    in_use: RwLock<Vec<Uuid>>,
}

impl MemoryCategoryRepo {
    pub async fn mark_in_use(&self, id: Uuid) {
        self.in_use.write().await.push(id);
    }
}

#[async_trait]
impl CategoryRepo for MemoryCategoryRepo {
    async fn list(&self) -> RepoResult<Vec<CategoryRow>> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<CategoryRow>> {
        Ok(self.rows.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn create(
        &self,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> RepoResult<CategoryRow> {
        let row = CategoryRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            icon: icon.map(str::to_string),
            color: color.map(str::to_string),
        };
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> RepoResult<Option<CategoryRow>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = name {
            row.name = name.to_string();
        }
        if let Some(icon) = icon {
            row.icon = Some(icon.to_string());
        }
        if let Some(color) = color {
            row.color = Some(color.to_string());
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        if self.in_use.read().await.contains(&id) {
            return Err(RepoError::Conflict);
        }
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryProductRepo {
    rows: RwLock<Vec<ProductRow>>,
}

#[async_trait]
impl ProductRepo for MemoryProductRepo {
    async fn list(&self, category_ids: &[Uuid]) -> RepoResult<Vec<ProductRow>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|p| category_ids.is_empty() || category_ids.contains(&p.category_id))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<ProductRow>> {
        Ok(self.rows.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> RepoResult<Vec<ProductRow>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn create(&self, product: NewProduct) -> RepoResult<ProductRow> {
        let row = ProductRow {
            id: Uuid::new_v4(),
            name: product.name,
            description: product.description,
            rich_description: product.rich_description,
            image: product.image,
            brand: product.brand,
            price: product.price,
            category_id: product.category_id,
            count_in_stock: product.count_in_stock,
            rating: product.rating,
            num_reviews: product.num_reviews,
            is_featured: product.is_featured,
            created_at: Utc::now(),
        };
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: ProductPatch) -> RepoResult<Option<ProductRow>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(v) = patch.name {
            row.name = v;
        }
        if let Some(v) = patch.description {
            row.description = v;
        }
        if let Some(v) = patch.rich_description {
            row.rich_description = v;
        }
        if let Some(v) = patch.image {
            row.image = v;
        }
        if let Some(v) = patch.brand {
            row.brand = v;
        }
        if let Some(v) = patch.price {
            row.price = v;
        }
        if let Some(v) = patch.category_id {
            row.category_id = v;
        }
        if let Some(v) = patch.count_in_stock {
            row.count_in_stock = v;
        }
        if let Some(v) = patch.rating {
            row.rating = v;
        }
        if let Some(v) = patch.num_reviews {
            row.num_reviews = v;
        }
        if let Some(v) = patch.is_featured {
            row.is_featured = v;
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.rows.read().await.len() as i64)
    }

    async fn featured(&self, limit: i64) -> RepoResult<Vec<ProductRow>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|p| p.is_featured)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryOrderRepo {
    rows: RwLock<Vec<Order>>,
}

#[async_trait]
impl OrderRepo for MemoryOrderRepo {
    async fn list(&self) -> RepoResult<Vec<Order>> {
        Ok(self.rows.read().await.iter().rev().cloned().collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> RepoResult<Vec<Order>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|o| o.order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Order>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|o| o.order.id == id)
            .cloned())
    }

    async fn create(&self, order: NewOrder) -> RepoResult<Order> {
        let id = Uuid::new_v4();
        let items = order
            .items
            .into_iter()
            .map(|item| OrderItemRow {
                id: Uuid::new_v4(),
                order_id: id,
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect();
        let saved = Order {
            order: OrderRow {
                id,
                user_id: order.user_id,
                shipping_address1: order.shipping_address1,
                shipping_address2: order.shipping_address2,
                city: order.city,
                zip: order.zip,
                country: order.country,
                phone: order.phone,
                status: order.status,
                total_price: order.total_price,
                date_ordered: Utc::now(),
            },
            items,
        };
        self.rows.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn update_status(&self, id: Uuid, status: &str) -> RepoResult<Option<Order>> {
        let mut rows = self.rows.write().await;
        let Some(order) = rows.iter_mut().find(|o| o.order.id == id) else {
            return Ok(None);
        };
        order.order.status = status.to_string();
        Ok(Some(order.clone()))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|o| o.order.id != id);
        Ok(rows.len() < before)
    }

    async fn total_sales(&self) -> RepoResult<f64> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .map(|o| o.order.total_price)
            .sum())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.rows.read().await.len() as i64)
    }
}
