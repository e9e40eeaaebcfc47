/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - repositories, the auth gate, the token issuer
 * - Cheap to clone (everything inside is an Arc)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::repos::{
    CategoryRepo, OrderRepo, PgCategoryRepo, PgOrderRepo, PgProductRepo, PgUserRepo, ProductRepo,
    UserRepo,
};
use crate::services::auth::{AuthGate, TokenIssuer};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub products: Arc<dyn ProductRepo>,
    pub categories: Arc<dyn CategoryRepo>,
    pub orders: Arc<dyn OrderRepo>,
    pub auth: Arc<AuthGate>,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(db: PgPool, auth: Arc<AuthGate>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            users: Arc::new(PgUserRepo::new(db.clone())),
            products: Arc::new(PgProductRepo::new(db.clone())),
            categories: Arc::new(PgCategoryRepo::new(db.clone())),
            orders: Arc::new(PgOrderRepo::new(db)),
            auth,
            tokens,
        }
    }
}
