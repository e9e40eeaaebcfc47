/*
 * Responsibility
 * - URL layout of the REST API (mounted under the configured prefix)
 * - Which calls skip the token is decided by the gate's exemption rules, not here
 * - Admin / ownership checks live in the handlers' extractors
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    categories::{create_category, delete_category, get_category, list_categories, update_category},
    orders::{
        count_orders, create_order, delete_order, get_order, list_orders, total_sales,
        update_order_status, user_orders,
    },
    products::{
        count_products, create_product, delete_product, featured_products,
        featured_products_limited, get_product, list_products, update_product,
    },
    users::{
        count_users, create_user, delete_user, get_user, list_users, login, profile, register,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        // users
        .route("/users", get(list_users).post(create_user))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/perfil", get(profile))
        .route("/users/get/count", get(count_users))
        .route("/users/{user_id}", get(get_user).delete(delete_user))
        // categories
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{category_id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        // products
        .route("/products", get(list_products).post(create_product))
        .route("/products/get/count", get(count_products))
        .route("/products/get/featured", get(featured_products))
        .route("/products/get/featured/{count}", get(featured_products_limited))
        .route(
            "/products/{product_id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        // orders
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/get/totalsales", get(total_sales))
        .route("/orders/get/count", get(count_orders))
        .route("/orders/get/userorders/{user_id}", get(user_orders))
        .route(
            "/orders/{order_id}",
            get(get_order)
                .put(update_order_status)
                .delete(delete_order),
        )
}
