pub mod category_repo;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod order_repo;
pub mod product_repo;
pub mod user_repo;

pub use category_repo::{CategoryRepo, PgCategoryRepo};
pub use order_repo::{OrderRepo, PgOrderRepo};
pub use product_repo::{PgProductRepo, ProductRepo};
pub use user_repo::{PgUserRepo, UserRepo};
