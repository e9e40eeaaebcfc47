/*
 * Responsibility
 * - v1 surface: routes() plus the modules handlers are built from
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;


pub use routes::routes;
