/*
 * Responsibility
 * - Public surface of the middleware layer
 * - Each module exposes `apply(router, ...)` so app.rs only decides the order
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
