/*
 * Responsibility
 * - Extractors handlers use to read request-scoped data set by middleware
 */
pub mod auth_ctx;

pub use auth_ctx::{AdminCtx, AuthCtx, AuthCtxExtractor};
