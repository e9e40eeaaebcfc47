/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the authenticated identity (AuthCtx) to handlers
 * - axum glue lives in core, the type itself in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor (any authenticated caller)
 * - AdminCtx (authenticated caller with isAdmin)
 */

mod core;
mod types;

pub use self::core::{AdminCtx, AuthCtxExtractor};
pub use self::types::AuthCtx;
