/*
 * Responsibility
 * - handler が使う extractor の公開口
 */
pub mod auth_ctx;

pub use auth_ctx::{AuthCtx, CurrentUser};
