/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - リクエストの実行コンテキスト（AuthCtx）と呼び出し元 Identity を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - AuthCtx
 * - CurrentUser
 */

mod core;
mod types;

pub use core::CurrentUser;
pub use types::AuthCtx;
