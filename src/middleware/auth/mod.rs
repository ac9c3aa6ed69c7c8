/*
 * Responsibility
 * - access: credential → AuthCtx (全リクエスト、拒否しない)
 * - guard: operation ごとの AccessPolicy 判定 (拒否はここだけ)
 */
pub mod access;
pub mod guard;

pub use guard::operation;
