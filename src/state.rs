/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, tokens: TokenCodec, users: UserDirectory, policy: AccessPolicy
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - 起動時に 1 回だけ組み立て、以降は読み取りのみ (lock 不要)
 */
use std::sync::Arc;

use crate::services::auth::{AccessPolicy, TokenCodec, UserDirectory};

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub tokens: Arc<TokenCodec>,
    pub users: Arc<dyn UserDirectory>,
    pub policy: Arc<AccessPolicy>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("users", &self.users.backend_name())
            .field("policy", &self.policy)
            .finish()
    }
}

impl AppState {
    pub fn new(
        db: sqlx::PgPool,
        tokens: Arc<TokenCodec>,
        users: Arc<dyn UserDirectory>,
        policy: Arc<AccessPolicy>,
    ) -> Self {
        Self {
            db,
            tokens,
            users,
            policy,
        }
    }
}
