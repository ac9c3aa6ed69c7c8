//! Lookup interface the auth pipeline uses to turn a subject id into an `Identity`.
use async_trait::async_trait;

use crate::repos::error::RepoError;
use crate::services::auth::identity::Identity;

/// User lookup by id.
///
/// Implementations must be safe to share across requests (stored as `Arc<dyn UserDirectory>`).
/// `Ok(None)` means "no such user"; `Err(_)` is a backend failure.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    // Returns the directory backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn find_identity(&self, user_id: i64) -> Result<Option<Identity>, RepoError>;
}
