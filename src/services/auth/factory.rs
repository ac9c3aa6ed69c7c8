/// Factory: build the process-wide auth services from application `Config`.
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::services::auth::{AccessPolicy, OperationPolicy, TokenCodec};

/// Called once at wiring time, before the listener is bound.
pub fn build_token_codec(config: &AuthConfig) -> Result<Arc<TokenCodec>, AppError> {
    if config.token_secret.is_empty() {
        tracing::error!("token secret is empty");
        return Err(AppError::Internal);
    }

    Ok(Arc::new(TokenCodec::new(config.token_secret.as_bytes())))
}

pub fn build_access_policy(
    declarations: &[&[OperationPolicy]],
) -> Result<Arc<AccessPolicy>, AppError> {
    let policy = AccessPolicy::from_declarations(declarations.iter().flat_map(|t| t.iter()))
        .map_err(|e| {
            tracing::error!(error = %e, "invalid access policy declarations");
            AppError::Internal
        })?;

    Ok(Arc::new(policy))
}
