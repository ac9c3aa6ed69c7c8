//! operation 単位の認可 guard
//!
//! - route は必ず `operation()` 経由で登録する。ここで guard を掛けるので、素通りする経路が無い
//! - AccessPolicy に entry が無い operation は public として通す
//! - 拒否 (Unauthenticated / Forbidden) は handler を実行する前に AppError::Forbidden で返す

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::AccessPolicy;
use crate::state::AppState;

#[derive(Clone)]
struct OperationGuard {
    operation: &'static str,
    policy: Arc<AccessPolicy>,
}

/// Register `route` as the operation `name`, guarded by the process-wide policy.
pub fn operation(
    state: &AppState,
    name: &'static str,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    let guard = OperationGuard {
        operation: name,
        policy: state.policy.clone(),
    };
    route.route_layer(middleware::from_fn_with_state(guard, guard_middleware))
}

async fn guard_middleware(
    State(guard): State<OperationGuard>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // AuthCtx が無い (access middleware 未適用) 場合は匿名として判定する
    let identity = req
        .extensions()
        .get::<AuthCtx>()
        .and_then(AuthCtx::identity)
        .copied();

    match guard.policy.authorize(guard.operation, identity.as_ref()) {
        Ok(access) => {
            tracing::debug!(
                operation = guard.operation,
                ?access,
                user_id = identity.map(|i| i.id),
                "operation allowed"
            );
        }
        Err(denial) => {
            tracing::warn!(
                operation = guard.operation,
                reason = ?denial,
                user_id = identity.map(|i| i.id),
                role = identity.map(|i| i.role.as_str()),
                "operation denied"
            );
            return Err(denial.into());
        }
    }

    Ok(next.run(req).await)
}
