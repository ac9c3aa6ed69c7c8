//! credential 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <token>`（無ければ `x-jwt: <token>`）から credential を取り出す
//! - TokenCodec で検証し、subject id から UserDirectory で Identity を引く
//! - ここではリクエストを拒否しない。credential が無い・壊れている・ユーザーが居ない場合は
//!   匿名 (identity なし) として次へ流す。拒否するかどうかは guard が operation ごとに決める

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::services::auth::{Identity, TokenCodec, UserDirectory};
use crate::state::AppState;

pub const X_JWT: HeaderName = HeaderName::from_static("x-jwt");

/// `/api/v1/*` に AuthCtx の解決を掛ける。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes(&state);
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let identity = resolve_identity(&state.tokens, state.users.as_ref(), req.headers()).await;

    // middleware → guard / extractor への受け渡し。1 リクエストにつき 1 回だけ
    let previous = req.extensions_mut().insert(AuthCtx::new(identity));
    debug_assert!(previous.is_none(), "AuthCtx resolved twice for one request");

    next.run(req).await
}

/// Pull the raw credential out of the request headers.
pub fn extract_credential(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim());

    bearer
        .or_else(|| {
            headers
                .get(X_JWT)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
        })
        .filter(|token| !token.is_empty())
}

/// Credential → Identity. Every failure collapses to `None`.
pub async fn resolve_identity(
    tokens: &TokenCodec,
    users: &dyn UserDirectory,
    headers: &HeaderMap,
) -> Option<Identity> {
    let credential = extract_credential(headers)?;

    // invalid / tampered は区別せず匿名扱い (理由はログにだけ残す)
    let subject_id = match tokens.verify(credential) {
        Ok(id) => id,
        Err(err) => {
            tracing::debug!(error = %err, "credential rejected, continuing as anonymous");
            return None;
        }
    };

    match users.find_identity(subject_id).await {
        Ok(Some(identity)) => Some(identity),
        Ok(None) => {
            tracing::debug!(user_id = subject_id, "credential subject has no user");
            None
        }
        Err(err) => {
            tracing::warn!(
                user_id = subject_id,
                backend = users.backend_name(),
                error = ?err,
                "user lookup failed, continuing as anonymous"
            );
            None
        }
    }
}
