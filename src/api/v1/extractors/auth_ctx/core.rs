use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::services::auth::Identity;

use super::AuthCtx;

/// Handler で、呼び出し元の Identity を受け取るための extractor
///
/// - access middleware が AuthCtx を request.extensions() に insert 済みである前提
/// - guard が匿名を弾いた後の operation でのみ使う。identity が無ければ panic (配線ミス)
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(*auth_ctx(parts).current()))
    }
}

/// 匿名でも構わない handler 用。middleware が入れた AuthCtx をそのまま返す
impl<S> FromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(auth_ctx(parts).clone())
    }
}

fn auth_ctx(parts: &Parts) -> &AuthCtx {
    match parts.extensions.get::<AuthCtx>() {
        Some(ctx) => ctx,
        None => panic!("AuthCtx not found: access middleware is not applied to this route"),
    }
}
