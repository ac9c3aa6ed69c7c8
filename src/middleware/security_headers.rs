//! Security-related response headers for browser clients.
//!
//! Applied at the Router level. Handlers may still set their own value for any of
//! these headers; existing values are never overwritten.

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

const SECURITY_HEADERS: &[(&str, &str)] = &[
    // Clickjacking protection (legacy + modern)
    ("x-frame-options", "DENY"),
    ("content-security-policy", "frame-ancestors 'none'"),
    // Prevent MIME sniffing
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "no-referrer"),
    ("permissions-policy", "camera=(), microphone=(), geolocation=()"),
    // Responses carry per-user data once a credential is involved.
    ("cache-control", "no-store"),
];

/// Apply common security headers to all responses.
pub fn apply(router: Router) -> Router {
    SECURITY_HEADERS
        .iter()
        .fold(router, |router, &(name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, header},
        response::IntoResponse,
        routing::get,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn headers_are_added_without_overwriting() {
        let app = apply(Router::new().route(
            "/",
            get(|| async { ([(header::CACHE_CONTROL, "max-age=60")], "ok").into_response() }),
        ));

        let res = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.headers()["x-frame-options"], "DENY");
        assert_eq!(res.headers()["x-content-type-options"], "nosniff");
        assert_eq!(res.headers()[header::CACHE_CONTROL], "max-age=60");
    }
}
