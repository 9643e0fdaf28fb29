//! Caller identity extracted from the authenticating reverse proxy.
//!
//! Authentication itself happens upstream; by the time a request reaches this
//! service the proxy has verified the session and stamped the participant's
//! email into the `x-user-email` header. A request without the header never
//! went through the proxy and is rejected.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the verified participant email.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Verified identity of the calling participant.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Email address the upstream proxy authenticated.
    pub email: String,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|email| Self {
                email: email.to_owned(),
            })
            .ok_or_else(|| AppError::Unauthorized("unauthorized".into()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> Result<Identity, AppError> {
        let (mut parts, _body) = request.into_parts();
        Identity::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn header_yields_the_identity() {
        let request = Request::builder()
            .header(USER_EMAIL_HEADER, "ana@example.com")
            .body(())
            .unwrap();
        let identity = extract(request).await.unwrap();
        assert_eq!(identity.email, "ana@example.com");
    }

    #[tokio::test]
    async fn missing_or_blank_header_is_unauthorized() {
        let bare = Request::builder().body(()).unwrap();
        assert!(matches!(
            extract(bare).await.unwrap_err(),
            AppError::Unauthorized(_)
        ));

        let blank = Request::builder()
            .header(USER_EMAIL_HEADER, "   ")
            .body(())
            .unwrap();
        assert!(matches!(
            extract(blank).await.unwrap_err(),
            AppError::Unauthorized(_)
        ));
    }
}
