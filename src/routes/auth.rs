//! Owner identification.
//!
//! The service sits behind an auth proxy that resolves the signed-in user
//! and forwards their id in `X-User-Id`. Requests without it are rejected.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::http::{HeaderMap, StatusCode};
use designer::net::USER_ID_HEADER;

const MAX_OWNER_ID_LEN: usize = 128;

/// Id of the user the request acts for. Use as a handler parameter to
/// require an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerId(pub String);

impl OwnerId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub(crate) fn owner_from_headers(headers: &HeaderMap) -> Option<OwnerId> {
    let raw = headers.get(USER_ID_HEADER)?.to_str().map_or("", str::trim);
    if raw.is_empty() || raw.len() > MAX_OWNER_ID_LEN {
        return None;
    }
    Some(OwnerId(raw.to_owned()))
}

impl<S> axum::extract::FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, _state: &S) -> Result<Self, Self::Rejection> {
        owner_from_headers(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)
    }
}
