//! # Sessions
//!
//! Every visitor is identified by an opaque random token kept in the
//! `anika_session` cookie. The token is the `user_id` on every stored record.
//! There is no login: a visitor who loses the cookie can get their identity
//! back by presenting their saved base color.

use axum::{
    extract::Request,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::Response,
};
use tracing::debug;

pub const SESSION_COOKIE: &str = "anika_session";

/// The session's user id, inserted as a request extension by [`ensure_user_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

/// 128 random bits as 32 lowercase hex digits.
pub fn new_user_id() -> String {
    let bytes: [u8; 16] = rand::random();

    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

pub fn read_session(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
        .filter(|token| is_valid_token(token))
}

fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && token.len() <= 64 && token.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn session_cookie(user_id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={user_id}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .ok()
}

/// Attaches a [`UserId`] to the request, minting one when the cookie is
/// missing. A handler that sets its own cookie keeps it.
pub async fn ensure_user_id(mut request: Request, next: Next) -> Response {
    let existing = read_session(request.headers());
    let fresh = existing.is_none();

    let user_id = existing.unwrap_or_else(|| {
        let user_id = new_user_id();
        debug!("Issuing new session {user_id}");
        user_id
    });

    request.extensions_mut().insert(UserId(user_id.clone()));
    let mut response = next.run(request).await;

    if fresh && !response.headers().contains_key(SET_COOKIE) {
        if let Some(cookie) = session_cookie(&user_id) {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_new_user_id() {
        let user_id = new_user_id();

        assert_eq!(user_id.len(), 32);
        assert!(is_valid_token(&user_id));
        assert_ne!(user_id, new_user_id());
    }

    #[test]
    fn test_read_session() {
        assert_eq!(
            read_session(&headers("theme=dark; anika_session=00ff; other=1")).as_deref(),
            Some("00ff")
        );
        assert_eq!(read_session(&headers("theme=dark")), None);
        assert_eq!(read_session(&HeaderMap::new()), None);
    }

    #[test]
    fn test_read_session_rejects_garbage() {
        assert_eq!(read_session(&headers("anika_session=")), None);
        assert_eq!(read_session(&headers("anika_session=not-hex")), None);
    }

    #[test]
    fn test_session_cookie() {
        let cookie = session_cookie("abc123").unwrap();

        assert_eq!(
            cookie.to_str().unwrap(),
            "anika_session=abc123; Path=/; HttpOnly; SameSite=Lax"
        );
    }
}
