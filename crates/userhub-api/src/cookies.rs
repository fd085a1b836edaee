//! Session cookie construction.
//!
//! The session token travels only in an `HttpOnly`, `SameSite=Strict`
//! cookie. Clearing is done by re-setting the cookie with an expiry at
//! the epoch.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

/// Build the session cookie set on successful login.
pub fn session_cookie(name: &str, token: &str, expires_at: DateTime<Utc>) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_owned(), token.to_owned());
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_expires(to_offset(expires_at));
    cookie
}

/// Build an already-expired cookie that clears the session cookie.
pub fn clear_session_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_owned(), String::new());
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
    cookie
}

fn to_offset(ts: DateTime<Utc>) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(ts.timestamp()).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
