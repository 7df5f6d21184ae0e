//! One-shot messages carried to the next page view in a private cookie.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::{Deserialize, Serialize};
use time::Duration;
use tracing::debug;

use super::cookies::CookieOptions;

const FLASH_COOKIE: &str = "snipbox_flash";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Error,
    Success,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }
}

pub fn push_flash(
    jar: PrivateCookieJar,
    cookies: CookieOptions,
    flash: FlashMessage,
) -> PrivateCookieJar {
    match serde_json::to_string(&flash) {
        Ok(value) => jar.add(cookies.build(FLASH_COOKIE, value, Some(Duration::minutes(5)))),
        Err(e) => {
            debug!(error = %e, "dropping unserializable flash message");
            jar
        }
    }
}

/// Read and clear the pending flash message, if any.
pub fn take_flash(
    jar: PrivateCookieJar,
    cookies: CookieOptions,
) -> (PrivateCookieJar, Option<FlashMessage>) {
    let Some(raw) = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };
    let flash = serde_json::from_str(&raw).ok();
    (jar.remove(cookies.clear(FLASH_COOKIE)), flash)
}

/// 303 to `to`, carrying `flash` for the next page.
pub fn redirect_with_flash(
    jar: PrivateCookieJar,
    cookies: CookieOptions,
    to: &str,
    flash: FlashMessage,
) -> Response {
    let jar = push_flash(jar, cookies, flash);
    (jar, Redirect::to(to)).into_response()
}
