pub mod admin;
pub mod auth;
pub mod pages;
pub mod saved;

use axum::response::Response;
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::middleware::cookies::CookieOptions;
use crate::middleware::flash::{FlashMessage, redirect_with_flash};

const OWNER_ONLY_MESSAGE: &str = "Whoa there! That's a super-secret page only for the owner!";

/// Page-style answer to a non-owner hitting an owner route.
fn owner_only_redirect(jar: PrivateCookieJar, cookies: CookieOptions) -> Response {
    redirect_with_flash(
        jar,
        cookies,
        "/categories",
        FlashMessage::error(OWNER_ONLY_MESSAGE),
    )
}
