use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Attributes shared by every cookie the server sets.
#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub secure: bool,
}

impl CookieOptions {
    pub fn new(insecure_cookie: bool) -> Self {
        Self {
            secure: !insecure_cookie,
        }
    }

    /// Build a cookie scoped to the whole site. `None` makes it a browser-session cookie.
    pub fn build(&self, name: &str, value: String, max_age: Option<Duration>) -> Cookie<'static> {
        let mut builder = Cookie::build(Cookie::new(name.to_string(), value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax);
        if let Some(max_age) = max_age {
            builder = builder.max_age(max_age);
        }
        builder.build()
    }

    /// Removal cookie; path must match the one used in `build`.
    pub fn clear(&self, name: &str) -> Cookie<'static> {
        Cookie::build(Cookie::new(name.to_string(), ""))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }
}
