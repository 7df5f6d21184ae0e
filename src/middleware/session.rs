use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::db::models::User;
use crate::error::SnipboxError;
use crate::middleware::flash::{FlashMessage, redirect_with_flash};
use crate::server::router::SnipboxState;
use crate::service::auth::Identity;

const LOGIN_REQUIRED_MESSAGE: &str = "You need to log in to see this page, pal!";

/// Identity of the caller, anonymous or not, plus the jar it was read from.
pub struct CurrentIdentity(pub Identity, pub PrivateCookieJar);

impl FromRequestParts<SnipboxState> for CurrentIdentity {
    type Rejection = SnipboxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SnipboxState,
    ) -> Result<Self, Self::Rejection> {
        let jar = match <PrivateCookieJar as FromRequestParts<SnipboxState>>::from_request_parts(
            parts, state,
        )
        .await
        {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        let identity = state.auth.current_identity(&jar).await?;
        Ok(Self(identity, jar))
    }
}

/// Authenticated caller. Anonymous requests are sent back to the entry page.
pub struct RequireUser(pub User, pub PrivateCookieJar);

impl FromRequestParts<SnipboxState> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SnipboxState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentIdentity(identity, jar) = CurrentIdentity::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        match identity {
            Identity::User(user) => Ok(Self(user, jar)),
            Identity::Anonymous => Err(redirect_with_flash(
                jar,
                state.auth.cookies(),
                "/",
                FlashMessage::error(LOGIN_REQUIRED_MESSAGE),
            )),
        }
    }
}
