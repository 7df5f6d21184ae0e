use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use tracing::info;

use crate::SnipboxError;
use crate::middleware::flash::{FlashMessage, redirect_with_flash};
use crate::middleware::session::RequireUser;
use crate::server::router::SnipboxState;

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialsForm {
    fn into_parts(self) -> (String, String) {
        (
            self.username.unwrap_or_default(),
            self.password.unwrap_or_default(),
        )
    }
}

/// POST /signup -> create the account and sign it in.
pub async fn signup(
    State(state): State<SnipboxState>,
    jar: PrivateCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let (username, password) = form.into_parts();
    match state.auth.signup(&username, &password).await {
        Ok(user) => {
            let jar = state.auth.login(jar, &user);
            (jar, Redirect::to("/categories")).into_response()
        }
        Err(e) => back_to_entry(&state, jar, e),
    }
}

/// POST /login
pub async fn login(
    State(state): State<SnipboxState>,
    jar: PrivateCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let (username, password) = form.into_parts();
    match state.auth.authenticate(&username, &password).await {
        Ok(user) => {
            let jar = state.auth.login(jar, &user);
            (jar, Redirect::to("/categories")).into_response()
        }
        Err(e) => back_to_entry(&state, jar, e),
    }
}

/// GET /skip -> browse anonymously.
pub async fn skip() -> Redirect {
    Redirect::to("/categories")
}

/// GET /logout
pub async fn logout(
    State(state): State<SnipboxState>,
    RequireUser(user, jar): RequireUser,
) -> Response {
    info!(user_id = user.id, username = %user.username, "user logged out");
    let jar = state.auth.logout(jar);
    (jar, Redirect::to("/")).into_response()
}

fn back_to_entry(state: &SnipboxState, jar: PrivateCookieJar, err: SnipboxError) -> Response {
    if err.is_user_facing() {
        redirect_with_flash(
            jar,
            state.auth.cookies(),
            "/",
            FlashMessage::error(err.to_string()),
        )
    } else {
        (jar, err).into_response()
    }
}
