use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::SnipboxError;
use crate::middleware::flash::take_flash;
use crate::middleware::session::RequireUser;
use crate::server::router::SnipboxState;
use crate::service::auth::Identity;
use crate::types::views::{SnippetListView, ToggleSaveResponse};

/// GET /dashboard -> the caller's saved snippets.
pub async fn dashboard(
    State(state): State<SnipboxState>,
    RequireUser(user, jar): RequireUser,
) -> Result<(PrivateCookieJar, Json<SnippetListView>), SnipboxError> {
    let snippets = state.catalog.saved_snippets(&user).await?;
    let (jar, flash) = take_flash(jar, state.auth.cookies());
    let identity = Identity::User(user);
    Ok((
        jar,
        Json(SnippetListView {
            is_owner: state.auth.is_owner(&identity),
            username: identity.username().unwrap_or_default().to_owned(),
            snippets,
            flash,
        }),
    ))
}

/// POST /save_snippet/{id} -> flip the bookmark, answering with the action taken.
pub async fn save_snippet(
    State(state): State<SnipboxState>,
    RequireUser(user, _jar): RequireUser,
    Path(snippet_id): Path<i64>,
) -> Result<Json<ToggleSaveResponse>, SnipboxError> {
    let action = state.catalog.toggle_save(&user, snippet_id).await?;
    Ok(Json(ToggleSaveResponse {
        success: true,
        action,
    }))
}
