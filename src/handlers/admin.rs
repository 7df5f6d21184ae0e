use axum::{
    Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::owner_only_redirect;
use crate::SnipboxError;
use crate::db::models::SnippetDraft;
use crate::middleware::flash::{FlashMessage, redirect_with_flash, take_flash};
use crate::middleware::session::RequireUser;
use crate::server::router::SnipboxState;
use crate::service::auth::Identity;
use crate::types::views::{DeleteSnippetResponse, SnippetListView};

#[derive(Debug, Deserialize)]
pub struct SnippetForm {
    pub category: Option<String>,
    pub title: Option<String>,
    pub code: Option<String>,
}

impl From<SnippetForm> for SnippetDraft {
    fn from(form: SnippetForm) -> Self {
        SnippetDraft::from_fields(form.category, form.title, form.code)
    }
}

/// GET /admin -> every snippet, owner only.
pub async fn admin_page(
    State(state): State<SnipboxState>,
    RequireUser(user, jar): RequireUser,
) -> Response {
    let identity = Identity::User(user);
    match state.catalog.list_all(&identity).await {
        Ok(snippets) => {
            let (jar, flash) = take_flash(jar, state.auth.cookies());
            let view = SnippetListView {
                username: identity.username().unwrap_or_default().to_owned(),
                snippets,
                is_owner: true,
                flash,
            };
            (jar, Json(view)).into_response()
        }
        Err(SnipboxError::PermissionDenied) => owner_only_redirect(jar, state.auth.cookies()),
        Err(e) => (jar, e).into_response(),
    }
}

/// POST /admin/add
pub async fn admin_add(
    State(state): State<SnipboxState>,
    RequireUser(user, jar): RequireUser,
    Form(form): Form<SnippetForm>,
) -> Response {
    let cookies = state.auth.cookies();
    match state
        .catalog
        .create(&Identity::User(user), form.into())
        .await
    {
        Ok(_) => redirect_with_flash(
            jar,
            cookies,
            "/admin",
            FlashMessage::success("BOOM! New code snippet added!"),
        ),
        Err(SnipboxError::PermissionDenied) => owner_only_redirect(jar, cookies),
        Err(e @ SnipboxError::InvalidInput(_)) => {
            redirect_with_flash(jar, cookies, "/admin", FlashMessage::error(e.to_string()))
        }
        Err(e) => (jar, e).into_response(),
    }
}

/// POST /admin/delete/{id} -> JSON outcome; 403 for non-owners, 404 for unknown ids.
pub async fn admin_delete(
    State(state): State<SnipboxState>,
    RequireUser(user, _jar): RequireUser,
    Path(snippet_id): Path<i64>,
) -> Result<Json<DeleteSnippetResponse>, SnipboxError> {
    state
        .catalog
        .delete(&Identity::User(user), snippet_id)
        .await?;
    Ok(Json(DeleteSnippetResponse {
        success: true,
        snippet_id,
        message: "ZAP! Snippet deleted.".to_string(),
    }))
}

/// POST /admin/update/{id} -> overwrite all fields. An unknown id aborts with 404.
pub async fn admin_update(
    State(state): State<SnipboxState>,
    RequireUser(user, jar): RequireUser,
    Path(snippet_id): Path<i64>,
    Form(form): Form<SnippetForm>,
) -> Response {
    let cookies = state.auth.cookies();
    match state
        .catalog
        .update(&Identity::User(user), snippet_id, form.into())
        .await
    {
        Ok(_) => redirect_with_flash(
            jar,
            cookies,
            "/admin",
            FlashMessage::success("KACHOW! Snippet updated!"),
        ),
        Err(SnipboxError::PermissionDenied) => owner_only_redirect(jar, cookies),
        Err(e @ SnipboxError::InvalidInput(_)) => {
            redirect_with_flash(jar, cookies, "/admin", FlashMessage::error(e.to_string()))
        }
        Err(e) => (jar, e).into_response(),
    }
}
