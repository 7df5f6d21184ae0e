use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::SnipboxError;
use crate::middleware::flash::take_flash;
use crate::middleware::session::CurrentIdentity;
use crate::server::router::SnipboxState;
use crate::types::views::{CategoriesView, CategoryView, EntryView, SnippetEntry};

/// GET / -> entry page, or straight to the catalog when already signed in.
pub async fn index(
    State(state): State<SnipboxState>,
    CurrentIdentity(identity, jar): CurrentIdentity,
) -> Response {
    if identity.is_authenticated() {
        return (jar, Redirect::to("/categories")).into_response();
    }
    let (jar, flash) = take_flash(jar, state.auth.cookies());
    (jar, Json(EntryView { flash })).into_response()
}

/// GET /categories
pub async fn categories(
    State(state): State<SnipboxState>,
    CurrentIdentity(identity, jar): CurrentIdentity,
) -> Result<(PrivateCookieJar, Json<CategoriesView>), SnipboxError> {
    let categories = state.catalog.list_categories().await?;
    let (jar, flash) = take_flash(jar, state.auth.cookies());
    Ok((
        jar,
        Json(CategoriesView {
            categories,
            username: identity.username().map(str::to_owned),
            is_owner: state.auth.is_owner(&identity),
            flash,
        }),
    ))
}

/// GET /category/{name} -> snippets of one category, flagged when saved by the caller.
pub async fn category(
    State(state): State<SnipboxState>,
    CurrentIdentity(identity, jar): CurrentIdentity,
    Path(category_name): Path<String>,
) -> Result<(PrivateCookieJar, Json<CategoryView>), SnipboxError> {
    let snippets = state.catalog.list_by_category(&category_name).await?;
    let saved = match identity.user() {
        Some(user) => state.catalog.saved_ids(user).await?,
        None => Default::default(),
    };

    let mut saved_snippet_ids: Vec<i64> = saved.iter().copied().collect();
    saved_snippet_ids.sort_unstable();
    let snippets = snippets
        .into_iter()
        .map(|snippet| SnippetEntry {
            saved: saved.contains(&snippet.id),
            snippet,
        })
        .collect();

    let (jar, flash) = take_flash(jar, state.auth.cookies());
    Ok((
        jar,
        Json(CategoryView {
            category_name,
            snippets,
            saved_snippet_ids,
            is_owner: state.auth.is_owner(&identity),
            flash,
        }),
    ))
}
