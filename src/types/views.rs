//! JSON view models consumed by the presentation layer.

use serde::Serialize;

use crate::db::models::{SaveAction, Snippet};
use crate::middleware::flash::FlashMessage;

#[derive(Debug, Serialize)]
pub struct EntryView {
    pub flash: Option<FlashMessage>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesView {
    pub categories: Vec<String>,
    pub username: Option<String>,
    pub is_owner: bool,
    pub flash: Option<FlashMessage>,
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub category_name: String,
    pub snippets: Vec<SnippetEntry>,
    pub saved_snippet_ids: Vec<i64>,
    pub is_owner: bool,
    pub flash: Option<FlashMessage>,
}

/// A snippet plus whether the current user has it bookmarked.
#[derive(Debug, Serialize)]
pub struct SnippetEntry {
    #[serde(flatten)]
    pub snippet: Snippet,
    pub saved: bool,
}

/// Dashboard and admin pages: a flat list of snippets.
#[derive(Debug, Serialize)]
pub struct SnippetListView {
    pub username: String,
    pub snippets: Vec<Snippet>,
    pub is_owner: bool,
    pub flash: Option<FlashMessage>,
}

#[derive(Debug, Serialize)]
pub struct ToggleSaveResponse {
    pub success: bool,
    pub action: SaveAction,
}

#[derive(Debug, Serialize)]
pub struct DeleteSnippetResponse {
    pub success: bool,
    pub snippet_id: i64,
    pub message: String,
}
