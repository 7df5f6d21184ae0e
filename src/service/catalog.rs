use std::collections::HashSet;

use tracing::info;

use crate::db::SnippetStorage;
use crate::db::models::{SaveAction, Snippet, SnippetDraft, User};
use crate::error::SnipboxError;
use crate::service::auth::{AuthManager, Identity};

/// Snippet CRUD grouped by category. Owner-only calls take the caller's identity
/// and check it before touching the store.
#[derive(Clone)]
pub struct CatalogService {
    storage: SnippetStorage,
    auth: AuthManager,
}

impl CatalogService {
    pub fn new(storage: SnippetStorage, auth: AuthManager) -> Self {
        Self { storage, auth }
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, SnipboxError> {
        self.storage.list_categories().await
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Snippet>, SnipboxError> {
        self.storage.list_by_category(category).await
    }

    pub async fn get(&self, id: i64) -> Result<Snippet, SnipboxError> {
        self.storage.get_snippet(id).await
    }

    /// Every snippet, for the management page.
    pub async fn list_all(&self, identity: &Identity) -> Result<Vec<Snippet>, SnipboxError> {
        self.auth.ensure_owner(identity)?;
        self.storage.list_all().await
    }

    pub async fn create(
        &self,
        identity: &Identity,
        draft: SnippetDraft,
    ) -> Result<Snippet, SnipboxError> {
        self.auth.ensure_owner(identity)?;
        draft.validate()?;
        let snippet = self.storage.insert_snippet(&draft).await?;
        info!(snippet_id = snippet.id, category = %snippet.category, "snippet added");
        Ok(snippet)
    }

    pub async fn update(
        &self,
        identity: &Identity,
        id: i64,
        draft: SnippetDraft,
    ) -> Result<Snippet, SnipboxError> {
        self.auth.ensure_owner(identity)?;
        // a missing id is a 404 even when the form is also invalid
        self.storage.get_snippet(id).await?;
        draft.validate()?;
        let snippet = self.storage.update_snippet(id, &draft).await?;
        info!(snippet_id = id, category = %snippet.category, "snippet updated");
        Ok(snippet)
    }

    pub async fn delete(&self, identity: &Identity, id: i64) -> Result<(), SnipboxError> {
        self.auth.ensure_owner(identity)?;
        self.storage.delete_snippet(id).await?;
        info!(snippet_id = id, "snippet deleted");
        Ok(())
    }

    /// Flip `user`'s bookmark on `snippet_id`; each call changes state exactly once.
    pub async fn toggle_save(
        &self,
        user: &User,
        snippet_id: i64,
    ) -> Result<SaveAction, SnipboxError> {
        self.storage.toggle_saved(user.id, snippet_id).await
    }

    pub async fn saved_ids(&self, user: &User) -> Result<HashSet<i64>, SnipboxError> {
        self.storage.saved_ids(user.id).await
    }

    pub async fn saved_snippets(&self, user: &User) -> Result<Vec<Snippet>, SnipboxError> {
        self.storage.saved_snippets(user.id).await
    }
}
