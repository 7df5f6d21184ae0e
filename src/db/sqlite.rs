use crate::db::models::{SaveAction, Snippet, SnippetDraft, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::SnipboxError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct SnippetStorage {
    pool: SqlitePool,
}

impl SnippetStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url`, creating the file if needed, and apply the schema.
    pub async fn open(database_url: &str) -> Result<Self, SnipboxError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let mut pool_opts = SqlitePoolOptions::new();
        // each in-memory connection is its own database
        if database_url.contains(":memory:") {
            pool_opts = pool_opts
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), SnipboxError> {
        // execute multiple statements one by one (sqlx::query runs a single statement)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ---- users ----

    /// Insert a user. A taken username is a `UsernameTaken` error and leaves no row behind.
    /// The insert is the first statement so the transaction takes the write lock up front.
    pub async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, SnipboxError> {
        let mut tx = self.pool.begin().await?;

        let user: User = sqlx::query_as(
            "INSERT INTO users (username, password_hash) VALUES (?, ?)
             RETURNING id, username, password_hash",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                SnipboxError::UsernameTaken(username.to_string())
            }
            other => other.into(),
        })?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, SnipboxError> {
        let user = sqlx::query_as("SELECT id, username, password_hash FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, SnipboxError> {
        let user = sqlx::query_as("SELECT id, username, password_hash FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // ---- snippets ----

    pub async fn list_categories(&self) -> Result<Vec<String>, SnipboxError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT category FROM snippets ORDER BY category")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(c,)| c).collect())
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Snippet>, SnipboxError> {
        let rows = sqlx::query_as(
            "SELECT id, category, title, code FROM snippets WHERE category = ? ORDER BY id",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_all(&self) -> Result<Vec<Snippet>, SnipboxError> {
        let rows = sqlx::query_as("SELECT id, category, title, code FROM snippets ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_snippet(&self, id: i64) -> Result<Snippet, SnipboxError> {
        sqlx::query_as("SELECT id, category, title, code FROM snippets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(SnipboxError::SnippetNotFound(id))
    }

    pub async fn insert_snippet(&self, draft: &SnippetDraft) -> Result<Snippet, SnipboxError> {
        let mut tx = self.pool.begin().await?;
        let snippet: Snippet = sqlx::query_as(
            "INSERT INTO snippets (category, title, code) VALUES (?, ?, ?)
             RETURNING id, category, title, code",
        )
        .bind(&draft.category)
        .bind(&draft.title)
        .bind(&draft.code)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(snippet)
    }

    /// Overwrite all fields of an existing snippet.
    pub async fn update_snippet(
        &self,
        id: i64,
        draft: &SnippetDraft,
    ) -> Result<Snippet, SnipboxError> {
        let mut tx = self.pool.begin().await?;
        let snippet: Snippet = sqlx::query_as(
            "UPDATE snippets SET category = ?, title = ?, code = ? WHERE id = ?
             RETURNING id, category, title, code",
        )
        .bind(&draft.category)
        .bind(&draft.title)
        .bind(&draft.code)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(SnipboxError::SnippetNotFound(id))?;
        tx.commit().await?;
        Ok(snippet)
    }

    /// Remove a snippet together with every saved-snippet row pointing at it.
    pub async fn delete_snippet(&self, id: i64) -> Result<(), SnipboxError> {
        let mut tx = self.pool.begin().await?;
        let unsaved = sqlx::query("DELETE FROM saved_snippets WHERE snippet_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let deleted = sqlx::query("DELETE FROM snippets WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(SnipboxError::SnippetNotFound(id));
        }
        tx.commit().await?;
        debug!(snippet_id = id, unsaved, "snippet removed from saved sets");
        Ok(())
    }

    // ---- saved snippets ----

    /// Flip the `(user_id, snippet_id)` pair in one transaction. The `DELETE` runs
    /// first so the write lock is held before any read.
    pub async fn toggle_saved(
        &self,
        user_id: i64,
        snippet_id: i64,
    ) -> Result<SaveAction, SnipboxError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM saved_snippets WHERE user_id = ? AND snippet_id = ?")
            .bind(user_id)
            .bind(snippet_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let action = if removed > 0 {
            SaveAction::Unsaved
        } else {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM snippets WHERE id = ?")
                .bind(snippet_id)
                .fetch_optional(&mut *tx)
                .await?;
            if exists.is_none() {
                return Err(SnipboxError::SnippetNotFound(snippet_id));
            }
            sqlx::query("INSERT INTO saved_snippets (user_id, snippet_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(snippet_id)
                .execute(&mut *tx)
                .await?;
            SaveAction::Saved
        };

        tx.commit().await?;
        Ok(action)
    }

    pub async fn saved_ids(&self, user_id: i64) -> Result<HashSet<i64>, SnipboxError> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT snippet_id FROM saved_snippets WHERE user_id = ?")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    pub async fn saved_snippets(&self, user_id: i64) -> Result<Vec<Snippet>, SnipboxError> {
        let rows = sqlx::query_as(
            r#"SELECT s.id, s.category, s.title, s.code
               FROM snippets s
               JOIN saved_snippets ss ON ss.snippet_id = s.id
               WHERE ss.user_id = ?
               ORDER BY s.id"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
