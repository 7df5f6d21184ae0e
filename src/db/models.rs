use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::SnipboxError;

pub const MAX_USERNAME_LEN: usize = 100;
pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Snippet {
    pub id: i64,
    pub category: String,
    pub title: String,
    pub code: String,
}

/// Field values for creating or overwriting a snippet.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SnippetDraft {
    pub category: String,
    pub title: String,
    pub code: String,
}

impl SnippetDraft {
    /// Build from optional form fields, trimming category and title. Validation
    /// happens when the draft is applied.
    pub fn from_fields(
        category: Option<String>,
        title: Option<String>,
        code: Option<String>,
    ) -> Self {
        Self {
            category: category.unwrap_or_default().trim().to_string(),
            title: title.unwrap_or_default().trim().to_string(),
            code: code.unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), SnipboxError> {
        require_text("category", &self.category, Some(MAX_CATEGORY_LEN))?;
        require_text("title", &self.title, Some(MAX_TITLE_LEN))?;
        if self.code.is_empty() {
            return Err(SnipboxError::InvalidInput("code is required".to_string()));
        }
        Ok(())
    }
}

/// Outcome of flipping a user's bookmark on a snippet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SaveAction {
    Saved,
    Unsaved,
}

pub(crate) fn require_text(
    field: &str,
    value: &str,
    max_len: Option<usize>,
) -> Result<(), SnipboxError> {
    if value.trim().is_empty() {
        return Err(SnipboxError::InvalidInput(format!("{field} is required")));
    }
    if let Some(max) = max_len
        && value.chars().count() > max
    {
        return Err(SnipboxError::InvalidInput(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
