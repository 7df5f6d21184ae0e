//! SQL DDL for initializing the snippet store.

/// SQLite schema with:
/// - `users.username` UNIQUE, the store-level guard against duplicate signups
/// - `saved_snippets` keyed by `(user_id, snippet_id)`, cascading from both sides
/// - an index on `snippets.category` for category pages
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS snippets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    title TEXT NOT NULL,
    code TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS saved_snippets (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    snippet_id INTEGER NOT NULL REFERENCES snippets(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, snippet_id)
);

CREATE INDEX IF NOT EXISTS idx_snippets_category ON snippets(category);

-- Reverse lookup for cascading removals.
CREATE INDEX IF NOT EXISTS idx_saved_snippets_snippet_id ON saved_snippets(snippet_id);
"#;
