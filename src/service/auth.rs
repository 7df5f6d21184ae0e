use std::sync::Arc;

use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::{info, warn};

use crate::db::SnippetStorage;
use crate::db::models::{MAX_USERNAME_LEN, User, require_text};
use crate::error::SnipboxError;
use crate::middleware::cookies::CookieOptions;
use crate::service::password;

const SESSION_COOKIE: &str = "snipbox_session";

/// Who is making the current request.
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Anonymous,
    User(User),
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Anonymous => None,
            Identity::User(user) => Some(user),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user().map(|u| u.username.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::User(_))
    }
}

/// Signup, credential checks and the session cookie. The owner name is fixed
/// at construction.
#[derive(Clone)]
pub struct AuthManager {
    storage: SnippetStorage,
    owner_username: Arc<str>,
    cookies: CookieOptions,
}

impl AuthManager {
    pub fn new(
        storage: SnippetStorage,
        owner_username: impl Into<Arc<str>>,
        cookies: CookieOptions,
    ) -> Self {
        Self {
            storage,
            owner_username: owner_username.into(),
            cookies,
        }
    }

    pub fn owner_username(&self) -> &str {
        &self.owner_username
    }

    pub fn cookies(&self) -> CookieOptions {
        self.cookies
    }

    /// Register a new account. The password is hashed off the async runtime.
    pub async fn signup(&self, username: &str, password: &str) -> Result<User, SnipboxError> {
        let username = username.trim();
        require_text("username", username, Some(MAX_USERNAME_LEN))?;
        if password.is_empty() {
            return Err(SnipboxError::InvalidInput("password is required".to_string()));
        }

        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || password::hash(&password)).await??;
        let user = self.storage.insert_user(username, &hash).await?;
        info!(user_id = user.id, username = %user.username, "user signed up");
        Ok(user)
    }

    /// Check credentials; unknown user and wrong password are the same failure.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, SnipboxError> {
        let username = username.trim();
        let password = password.to_owned();
        let Some(user) = self.storage.find_user_by_username(username).await? else {
            tokio::task::spawn_blocking(move || password::verify_dummy(&password)).await?;
            warn!(username = %username, "login attempt for unknown user");
            return Err(SnipboxError::InvalidCredentials);
        };

        let stored = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || password::verify(&password, &stored)).await?;
        if !matches {
            warn!(username = %username, "login attempt with wrong password");
            return Err(SnipboxError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Establish the session for `user` on subsequent requests.
    pub fn login(&self, jar: PrivateCookieJar, user: &User) -> PrivateCookieJar {
        info!(user_id = user.id, username = %user.username, "session established");
        jar.add(self.cookies.build(SESSION_COOKIE, user.id.to_string(), None))
    }

    pub fn logout(&self, jar: PrivateCookieJar) -> PrivateCookieJar {
        jar.remove(self.cookies.clear(SESSION_COOKIE))
    }

    /// Resolve the session cookie. Tampered cookies never decrypt and unknown ids
    /// fall back to anonymous.
    pub async fn current_identity(&self, jar: &PrivateCookieJar) -> Result<Identity, SnipboxError> {
        let Some(user_id) = jar
            .get(SESSION_COOKIE)
            .and_then(|c| c.value().parse::<i64>().ok())
        else {
            return Ok(Identity::Anonymous);
        };
        Ok(match self.storage.find_user_by_id(user_id).await? {
            Some(user) => Identity::User(user),
            None => Identity::Anonymous,
        })
    }

    pub fn is_owner(&self, identity: &Identity) -> bool {
        identity
            .username()
            .is_some_and(|name| name == self.owner_username())
    }

    pub fn ensure_owner(&self, identity: &Identity) -> Result<(), SnipboxError> {
        if self.is_owner(identity) {
            return Ok(());
        }
        warn!(
            username = identity.username().unwrap_or("<anonymous>"),
            "owner-only action denied"
        );
        Err(SnipboxError::PermissionDenied)
    }
}
