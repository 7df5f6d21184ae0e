use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::db::SnippetStorage;
use crate::error::SnipboxError;
use crate::handlers::{admin, auth, pages, saved};
use crate::middleware::cookies::CookieOptions;
use crate::service::auth::AuthManager;
use crate::service::catalog::CatalogService;

#[derive(Clone)]
pub struct SnipboxState {
    pub auth: AuthManager,
    pub catalog: CatalogService,
    key: Key,
}

impl SnipboxState {
    /// Wire services from `cfg`; fails when the configured secret is unusable.
    pub fn new(storage: SnippetStorage, cfg: &Config) -> Result<Self, SnipboxError> {
        let key = cfg.session_key()?;
        Ok(Self::with_key(storage, cfg, key))
    }

    pub fn with_key(storage: SnippetStorage, cfg: &Config, key: Key) -> Self {
        let cookies = CookieOptions::new(cfg.basic.insecure_cookie);
        let auth = AuthManager::new(
            storage.clone(),
            cfg.basic.owner_username.as_str(),
            cookies,
        );
        let catalog = CatalogService::new(storage, auth.clone());
        Self { auth, catalog, key }
    }
}

impl FromRef<SnipboxState> for Key {
    fn from_ref(state: &SnipboxState) -> Self {
        state.key.clone()
    }
}

pub fn snipbox_router(state: SnipboxState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/categories", get(pages::categories))
        .route("/category/{name}", get(pages::category))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/skip", get(auth::skip))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(saved::dashboard))
        .route("/save_snippet/{id}", post(saved::save_snippet))
        .route("/admin", get(admin::admin_page))
        .route("/admin/add", post(admin::admin_add))
        .route("/admin/delete/{id}", post(admin::admin_delete))
        .route("/admin/update/{id}", post(admin::admin_update))
        .with_state(state)
}
