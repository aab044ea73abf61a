//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::config::BasicAuth;
use crate::infrastructure::persistence::SqliteLinkRepository;
use crate::utils::alias_generator::RandomAliasGenerator;

/// Link service wired to SQLite storage and the random alias generator.
pub type DefaultLinkService = LinkService<SqliteLinkRepository, RandomAliasGenerator>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DefaultLinkService>,
    /// Credentials for the write endpoints; `None` disables the check.
    pub basic_auth: Option<Arc<BasicAuth>>,
}

impl AppState {
    pub fn new(link_service: Arc<DefaultLinkService>, basic_auth: Option<BasicAuth>) -> Self {
        Self {
            link_service,
            basic_auth: basic_auth.map(Arc::new),
        }
    }
}
