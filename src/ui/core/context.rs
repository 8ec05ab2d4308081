use std::sync::Arc;

use crate::{auth::TokenStore, backend::ClaimsBackend, config::Config, logger::Logger};

/// Services shared by every page.
#[derive(Clone)]
pub struct AppContext {
    pub backend: Arc<dyn ClaimsBackend>,
    pub tokens: TokenStore,
    pub config: Config,
    pub logger: Logger,
}

impl AppContext {
    pub fn new(backend: Arc<dyn ClaimsBackend>, tokens: TokenStore, config: Config, logger: Logger) -> Self {
        Self {
            backend,
            tokens,
            config,
            logger,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }
}
