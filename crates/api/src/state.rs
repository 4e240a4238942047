//! Shared application state.

use std::sync::Arc;

use assetdesk_db::DbPool;

use crate::config::ServerConfig;
use crate::media::MediaStore;

/// State handed to every handler. Cheaply cloneable: the pool is an
/// `Arc` internally and the rest is wrapped here.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub media: Arc<MediaStore>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        let media = Arc::new(MediaStore::new(config.media.root.clone()));
        Self {
            pool,
            config: Arc::new(config),
            media,
        }
    }
}
