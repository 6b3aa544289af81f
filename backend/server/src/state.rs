use std::sync::Arc;

use super::{
    config::Config,
    database::{Store, StoreError},
    livereload::LiveReload,
};

pub struct AppState {
    pub config: Config,
    pub store: Store,
    /// Present only in debug mode.
    pub live_reload: Option<LiveReload>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Arc<Self>, StoreError> {
        let store = Store::connect(&config).await?;

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Store) -> Arc<Self> {
        let live_reload = config.debug.then(|| LiveReload::from_config(&config));

        Arc::new(Self {
            config,
            store,
            live_reload,
        })
    }
}
