use crate::{
    abstract_trait::DynApiClient,
    client::ApiClient,
    di::DependenciesInject,
    events::{self, SessionEvent},
    handler::{AppRouter, RouteTable},
    navigation::Navigator,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynSessionStore, DynStorage},
    cache::{FileStorage, SessionStore},
    config::Config,
    utils::{Metrics, encode_metrics},
};
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub session: DynSessionStore,
    pub client: DynApiClient,
    pub di_container: DependenciesInject,
    pub router: AppRouter,
    pub navigator: Arc<Navigator>,
    pub registry: Arc<Mutex<Registry>>,
    pub metrics: Metrics,
}

impl AppState {
    /// Wires the dashboard on top of the on-disk session file.
    pub fn new(config: &Config) -> Result<Self> {
        info!(
            "Using session storage at {}",
            config.session_dir.display()
        );
        let storage = Arc::new(FileStorage::new(&config.session_dir)) as DynStorage;
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: &Config, storage: DynStorage) -> Result<Self> {
        let session = Arc::new(SessionStore::new(storage)) as DynSessionStore;
        let metrics = Metrics::new();

        let mut registry = Registry::default();
        metrics.register(&mut registry);

        let (sender, _) = events::channel();

        let client = ApiClient::new(
            &config.api_base_url,
            session.clone(),
            sender,
            metrics.clone(),
        )
        .context("Failed to create API client")?
        .with_cache_bust(config.cache_bust);
        let client = Arc::new(client) as DynApiClient;

        let navigator = Arc::new(Navigator::default());
        let router = AppRouter::new(RouteTable::dashboard(), session.clone(), navigator.clone());

        let di_container = DependenciesInject::new(client.clone(), session.clone());

        Ok(Self {
            session,
            client,
            di_container,
            router,
            navigator,
            registry: Arc::new(Mutex::new(registry)),
            metrics,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.client.subscribe()
    }

    pub async fn render_metrics(&self) -> Result<String> {
        let registry = self.registry.lock().await;
        encode_metrics(&registry).context("Failed to encode metrics")
    }
}
