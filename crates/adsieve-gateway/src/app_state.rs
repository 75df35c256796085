//! Shared application state for the adsieve gateway.
//!
//! Builds the store, the list registry and the interceptor from config.
//! Startup errors are returned, never panicked.

use std::sync::Arc;

use adsieve_core::error::Result;

use crate::config::AdsieveConfig;
use crate::lists::AdvertiseLists;
use crate::obs::GatewayMetrics;
use crate::pipeline::Interceptor;
use crate::store::{self, KvStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    interceptor: Arc<Interceptor>,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: AdsieveConfig,
    lists: Arc<AdvertiseLists>,
}

impl AppState {
    /// Build application state with the store selected by config.
    pub fn new(cfg: AdsieveConfig) -> Result<Self> {
        let store = store::open(&cfg.store)?;
        Self::with_store(cfg, store)
    }

    /// Build application state around an injected store.
    pub fn with_store(cfg: AdsieveConfig, store: Arc<dyn KvStore>) -> Result<Self> {
        let layout = cfg.transform.layout()?;
        let limits = cfg.transform.limits();

        let lists = Arc::new(AdvertiseLists::new(
            store,
            cfg.store.key.clone(),
            cfg.store.on_corrupt,
        ));
        let metrics = Arc::new(GatewayMetrics::default());
        let interceptor = Arc::new(Interceptor::new(
            Arc::clone(&lists),
            layout,
            limits,
            Arc::clone(&metrics),
        ));

        tracing::info!(
            key = %cfg.store.key,
            classify_path = %interceptor.layout().classify,
            ad_signals_path = %interceptor.layout().ad_signals,
            max_payload_bytes = limits.max_payload_bytes,
            "adsieve state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, lists }),
            interceptor,
            metrics,
        })
    }

    pub fn cfg(&self) -> &AdsieveConfig {
        &self.inner.cfg
    }

    pub fn lists(&self) -> Arc<AdvertiseLists> {
        Arc::clone(&self.inner.lists)
    }

    pub fn interceptor(&self) -> Arc<Interceptor> {
        Arc::clone(&self.interceptor)
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }
}
