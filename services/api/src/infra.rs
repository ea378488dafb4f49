use arc_parks::catalog::ParkCatalog;
use arc_parks::config::AppConfig;
use arc_parks::coverage::AreaDataset;
use arc_parks::error::AppError;
use arc_parks::registry::RegistryClient;
use arc_parks::report::ParkIntelService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type ParkService = ParkIntelService<RegistryClient>;

/// Loads the catalog and area dataset and picks a registry client. Only a bad
/// catalog or registry client setup is fatal.
pub(crate) fn build_service(config: &AppConfig) -> Result<ParkService, AppError> {
    let catalog = ParkCatalog::load(&config.data.catalog_path)?;
    let dataset = AreaDataset::load_or_empty(&config.data.area_data_path);
    let registry = RegistryClient::from_config(&config.registry)?;

    if !registry.is_enabled() {
        warn!("COMPANIES_HOUSE_API_KEY not set; company registry enrichment disabled");
    }
    info!(
        parks = catalog.len(),
        areas = dataset.len(),
        match_policy = ?config.data.match_policy,
        "park data loaded"
    );

    Ok(ParkIntelService::new(
        Arc::new(catalog),
        Arc::new(dataset),
        Arc::new(registry),
        config.data.match_policy,
    ))
}
