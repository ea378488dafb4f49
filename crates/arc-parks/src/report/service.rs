use super::summary::{build_area_report, build_park_report};
use super::views::{AreaReport, ParkReport};
use crate::catalog::{AreaFilter, ParkCatalog, ParkProfile};
use crate::coverage::{AreaDataset, MatchPolicy};
use crate::opportunities::{OpportunityEngine, OpportunityThresholds};
use crate::registry::CompanyRegistry;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Report generation over the shared catalog, area dataset and registry.
pub struct ParkIntelService<R> {
    catalog: Arc<ParkCatalog>,
    dataset: Arc<AreaDataset>,
    registry: Arc<R>,
    engine: OpportunityEngine,
    match_policy: MatchPolicy,
}

impl<R> Clone for ParkIntelService<R> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            dataset: Arc::clone(&self.dataset),
            registry: Arc::clone(&self.registry),
            engine: self.engine.clone(),
            match_policy: self.match_policy,
        }
    }
}

impl<R> ParkIntelService<R>
where
    R: CompanyRegistry + 'static,
{
    pub fn new(
        catalog: Arc<ParkCatalog>,
        dataset: Arc<AreaDataset>,
        registry: Arc<R>,
        match_policy: MatchPolicy,
    ) -> Self {
        Self {
            catalog,
            dataset,
            registry,
            engine: OpportunityEngine::default(),
            match_policy,
        }
    }

    pub fn with_thresholds(mut self, thresholds: OpportunityThresholds) -> Self {
        self.engine = OpportunityEngine::new(thresholds);
        self
    }

    pub fn catalog(&self) -> &ParkCatalog {
        &self.catalog
    }

    pub fn dataset(&self) -> &AreaDataset {
        &self.dataset
    }

    pub async fn park_report(&self, id_or_name: &str) -> Result<ParkReport, ReportError> {
        let park = self
            .catalog
            .find(id_or_name)
            .ok_or_else(|| ReportError::UnknownPark(id_or_name.trim().to_string()))?;
        Ok(self.report_for(park, Utc::now()).await)
    }

    /// Builds every selected park's report in catalog order, one registry
    /// lookup at a time, then aggregates.
    pub async fn area_report(&self, filter: &AreaFilter) -> Result<AreaReport, ReportError> {
        let generated_at = Utc::now();
        let mut reports = Vec::new();
        for park in self.catalog.filter(filter) {
            reports.push(self.report_for(park, generated_at).await);
        }

        if reports.is_empty() {
            return Err(ReportError::EmptySelection(filter.describe()));
        }

        info!(scope = %filter.describe(), parks = reports.len(), "area report generated");
        Ok(build_area_report(filter, &reports, generated_at))
    }

    async fn report_for(&self, park: &ParkProfile, generated_at: DateTime<Utc>) -> ParkReport {
        let area = self
            .dataset
            .lookup(&park.local_authority, self.match_policy);
        if area.is_none() {
            debug!(
                park = %park.id,
                authority = %park.local_authority,
                "no area data for local authority"
            );
        }

        let lookup = self.registry.lookup(&park.postcode).await;
        build_park_report(park, area, &lookup, &self.engine, generated_at)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("unknown park '{0}'")]
    UnknownPark(String),
    #[error("no parks match {0}")]
    EmptySelection(String),
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("report output is not valid UTF-8: {0}")]
    Encoding(String),
}
