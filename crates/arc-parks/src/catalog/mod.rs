//! Park catalog loading and lookup.

mod domain;
mod parser;

pub use domain::{AreaFilter, ParkProfile, RegionSummary};

use parser::CatalogDocument;
use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Immutable park list, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ParkCatalog {
    parks: Vec<ParkProfile>,
}

impl ParkCatalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), parks = catalog.len(), "park catalog loaded");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            serde_json::from_reader(reader).map_err(CatalogError::Json)?;
        Self::from_parks(document.into_parks())
    }

    pub fn from_parks(parks: Vec<ParkProfile>) -> Result<Self, CatalogError> {
        if parks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for (position, park) in parks.iter().enumerate() {
            if park.name.is_empty() || park.id.is_empty() {
                return Err(CatalogError::MissingName { position });
            }
            if !seen.insert(park.id.to_ascii_lowercase()) {
                return Err(CatalogError::DuplicateId(park.id.clone()));
            }
        }

        Ok(Self { parks })
    }

    pub fn parks(&self) -> &[ParkProfile] {
        &self.parks
    }

    pub fn len(&self) -> usize {
        self.parks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parks.is_empty()
    }

    /// Finds a park by id, falling back to its display name. Case-insensitive.
    pub fn find(&self, id_or_name: &str) -> Option<&ParkProfile> {
        let wanted = id_or_name.trim();
        self.parks
            .iter()
            .find(|park| park.id.eq_ignore_ascii_case(wanted))
            .or_else(|| {
                self.parks
                    .iter()
                    .find(|park| park.name.eq_ignore_ascii_case(wanted))
            })
    }

    pub fn filter<'a>(
        &'a self,
        filter: &'a AreaFilter,
    ) -> impl Iterator<Item = &'a ParkProfile> + 'a {
        self.parks.iter().filter(move |park| filter.matches(park))
    }

    /// Regions in first-seen order. Parks without a region tag are not listed.
    pub fn regions(&self) -> Vec<RegionSummary> {
        let mut regions: Vec<RegionSummary> = Vec::new();
        for park in &self.parks {
            let Some(region) = park.region.as_deref() else {
                continue;
            };
            let position = match regions.iter().position(|summary| summary.name == region) {
                Some(position) => position,
                None => {
                    regions.push(RegionSummary {
                        name: region.to_string(),
                        clusters: Vec::new(),
                        park_count: 0,
                    });
                    regions.len() - 1
                }
            };

            let summary = &mut regions[position];
            summary.park_count += 1;
            if let Some(cluster) = park.cluster.as_deref() {
                if !summary.clusters.iter().any(|known| known == cluster) {
                    summary.clusters.push(cluster.to_string());
                }
            }
        }
        regions
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    Empty,
    MissingName { position: usize },
    DuplicateId(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io { path, source } => {
                write!(f, "failed to read park catalog {}: {source}", path.display())
            }
            CatalogError::Json(err) => write!(f, "park catalog is not valid JSON: {err}"),
            CatalogError::Empty => write!(f, "park catalog contains no parks"),
            CatalogError::MissingName { position } => {
                write!(f, "park #{} in the catalog has no name", position + 1)
            }
            CatalogError::DuplicateId(id) => write!(f, "park id '{id}' appears more than once"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io { source, .. } => Some(source),
            CatalogError::Json(err) => Some(err),
            _ => None,
        }
    }
}
