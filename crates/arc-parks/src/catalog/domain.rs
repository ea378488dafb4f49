use serde::{Deserialize, Serialize};

/// A science or innovation park as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkProfile {
    pub id: String,
    pub name: String,
    pub location: String,
    pub postcode: String,
    pub local_authority: String,
    pub county: String,
    pub sector: String,
    pub tenants: String,
    pub operator: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_sqft: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
}

impl ParkProfile {
    /// Header line used in documents: location, region and postcode.
    pub fn subtitle(&self) -> String {
        [
            Some(self.location.as_str()),
            self.region.as_deref(),
            Some(self.postcode.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ")
    }
}

/// Region/cluster selection used by area reports and park listings. Blank
/// values select everything; matching ignores case and surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaFilter {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub cluster: Option<String>,
}

impl AreaFilter {
    pub fn new(region: Option<String>, cluster: Option<String>) -> Self {
        Self { region, cluster }
    }

    pub fn matches(&self, park: &ParkProfile) -> bool {
        tag_matches(self.region.as_deref(), park.region.as_deref())
            && tag_matches(self.cluster.as_deref(), park.cluster.as_deref())
    }

    /// Human-readable scope, e.g. "Cambridge / North Cambridge" or "All parks".
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = [self.region.as_deref(), self.cluster.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            "All parks".to_string()
        } else {
            parts.join(" / ")
        }
    }
}

fn tag_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|value| !value.is_empty()) {
        None => true,
        Some(wanted) => actual.is_some_and(|actual| actual.trim().eq_ignore_ascii_case(wanted)),
    }
}

/// Region listing entry with its clusters in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSummary {
    pub name: String,
    pub clusters: Vec<String>,
    pub park_count: usize,
}
