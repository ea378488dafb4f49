use super::domain::ParkProfile;
use crate::fields::{lenient_u64, optional_text, text};
use serde::Deserialize;

/// Catalog file layouts: a flat park list, or parks grouped by region and cluster.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CatalogDocument {
    Flat(Vec<RawPark>),
    Grouped { regions: Vec<RawRegion> },
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRegion {
    #[serde(default, deserialize_with = "text")]
    name: String,
    #[serde(default)]
    clusters: Vec<RawCluster>,
    /// Parks listed directly under a region, outside any cluster.
    #[serde(default)]
    parks: Vec<RawPark>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCluster {
    #[serde(default, deserialize_with = "text")]
    name: String,
    #[serde(default)]
    parks: Vec<RawPark>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPark {
    #[serde(default, deserialize_with = "optional_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    name: String,
    #[serde(default, deserialize_with = "text")]
    location: String,
    #[serde(default, deserialize_with = "text")]
    postcode: String,
    #[serde(default, deserialize_with = "text")]
    local_authority: String,
    #[serde(default, deserialize_with = "text")]
    county: String,
    #[serde(default, deserialize_with = "text")]
    sector: String,
    #[serde(default, deserialize_with = "text")]
    tenants: String,
    #[serde(default, deserialize_with = "text")]
    operator: String,
    #[serde(default, deserialize_with = "text")]
    status: String,
    #[serde(default, deserialize_with = "optional_text")]
    notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    size_sqft: Option<u64>,
    #[serde(default, deserialize_with = "optional_text")]
    website: Option<String>,
    #[serde(default, alias = "zone", deserialize_with = "optional_text")]
    region: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    cluster: Option<String>,
}

impl CatalogDocument {
    /// Flattens the document into parks in file order. Region and cluster
    /// names from the hierarchy fill in tags a park does not set itself.
    pub(crate) fn into_parks(self) -> Vec<ParkProfile> {
        match self {
            CatalogDocument::Flat(parks) => parks
                .into_iter()
                .map(|park| park.into_profile(None, None))
                .collect(),
            CatalogDocument::Grouped { regions } => {
                let mut profiles = Vec::new();
                for region in regions {
                    let region_name = Some(region.name).filter(|name| !name.is_empty());
                    profiles.extend(
                        region
                            .parks
                            .into_iter()
                            .map(|park| park.into_profile(region_name.as_deref(), None)),
                    );
                    for cluster in region.clusters {
                        let cluster_name = Some(cluster.name).filter(|name| !name.is_empty());
                        profiles.extend(cluster.parks.into_iter().map(|park| {
                            park.into_profile(region_name.as_deref(), cluster_name.as_deref())
                        }));
                    }
                }
                profiles
            }
        }
    }
}

impl RawPark {
    fn into_profile(self, region: Option<&str>, cluster: Option<&str>) -> ParkProfile {
        let id = self.id.unwrap_or_else(|| slugify(&self.name));
        ParkProfile {
            id,
            name: self.name,
            location: self.location,
            postcode: self.postcode,
            local_authority: self.local_authority,
            county: self.county,
            sector: self.sector,
            tenants: self.tenants,
            operator: self.operator,
            status: self.status,
            notes: self.notes,
            size_sqft: self.size_sqft,
            website: self.website,
            region: self.region.or_else(|| region.map(str::to_string)),
            cluster: self.cluster.or_else(|| cluster.map(str::to_string)),
        }
    }
}

/// Lower-case ASCII slug with single hyphens between words.
pub(crate) fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
