use chrono::NaiveDate;
use serde::Serialize;

/// A company registered at a park's postcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyRecord {
    pub name: String,
    pub status: String,
    pub incorporated_on: Option<NaiveDate>,
    pub industry_codes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_snippet: Option<String>,
}

impl CompanyRecord {
    pub fn is_active(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("active")
    }
}

/// One page of registry search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanySearch {
    pub total_results: u64,
    pub companies: Vec<CompanyRecord>,
}

impl CompanySearch {
    pub fn active_companies(&self) -> impl Iterator<Item = &CompanyRecord> + '_ {
        self.companies.iter().filter(|company| company.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_companies().count()
    }
}

/// Why no company data is available for a park.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentReason {
    NoCredential,
    NoPostcode,
    Failed,
}

impl AbsentReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoCredential => "registry lookup not configured",
            Self::NoPostcode => "park has no postcode",
            Self::Failed => "registry lookup failed",
        }
    }
}

/// Outcome of a registry lookup. Failures never propagate as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryLookup {
    Found(CompanySearch),
    Absent(AbsentReason),
}

impl RegistryLookup {
    pub fn search(&self) -> Option<&CompanySearch> {
        match self {
            Self::Found(search) => Some(search),
            Self::Absent(_) => None,
        }
    }

    pub fn companies(&self) -> &[CompanyRecord] {
        self.search()
            .map(|search| search.companies.as_slice())
            .unwrap_or_default()
    }
}
