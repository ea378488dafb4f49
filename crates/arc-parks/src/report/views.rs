use crate::catalog::{AreaFilter, ParkProfile};
use crate::coverage::{AreaCoverageRecord, MatchKind, RagStatus, ScoreResult};
use crate::opportunities::{OpportunityKind, RecommendationSet};
use crate::registry::{AbsentReason, CompanyRecord, SectorCount};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreView {
    pub score: Option<u8>,
    pub status: RagStatus,
    pub status_label: &'static str,
    pub display: String,
}

impl From<ScoreResult> for ScoreView {
    fn from(result: ScoreResult) -> Self {
        Self {
            score: result.score,
            status: result.status,
            status_label: result.status.label(),
            display: result.display(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaMatchView {
    pub authority: String,
    pub match_kind: MatchKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absent_reason: Option<AbsentReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absent_reason_label: Option<&'static str>,
    pub total_results: u64,
    pub active_companies: usize,
    pub sectors: Vec<SectorCount>,
    pub sample_companies: Vec<CompanyRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextStep {
    pub title: &'static str,
    pub detail: &'static str,
}

pub const NEXT_STEPS: [NextStep; 4] = [
    NextStep {
        title: "On-site connectivity survey",
        detail: "Request permission to conduct a physical survey of campus infrastructure. \
                 This will validate Ofcom data at building level and identify specific upgrade \
                 opportunities.",
    },
    NextStep {
        title: "Tenant engagement",
        detail: "Propose a complimentary digital readiness review for tenant companies \
                 — this creates value for the park operator and opens parallel conversations \
                 with individual tenants.",
    },
    NextStep {
        title: "Park director briefing",
        detail: "Present this profile to the park director or facilities manager as a \
                 conversation starter. Frame around infrastructure gaps vs. peer parks.",
    },
    NextStep {
        title: "Connectivity benchmarking",
        detail: "Commission a WiredScore pre-assessment to benchmark the park against \
                 certification criteria — a useful hook for parks with ambitions to attract \
                 premium tenants.",
    },
];

/// Everything known about one park at report time.
#[derive(Debug, Clone, Serialize)]
pub struct ParkReport {
    pub park: ParkProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaMatchView>,
    pub coverage: Option<AreaCoverageRecord>,
    pub connectivity: ScoreView,
    pub mobile: ScoreView,
    pub registry: RegistrySummary,
    pub recommendations: RecommendationSet,
    pub next_steps: Vec<NextStep>,
    pub generated_at: DateTime<Utc>,
}

/// One line of an area-wide report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaParkRow {
    pub park_id: String,
    pub park_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    pub local_authority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_authority: Option<String>,
    pub connectivity: ScoreView,
    pub mobile: ScoreView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_companies: Option<usize>,
    pub opportunities: Vec<String>,
    pub flag_titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: RagStatus,
    pub status_label: &'static str,
    pub parks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpportunityTally {
    pub kind: OpportunityKind,
    pub label: &'static str,
    pub parks: usize,
}

/// Aggregated view over a region/cluster selection.
#[derive(Debug, Clone, Serialize)]
pub struct AreaReport {
    pub scope: String,
    pub filter: AreaFilter,
    pub generated_at: DateTime<Utc>,
    pub park_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_connectivity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_mobile: Option<f64>,
    pub status_counts: Vec<StatusCount>,
    pub common_opportunities: Vec<OpportunityTally>,
    pub parks: Vec<AreaParkRow>,
}
