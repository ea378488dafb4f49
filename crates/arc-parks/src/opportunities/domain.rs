use serde::Serialize;

/// Opportunity categories in rule-evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    FullFibreUpgrade,
    GigabitUpgrade,
    FibreMigration,
    LastMile,
    IndoorMobile,
    FiveGReadiness,
    LifeSciencesData,
    SecureNetwork,
    StartupPackages,
    ComputeBackhaul,
    CampusScaleNetwork,
    TenantCommunity,
    BaselineReview,
}

impl OpportunityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullFibreUpgrade => "Full fibre upgrade",
            Self::GigabitUpgrade => "Gigabit upgrade",
            Self::FibreMigration => "Fibre migration",
            Self::LastMile => "Last-mile connectivity",
            Self::IndoorMobile => "Indoor mobile",
            Self::FiveGReadiness => "5G readiness",
            Self::LifeSciencesData => "Research data infrastructure",
            Self::SecureNetwork => "Secure network",
            Self::StartupPackages => "Start-up packages",
            Self::ComputeBackhaul => "Compute backhaul",
            Self::CampusScaleNetwork => "Campus-scale network",
            Self::TenantCommunity => "Tenant community",
            Self::BaselineReview => "Baseline review",
        }
    }

    /// Canonical wording. `TenantCommunity` is rendered with its company count
    /// by the engine instead.
    pub const fn text(self) -> &'static str {
        match self {
            Self::FullFibreUpgrade => {
                "Campus-wide full fibre upgrade: current availability suggests significant \
                 infrastructure gap vs peer parks"
            }
            Self::GigabitUpgrade => {
                "Gigabit connectivity upgrade: research organisations typically require \
                 symmetrical gigabit+ for data-intensive work"
            }
            Self::FibreMigration => {
                "Connectivity migration programme: infrastructure exists but tenants are not \
                 yet on full fibre — opportunity for managed migration"
            }
            Self::LastMile => {
                "Last-mile connectivity: coverage gaps exist that may affect specific buildings \
                 or zones within the park"
            }
            Self::IndoorMobile => {
                "Indoor mobile coverage: current 4G indoor coverage may be insufficient for \
                 campus-wide mobile working"
            }
            Self::FiveGReadiness => {
                "5G readiness: outdoor 5G coverage is limited — early-mover advantage for a \
                 park deploying private 5G network"
            }
            Self::LifeSciencesData => {
                "High-bandwidth data infrastructure: genomics and life science research \
                 generates large datasets requiring dedicated high-speed links to cloud \
                 platforms and partner institutions"
            }
            Self::SecureNetwork => {
                "Secure, segregated network architecture: space, energy and defence-adjacent \
                 tenants require network isolation and enhanced cybersecurity posture"
            }
            Self::StartupPackages => {
                "Start-up connectivity packages: incubator-stage companies require flexible, \
                 scalable connectivity that grows with them — avoid over-commitment on long \
                 contracts"
            }
            Self::ComputeBackhaul => {
                "Compute-grade backhaul: AI and HPC workloads need low-latency, high-capacity \
                 links to cloud regions and partner data centres"
            }
            Self::CampusScaleNetwork => {
                "Campus-scale managed network: at this scale, a dedicated managed campus \
                 network with centralised monitoring is significantly more cost-effective than \
                 per-tenant provision"
            }
            Self::TenantCommunity => {
                "Tenant community connectivity: opportunity for a campus-wide connectivity \
                 programme covering all tenants"
            }
            Self::BaselineReview => {
                "Connectivity review: baseline assessment suggests infrastructure meets minimum \
                 standards but further on-site survey recommended to identify specific \
                 tenant-level gaps"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opportunity {
    pub kind: OpportunityKind,
    pub text: String,
}

impl Opportunity {
    pub fn canned(kind: OpportunityKind) -> Self {
        Self {
            kind,
            text: kind.text().to_string(),
        }
    }
}

/// Risk or context observation surfaced alongside opportunities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flag {
    pub title: String,
    pub detail: String,
}

impl Flag {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Engine output: ordered opportunities (deduplicated, capped) and flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecommendationSet {
    pub opportunities: Vec<Opportunity>,
    pub flags: Vec<Flag>,
}

impl RecommendationSet {
    pub fn kinds(&self) -> Vec<OpportunityKind> {
        self.opportunities.iter().map(|opportunity| opportunity.kind).collect()
    }

    pub fn contains(&self, kind: OpportunityKind) -> bool {
        self.opportunities
            .iter()
            .any(|opportunity| opportunity.kind == kind)
    }

    pub(crate) fn push_opportunity(&mut self, opportunity: Opportunity) {
        if !self
            .opportunities
            .iter()
            .any(|existing| existing.text == opportunity.text)
        {
            self.opportunities.push(opportunity);
        }
    }
}
