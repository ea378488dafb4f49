use serde::{Deserialize, Serialize};

/// Full fibre availability below this triggers an upgrade opportunity.
pub const FULL_FIBRE_MIN_PCT: f64 = 60.0;
pub const GIGABIT_MIN_PCT: f64 = 50.0;
/// Take-up is only judged once availability exceeds this.
pub const TAKEUP_AVAILABILITY_MIN_PCT: f64 = 60.0;
pub const FULL_FIBRE_TAKEUP_MIN_PCT: f64 = 30.0;
pub const NO_DECENT_MAX_PCT: f64 = 2.0;
pub const INDOOR_4G_MIN_PCT: f64 = 80.0;
pub const OUTDOOR_5G_MIN_PCT: f64 = 40.0;
pub const CAMPUS_SCALE_MIN_SQFT: u64 = 500_000;
pub const CAMPUS_SCALE_MIN_TENANTS: u64 = 100;
pub const TENANT_COMMUNITY_MIN_COMPANIES: usize = 20;
pub const MAX_OPPORTUNITIES: usize = 8;

/// Rule thresholds applied by the opportunity engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityThresholds {
    pub full_fibre_min_pct: f64,
    pub gigabit_min_pct: f64,
    pub takeup_availability_min_pct: f64,
    pub full_fibre_takeup_min_pct: f64,
    pub no_decent_max_pct: f64,
    pub indoor_4g_min_pct: f64,
    pub outdoor_5g_min_pct: f64,
    pub campus_scale_min_sqft: u64,
    pub campus_scale_min_tenants: u64,
    pub tenant_community_min_companies: usize,
    pub max_opportunities: usize,
}

impl Default for OpportunityThresholds {
    fn default() -> Self {
        Self {
            full_fibre_min_pct: FULL_FIBRE_MIN_PCT,
            gigabit_min_pct: GIGABIT_MIN_PCT,
            takeup_availability_min_pct: TAKEUP_AVAILABILITY_MIN_PCT,
            full_fibre_takeup_min_pct: FULL_FIBRE_TAKEUP_MIN_PCT,
            no_decent_max_pct: NO_DECENT_MAX_PCT,
            indoor_4g_min_pct: INDOOR_4G_MIN_PCT,
            outdoor_5g_min_pct: OUTDOOR_5G_MIN_PCT,
            campus_scale_min_sqft: CAMPUS_SCALE_MIN_SQFT,
            campus_scale_min_tenants: CAMPUS_SCALE_MIN_TENANTS,
            tenant_community_min_companies: TENANT_COMMUNITY_MIN_COMPANIES,
            max_opportunities: MAX_OPPORTUNITIES,
        }
    }
}
