//! Opportunity and flag rules applied to a park, its area coverage and the
//! companies registered at its postcode.

mod config;
mod domain;
mod keywords;
mod rules;

pub use config::{
    OpportunityThresholds, CAMPUS_SCALE_MIN_SQFT, CAMPUS_SCALE_MIN_TENANTS, FULL_FIBRE_MIN_PCT,
    FULL_FIBRE_TAKEUP_MIN_PCT, GIGABIT_MIN_PCT, INDOOR_4G_MIN_PCT, MAX_OPPORTUNITIES,
    NO_DECENT_MAX_PCT, OUTDOOR_5G_MIN_PCT, TAKEUP_AVAILABILITY_MIN_PCT,
    TENANT_COMMUNITY_MIN_COMPANIES,
};
pub use domain::{Flag, Opportunity, OpportunityKind, RecommendationSet};

use crate::catalog::ParkProfile;
use crate::coverage::AreaCoverageRecord;
use crate::registry::CompanyRecord;

/// Stateless rule engine over a fixed set of thresholds.
#[derive(Debug, Clone, Default)]
pub struct OpportunityEngine {
    thresholds: OpportunityThresholds,
}

impl OpportunityEngine {
    pub fn new(thresholds: OpportunityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &OpportunityThresholds {
        &self.thresholds
    }

    /// Runs threshold, keyword, scale and registry rules in that order. The
    /// opportunity list is never empty.
    pub fn evaluate(
        &self,
        park: &ParkProfile,
        coverage: Option<&AreaCoverageRecord>,
        companies: Option<&[CompanyRecord]>,
    ) -> RecommendationSet {
        let mut set = RecommendationSet::default();

        if let Some(coverage) = coverage {
            rules::apply_threshold_rules(coverage, &self.thresholds, &mut set);
        }
        rules::apply_keyword_rules(park, &mut set);
        rules::apply_scale_rule(park, &self.thresholds, &mut set);
        rules::apply_registry_rule(companies, &self.thresholds, &mut set);

        if set.opportunities.is_empty() {
            set.push_opportunity(Opportunity::canned(OpportunityKind::BaselineReview));
        }
        set.opportunities.truncate(self.thresholds.max_opportunities);
        set
    }
}

/// Evaluates with the default thresholds.
pub fn generate_recommendations(
    park: &ParkProfile,
    coverage: Option<&AreaCoverageRecord>,
    companies: Option<&[CompanyRecord]>,
) -> RecommendationSet {
    OpportunityEngine::default().evaluate(park, coverage, companies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn park(sector: &str) -> ParkProfile {
        ParkProfile {
            id: "test-park".to_string(),
            name: "Test Park".to_string(),
            location: "Didcot".to_string(),
            postcode: "OX11 0QX".to_string(),
            local_authority: "Vale of White Horse".to_string(),
            county: "Oxfordshire".to_string(),
            sector: sector.to_string(),
            tenants: "12 tenants".to_string(),
            operator: "Test Operator".to_string(),
            status: "Operational".to_string(),
            notes: None,
            size_sqft: None,
            website: None,
            region: None,
            cluster: None,
        }
    }

    fn company(status: &str) -> CompanyRecord {
        CompanyRecord {
            name: "Tenant Ltd".to_string(),
            status: status.to_string(),
            incorporated_on: None,
            industry_codes: vec!["72110".to_string()],
            company_number: None,
            address_snippet: None,
        }
    }

    fn healthy_area() -> AreaCoverageRecord {
        AreaCoverageRecord {
            full_fibre_pct: Some(82.0),
            gigabit_pct: Some(90.0),
            superfast_pct: Some(98.0),
            no_decent_pct: Some(0.4),
            ff_takeup_pct: Some(45.0),
            indoor_4g_pct: Some(91.0),
            outdoor_5g_pct: Some(76.0),
            ..AreaCoverageRecord::default()
        }
    }

    #[test]
    fn weak_area_with_genomics_sector_hits_every_listed_rule() {
        let coverage = AreaCoverageRecord {
            full_fibre_pct: Some(45.0),
            gigabit_pct: Some(35.0),
            ff_takeup_pct: Some(10.0),
            no_decent_pct: Some(5.0),
            indoor_4g_pct: Some(60.0),
            outdoor_5g_pct: Some(20.0),
            ..AreaCoverageRecord::default()
        };
        let result =
            generate_recommendations(&park("genomics research park"), Some(&coverage), None);

        for expected in [
            OpportunityKind::FullFibreUpgrade,
            OpportunityKind::GigabitUpgrade,
            OpportunityKind::LastMile,
            OpportunityKind::IndoorMobile,
            OpportunityKind::FiveGReadiness,
            OpportunityKind::LifeSciencesData,
        ] {
            assert!(result.contains(expected), "missing {expected:?}");
        }
        assert!(!result.contains(OpportunityKind::FibreMigration));
        assert!(result.opportunities.len() <= MAX_OPPORTUNITIES);
        assert_eq!(result.flags.len(), 6);
        assert_eq!(result.flags[0].title, "Full fibre gap");
        assert!(result.flags[0].detail.contains("45%"));
    }

    #[test]
    fn opportunity_and_flag_wording_is_fixed() {
        let coverage = AreaCoverageRecord {
            full_fibre_pct: Some(45.0),
            ..healthy_area()
        };
        let result = generate_recommendations(&park("Mixed office"), Some(&coverage), None);

        assert_eq!(result.kinds(), vec![OpportunityKind::FullFibreUpgrade]);
        assert_eq!(
            result.opportunities[0].text,
            "Campus-wide full fibre upgrade: current availability suggests significant \
             infrastructure gap vs peer parks"
        );
        assert_eq!(
            result.flags[0].detail,
            "Only 45% of premises in this local authority have full fibre availability \
             — below the threshold expected for a science and innovation campus"
        );
        assert_eq!(
            OpportunityKind::StartupPackages.text(),
            "Start-up connectivity packages: incubator-stage companies require flexible, \
             scalable connectivity that grows with them — avoid over-commitment on long contracts"
        );
    }

    #[test]
    fn compute_keywords_match_within_words() {
        let result = generate_recommendations(&park("OpenAI-style labs"), None, None);
        assert_eq!(result.kinds(), vec![OpportunityKind::ComputeBackhaul]);
        assert_eq!(result.flags[0].title, "Compute-intensive tenants");
    }

    #[test]
    fn nothing_triggered_yields_only_the_baseline_review() {
        let result = generate_recommendations(&park("Mixed office"), Some(&healthy_area()), None);
        assert_eq!(result.kinds(), vec![OpportunityKind::BaselineReview]);
        assert_eq!(
            result.opportunities[0].text,
            OpportunityKind::BaselineReview.text()
        );
        assert!(result.flags.is_empty());
    }

    #[test]
    fn keyword_and_scale_rules_run_without_coverage() {
        let mut profile = park("Space and satellite applications, AI");
        profile.notes = Some("Hosts an incubator for spinout companies".to_string());
        profile.tenants = "120+ organisations".to_string();

        let result = generate_recommendations(&profile, None, None);
        assert_eq!(
            result.kinds(),
            vec![
                OpportunityKind::SecureNetwork,
                OpportunityKind::StartupPackages,
                OpportunityKind::ComputeBackhaul,
                OpportunityKind::CampusScaleNetwork,
            ]
        );
        let titles: Vec<&str> = result.flags.iter().map(|flag| flag.title.as_str()).collect();
        assert_eq!(titles, vec!["Sensitive sector", "Compute-intensive tenants"]);
    }

    #[test]
    fn size_and_tenant_scale_rules_add_one_opportunity() {
        let mut profile = park("Mixed office");
        profile.size_sqft = Some(1_500_000);
        profile.tenants = "300+ companies".to_string();

        let result = generate_recommendations(&profile, Some(&healthy_area()), None);
        assert_eq!(result.kinds(), vec![OpportunityKind::CampusScaleNetwork]);

        profile.size_sqft = Some(CAMPUS_SCALE_MIN_SQFT);
        profile.tenants = "100 companies".to_string();
        let result = generate_recommendations(&profile, Some(&healthy_area()), None);
        assert_eq!(result.kinds(), vec![OpportunityKind::BaselineReview]);
    }

    #[test]
    fn registry_rule_counts_only_active_companies() {
        let mut companies: Vec<CompanyRecord> = (0..TENANT_COMMUNITY_MIN_COMPANIES - 1)
            .map(|_| company("active"))
            .collect();
        companies.push(company("dissolved"));

        let profile = park("Mixed office");
        let result = generate_recommendations(&profile, Some(&healthy_area()), Some(&companies));
        assert!(!result.contains(OpportunityKind::TenantCommunity));

        companies.push(company("active"));
        let result = generate_recommendations(&profile, Some(&healthy_area()), Some(&companies));
        assert_eq!(result.kinds(), vec![OpportunityKind::TenantCommunity]);
        assert!(result.opportunities[0].text.contains("20 active companies"));
    }

    #[test]
    fn opportunities_are_capped_but_flags_are_not() {
        let coverage = AreaCoverageRecord {
            full_fibre_pct: Some(20.0),
            gigabit_pct: Some(10.0),
            no_decent_pct: Some(9.0),
            indoor_4g_pct: Some(50.0),
            outdoor_5g_pct: Some(5.0),
            ..AreaCoverageRecord::default()
        };
        let mut profile = park("Genomics, nuclear fusion and HPC");
        profile.status = "Incubator".to_string();
        profile.size_sqft = Some(900_000);
        let companies: Vec<CompanyRecord> = (0..25).map(|_| company("active")).collect();

        let result = generate_recommendations(&profile, Some(&coverage), Some(&companies));
        assert_eq!(result.opportunities.len(), MAX_OPPORTUNITIES);
        assert_eq!(result.opportunities[0].kind, OpportunityKind::FullFibreUpgrade);
        assert!(!result.contains(OpportunityKind::TenantCommunity));
        assert_eq!(result.flags.len(), 8);
    }

    #[test]
    fn custom_thresholds_change_the_outcome() {
        let engine = OpportunityEngine::new(OpportunityThresholds {
            full_fibre_min_pct: 90.0,
            ..OpportunityThresholds::default()
        });
        let result = engine.evaluate(&park("Mixed office"), Some(&healthy_area()), None);
        assert_eq!(result.kinds(), vec![OpportunityKind::FullFibreUpgrade]);
    }
}
