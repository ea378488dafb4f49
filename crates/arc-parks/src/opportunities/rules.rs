use super::config::OpportunityThresholds;
use super::domain::{Flag, Opportunity, OpportunityKind, RecommendationSet};
use super::keywords::KEYWORD_GROUPS;
use crate::catalog::ParkProfile;
use crate::coverage::{format_figure, AreaCoverageRecord};
use crate::registry::CompanyRecord;

/// Threshold rules over the coverage record. The broadband rules run when the
/// record carries any connectivity figure and read missing figures as 0. The
/// mobile rules run when it carries any mobile figure; missing indoor 4G reads
/// as 100 and missing outdoor 5G as 0.
pub(crate) fn apply_threshold_rules(
    coverage: &AreaCoverageRecord,
    thresholds: &OpportunityThresholds,
    set: &mut RecommendationSet,
) {
    if coverage.has_connectivity_fields() {
        let ff = coverage.full_fibre_pct.unwrap_or(0.0);
        let gigabit = coverage.gigabit_pct.unwrap_or(0.0);
        let no_decent = coverage.no_decent_pct.unwrap_or(0.0);
        let takeup = coverage.ff_takeup_pct.unwrap_or(0.0);

        if ff < thresholds.full_fibre_min_pct {
            set.flags.push(Flag::new(
                "Full fibre gap",
                format!(
                    "Only {}% of premises in this local authority have full fibre availability \
                     — below the threshold expected for a science and innovation campus",
                    format_figure(ff)
                ),
            ));
            set.push_opportunity(Opportunity::canned(OpportunityKind::FullFibreUpgrade));
        }
        if gigabit < thresholds.gigabit_min_pct {
            set.flags.push(Flag::new(
                "Gigabit shortfall",
                format!(
                    "Gigabit-capable coverage at {}% \
                     — likely insufficient for research data transmission demands",
                    format_figure(gigabit)
                ),
            ));
            set.push_opportunity(Opportunity::canned(OpportunityKind::GigabitUpgrade));
        }
        if takeup < thresholds.full_fibre_takeup_min_pct
            && ff > thresholds.takeup_availability_min_pct
        {
            set.flags.push(Flag::new(
                "Full fibre take-up gap",
                format!(
                    "Full fibre take-up at only {}% despite {}% availability \
                     — significant uptake gap",
                    format_figure(takeup),
                    format_figure(ff)
                ),
            ));
            set.push_opportunity(Opportunity::canned(OpportunityKind::FibreMigration));
        }
        if no_decent > thresholds.no_decent_max_pct {
            set.flags.push(Flag::new(
                "No decent broadband",
                format!(
                    "{}% of premises have no decent broadband \
                     — notable gap in coverage for a science park location",
                    format_figure(no_decent)
                ),
            ));
            set.push_opportunity(Opportunity::canned(OpportunityKind::LastMile));
        }
    }

    if coverage.has_mobile_fields() {
        let indoor_4g = coverage.indoor_4g_pct.unwrap_or(100.0);
        let outdoor_5g = coverage.outdoor_5g_pct.unwrap_or(0.0);

        if indoor_4g < thresholds.indoor_4g_min_pct {
            set.flags.push(Flag::new(
                "Indoor 4G coverage",
                format!(
                    "Indoor 4G coverage across all operators at {}% \
                     — below acceptable threshold for research campuses",
                    format_figure(indoor_4g)
                ),
            ));
            set.push_opportunity(Opportunity::canned(OpportunityKind::IndoorMobile));
        }
        if outdoor_5g < thresholds.outdoor_5g_min_pct {
            set.flags.push(Flag::new(
                "5G readiness",
                format!(
                    "Outdoor 5G coverage at {}% \
                     — 5G readiness is low for a cutting-edge innovation campus",
                    format_figure(outdoor_5g)
                ),
            ));
            set.push_opportunity(Opportunity::canned(OpportunityKind::FiveGReadiness));
        }
    }
}

/// Keyword groups matched against the park's sector, notes and status text.
pub(crate) fn apply_keyword_rules(park: &ParkProfile, set: &mut RecommendationSet) {
    let haystack = [
        park.sector.as_str(),
        park.notes.as_deref().unwrap_or_default(),
        park.status.as_str(),
    ]
    .join("\n")
    .to_lowercase();

    for group in KEYWORD_GROUPS.iter().filter(|group| group.matches(&haystack)) {
        set.push_opportunity(Opportunity::canned(group.opportunity));
        if let Some((title, detail)) = group.flag {
            set.flags.push(Flag::new(title, detail));
        }
    }
}

pub(crate) fn apply_scale_rule(
    park: &ParkProfile,
    thresholds: &OpportunityThresholds,
    set: &mut RecommendationSet,
) {
    let large_site = park
        .size_sqft
        .is_some_and(|size| size > thresholds.campus_scale_min_sqft);
    let many_tenants = parse_tenant_count(&park.tenants)
        .is_some_and(|count| count > thresholds.campus_scale_min_tenants);

    if large_site || many_tenants {
        set.push_opportunity(Opportunity::canned(OpportunityKind::CampusScaleNetwork));
    }
}

pub(crate) fn apply_registry_rule(
    companies: Option<&[CompanyRecord]>,
    thresholds: &OpportunityThresholds,
    set: &mut RecommendationSet,
) {
    let active = companies
        .unwrap_or_default()
        .iter()
        .filter(|company| company.is_active())
        .count();

    if active >= thresholds.tenant_community_min_companies {
        set.push_opportunity(Opportunity {
            kind: OpportunityKind::TenantCommunity,
            text: format!(
                "Tenant community connectivity: {active} active companies identified in \
                 this postcode — opportunity for a campus-wide connectivity programme \
                 covering all tenants"
            ),
        });
    }
}

/// First run of digits before any `+` or `,` in free text such as
/// "120+ companies" or "c. 60 tenants".
pub(crate) fn parse_tenant_count(tenants: &str) -> Option<u64> {
    let head = tenants.split(['+', ',']).next().unwrap_or_default();
    let digits: String = head
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_counts_parse_leading_figures() {
        assert_eq!(parse_tenant_count("120+ companies"), Some(120));
        assert_eq!(parse_tenant_count("c. 60 tenants, 2,000 staff"), Some(60));
        assert_eq!(parse_tenant_count("1,200 employees"), Some(1));
        assert_eq!(parse_tenant_count("Over 250 organisations"), Some(250));
    }

    #[test]
    fn unparseable_tenant_counts_are_ignored() {
        assert_eq!(parse_tenant_count("Multiple tenants"), None);
        assert_eq!(parse_tenant_count(""), None);
        assert_eq!(parse_tenant_count("+40 more"), None);
    }

    #[test]
    fn missing_broadband_figures_read_as_zero() {
        let mut set = RecommendationSet::default();
        let coverage = AreaCoverageRecord {
            superfast_pct: Some(95.0),
            ..AreaCoverageRecord::default()
        };
        apply_threshold_rules(&coverage, &OpportunityThresholds::default(), &mut set);
        assert_eq!(
            set.kinds(),
            vec![OpportunityKind::FullFibreUpgrade, OpportunityKind::GigabitUpgrade]
        );
        assert_eq!(set.flags.len(), 2);
        assert_eq!(
            set.flags[0].detail,
            "Only 0% of premises in this local authority have full fibre availability \
             — below the threshold expected for a science and innovation campus"
        );
        assert_eq!(
            set.flags[1].detail,
            "Gigabit-capable coverage at 0% \
             — likely insufficient for research data transmission demands"
        );
    }

    #[test]
    fn missing_mobile_figures_use_group_defaults() {
        let mut set = RecommendationSet::default();
        let coverage = AreaCoverageRecord {
            indoor_voice_pct: Some(99.0),
            ..AreaCoverageRecord::default()
        };
        apply_threshold_rules(&coverage, &OpportunityThresholds::default(), &mut set);
        assert_eq!(set.kinds(), vec![OpportunityKind::FiveGReadiness]);
        assert_eq!(
            set.flags[0].detail,
            "Outdoor 5G coverage at 0% — 5G readiness is low for a cutting-edge innovation campus"
        );
    }

    #[test]
    fn empty_record_triggers_no_threshold_rules() {
        let mut set = RecommendationSet::default();
        apply_threshold_rules(
            &AreaCoverageRecord::default(),
            &OpportunityThresholds::default(),
            &mut set,
        );
        assert!(set.opportunities.is_empty());
        assert!(set.flags.is_empty());
    }

    #[test]
    fn takeup_rule_fires_above_availability_floor() {
        let mut set = RecommendationSet::default();
        let coverage = AreaCoverageRecord {
            full_fibre_pct: Some(85.0),
            gigabit_pct: Some(88.0),
            ff_takeup_pct: Some(22.5),
            ..AreaCoverageRecord::default()
        };
        apply_threshold_rules(&coverage, &OpportunityThresholds::default(), &mut set);
        assert_eq!(set.kinds(), vec![OpportunityKind::FibreMigration]);
        assert_eq!(set.flags[0].title, "Full fibre take-up gap");
        assert_eq!(
            set.flags[0].detail,
            "Full fibre take-up at only 22.5% despite 85% availability — significant uptake gap"
        );
    }

    #[test]
    fn missing_takeup_counts_as_no_takeup() {
        let mut set = RecommendationSet::default();
        let coverage = AreaCoverageRecord {
            full_fibre_pct: Some(85.0),
            gigabit_pct: Some(88.0),
            ..AreaCoverageRecord::default()
        };
        apply_threshold_rules(&coverage, &OpportunityThresholds::default(), &mut set);
        assert_eq!(set.kinds(), vec![OpportunityKind::FibreMigration]);
        assert!(set.flags[0].detail.starts_with("Full fibre take-up at only 0% despite 85%"));
    }

    #[test]
    fn thresholds_are_strict_comparisons() {
        let mut set = RecommendationSet::default();
        let coverage = AreaCoverageRecord {
            full_fibre_pct: Some(60.0),
            gigabit_pct: Some(50.0),
            no_decent_pct: Some(2.0),
            indoor_4g_pct: Some(80.0),
            outdoor_5g_pct: Some(40.0),
            ff_takeup_pct: Some(10.0),
            ..AreaCoverageRecord::default()
        };
        apply_threshold_rules(&coverage, &OpportunityThresholds::default(), &mut set);
        assert!(set.opportunities.is_empty(), "{:?}", set.kinds());
    }
}
