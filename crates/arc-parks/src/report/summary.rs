use super::views::{
    AreaMatchView, AreaParkRow, AreaReport, OpportunityTally, ParkReport, RegistrySummary,
    StatusCount, NEXT_STEPS,
};
use crate::catalog::{AreaFilter, ParkProfile};
use crate::coverage::{score_connectivity, score_mobile, AreaMatch, RagStatus};
use crate::opportunities::{OpportunityEngine, OpportunityKind};
use crate::registry::{classify_companies, RegistryLookup};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Active companies listed in a document.
pub const SAMPLE_COMPANY_LIMIT: usize = 8;
/// Opportunity kinds listed in an area summary.
pub const COMMON_OPPORTUNITY_LIMIT: usize = 5;

/// Assembles a park report from already-fetched inputs. Pure.
pub fn build_park_report(
    park: &ParkProfile,
    area: Option<AreaMatch<'_>>,
    lookup: &RegistryLookup,
    engine: &OpportunityEngine,
    generated_at: DateTime<Utc>,
) -> ParkReport {
    let coverage = area.as_ref().and_then(AreaMatch::coverage);
    let connectivity = score_connectivity(coverage.as_ref());
    let mobile = score_mobile(coverage.as_ref());

    let companies = lookup.search().map(|search| search.companies.as_slice());
    let recommendations = engine.evaluate(park, coverage.as_ref(), companies);

    ParkReport {
        park: park.clone(),
        area: area.map(|found| AreaMatchView {
            authority: found.authority.to_string(),
            match_kind: found.kind,
        }),
        coverage,
        connectivity: connectivity.into(),
        mobile: mobile.into(),
        registry: summarize_registry(lookup),
        recommendations,
        next_steps: NEXT_STEPS.to_vec(),
        generated_at,
    }
}

fn summarize_registry(lookup: &RegistryLookup) -> RegistrySummary {
    match lookup {
        RegistryLookup::Found(search) => RegistrySummary {
            available: true,
            absent_reason: None,
            absent_reason_label: None,
            total_results: search.total_results,
            active_companies: search.active_count(),
            sectors: classify_companies(&search.companies),
            sample_companies: search
                .active_companies()
                .take(SAMPLE_COMPANY_LIMIT)
                .cloned()
                .collect(),
        },
        RegistryLookup::Absent(reason) => RegistrySummary {
            available: false,
            absent_reason: Some(*reason),
            absent_reason_label: Some(reason.label()),
            total_results: 0,
            active_companies: 0,
            sectors: Vec::new(),
            sample_companies: Vec::new(),
        },
    }
}

impl ParkReport {
    pub fn to_row(&self) -> AreaParkRow {
        AreaParkRow {
            park_id: self.park.id.clone(),
            park_name: self.park.name.clone(),
            region: self.park.region.clone(),
            cluster: self.park.cluster.clone(),
            local_authority: self.park.local_authority.clone(),
            matched_authority: self.area.as_ref().map(|area| area.authority.clone()),
            connectivity: self.connectivity.clone(),
            mobile: self.mobile.clone(),
            active_companies: self
                .registry
                .available
                .then_some(self.registry.active_companies),
            opportunities: self
                .recommendations
                .opportunities
                .iter()
                .map(|opportunity| opportunity.text.clone())
                .collect(),
            flag_titles: self
                .recommendations
                .flags
                .iter()
                .map(|flag| flag.title.clone())
                .collect(),
        }
    }
}

/// Aggregates park reports. Rows are ordered by connectivity score, highest
/// first, with unscored parks last and ties kept in catalog order.
pub fn build_area_report(
    filter: &AreaFilter,
    reports: &[ParkReport],
    generated_at: DateTime<Utc>,
) -> AreaReport {
    let mut parks: Vec<AreaParkRow> = reports.iter().map(ParkReport::to_row).collect();
    parks.sort_by_key(|row| Reverse(row.connectivity.score));

    let status_counts = RagStatus::ordered()
        .into_iter()
        .map(|status| StatusCount {
            status,
            status_label: status.label(),
            parks: parks
                .iter()
                .filter(|row| row.connectivity.status == status)
                .count(),
        })
        .filter(|count| count.parks > 0)
        .collect();

    AreaReport {
        scope: filter.describe(),
        filter: filter.clone(),
        generated_at,
        park_count: parks.len(),
        average_connectivity: average(parks.iter().filter_map(|row| row.connectivity.score)),
        average_mobile: average(parks.iter().filter_map(|row| row.mobile.score)),
        status_counts,
        common_opportunities: tally_opportunities(reports),
        parks,
    }
}

fn tally_opportunities(reports: &[ParkReport]) -> Vec<OpportunityTally> {
    let mut counts: BTreeMap<OpportunityKind, usize> = BTreeMap::new();
    for report in reports {
        for kind in report.recommendations.kinds() {
            *counts.entry(kind).or_default() += 1;
        }
    }

    let mut tallies: Vec<OpportunityTally> = counts
        .into_iter()
        .map(|(kind, parks)| OpportunityTally {
            kind,
            label: kind.label(),
            parks,
        })
        .collect();
    tallies.sort_by_key(|tally| Reverse(tally.parks));
    tallies.truncate(COMMON_OPPORTUNITY_LIMIT);
    tallies
}

/// Mean rounded to one decimal place.
fn average(scores: impl Iterator<Item = u8>) -> Option<f64> {
    let (sum, count) = scores.fold((0u32, 0u32), |(sum, count), score| {
        (sum + u32::from(score), count + 1)
    });
    (count > 0).then(|| (f64::from(sum) / f64::from(count) * 10.0).round() / 10.0)
}
