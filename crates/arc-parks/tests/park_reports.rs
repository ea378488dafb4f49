use arc_parks::catalog::{AreaFilter, ParkCatalog};
use arc_parks::coverage::{AreaDataset, MatchKind, MatchPolicy, RagStatus};
use arc_parks::opportunities::{OpportunityKind, OpportunityThresholds};
use arc_parks::registry::{
    AbsentReason, CompanyRecord, CompanyRegistry, CompanySearch, DisabledRegistry, RegistryLookup,
};
use arc_parks::report::{
    area_csv_string, document_file_name, render_area_document, render_park_document,
    ParkIntelService, ReportError,
};
use chrono::NaiveDate;
use std::sync::Arc;

const PARKS_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/parks.json");
const AREA_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/area.json");

/// Serves a fixed company list for one postcode and an empty page for the rest.
struct StubRegistry {
    postcode: &'static str,
    companies: Vec<CompanyRecord>,
}

impl CompanyRegistry for StubRegistry {
    async fn lookup(&self, postcode: &str) -> RegistryLookup {
        if postcode.trim().is_empty() {
            return RegistryLookup::Absent(AbsentReason::NoPostcode);
        }
        let companies = if postcode == self.postcode {
            self.companies.clone()
        } else {
            Vec::new()
        };
        RegistryLookup::Found(CompanySearch {
            total_results: companies.len() as u64,
            companies,
        })
    }
}

fn company(index: usize, status: &str, sic: &str) -> CompanyRecord {
    CompanyRecord {
        name: format!("Valley Tenant {index} Ltd"),
        status: status.to_string(),
        incorporated_on: NaiveDate::from_ymd_opt(2019, 4, 1),
        industry_codes: vec![sic.to_string()],
        company_number: Some(format!("0900{index:04}")),
        address_snippet: Some("Upper Valley, NT1 1AA".to_string()),
    }
}

fn valley_companies() -> Vec<CompanyRecord> {
    let mut companies: Vec<CompanyRecord> = (0..22)
        .map(|index| company(index, "active", if index % 2 == 0 { "72110" } else { "62012" }))
        .collect();
    companies.extend((22..25).map(|index| company(index, "dissolved", "21100")));
    companies
}

fn load_inputs() -> (Arc<ParkCatalog>, Arc<AreaDataset>) {
    let catalog = ParkCatalog::load(PARKS_FIXTURE).expect("fixture catalog loads");
    let dataset = AreaDataset::load_or_empty(AREA_FIXTURE);
    (Arc::new(catalog), Arc::new(dataset))
}

fn stub_service() -> ParkIntelService<StubRegistry> {
    let (catalog, dataset) = load_inputs();
    let registry = StubRegistry {
        postcode: "NT1 1AA",
        companies: valley_companies(),
    };
    ParkIntelService::new(catalog, dataset, Arc::new(registry), MatchPolicy::LongestKey)
}

#[test]
fn fixture_catalog_flattens_hierarchy_in_file_order() {
    let (catalog, dataset) = load_inputs();

    let ids: Vec<&str> = catalog.parks().iter().map(|park| park.id.as_str()).collect();
    assert_eq!(
        ids,
        ["quiet-works", "valley-bio", "city-innovation", "placeholder-park"]
    );

    let valley = catalog.find("VALLEY BIO PARK").expect("found by name");
    assert_eq!(valley.region.as_deref(), Some("North"));
    assert_eq!(valley.cluster.as_deref(), Some("Valley"));

    let city = catalog.find("city-innovation").expect("found by id");
    assert_eq!(city.size_sqft, Some(600_000));

    let regions = catalog.regions();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].name, "North");
    assert_eq!(regions[0].park_count, 2);

    assert_eq!(dataset.len(), 4);
}

#[tokio::test]
async fn weak_area_with_research_tenants_builds_full_profile() {
    let service = stub_service();

    let report = service.park_report("valley-bio").await.expect("report builds");

    let area = report.area.as_ref().expect("authority matched");
    assert_eq!(area.authority, "NORTH TESTSHIRE");
    assert_eq!(area.match_kind, MatchKind::Exact);

    assert_eq!(report.connectivity.score, Some(57));
    assert_eq!(report.connectivity.status, RagStatus::Amber);
    assert_eq!(report.mobile.score, Some(46));
    assert_eq!(report.mobile.status, RagStatus::Amber);

    assert!(report.registry.available);
    assert_eq!(report.registry.total_results, 25);
    assert_eq!(report.registry.active_companies, 22);
    assert_eq!(report.registry.sample_companies.len(), 8);
    assert!(report
        .registry
        .sample_companies
        .iter()
        .all(|company| company.is_active()));
    let sectors: Vec<(&str, usize)> = report
        .registry
        .sectors
        .iter()
        .map(|sector| (sector.label, sector.count))
        .collect();
    assert_eq!(
        sectors,
        [("Research & Development", 11), ("Software & IT Services", 11)]
    );

    assert_eq!(
        report.recommendations.kinds(),
        [
            OpportunityKind::FullFibreUpgrade,
            OpportunityKind::GigabitUpgrade,
            OpportunityKind::LastMile,
            OpportunityKind::IndoorMobile,
            OpportunityKind::FiveGReadiness,
            OpportunityKind::LifeSciencesData,
            OpportunityKind::TenantCommunity,
        ]
    );
    let community = report
        .recommendations
        .opportunities
        .last()
        .expect("tenant community opportunity");
    assert!(community.text.contains("22 active companies"));
    assert_eq!(report.recommendations.flags.len(), 6);
    assert_eq!(report.next_steps.len(), 4);
}

#[tokio::test]
async fn unmatched_authority_without_postcode_falls_back_to_baseline() {
    let service = stub_service();

    let report = service.park_report("Quiet Works").await.expect("report builds");

    assert!(report.area.is_none());
    assert!(report.coverage.is_none());
    assert_eq!(report.connectivity.score, None);
    assert_eq!(report.connectivity.display, "N/A");
    assert_eq!(report.mobile.status, RagStatus::Unknown);
    assert!(!report.registry.available);
    assert_eq!(report.registry.absent_reason, Some(AbsentReason::NoPostcode));
    assert_eq!(
        report.recommendations.kinds(),
        [OpportunityKind::BaselineReview]
    );
    assert!(report.recommendations.flags.is_empty());

    let document = render_park_document(&report);
    assert!(document.starts_with("# Quiet Works\n"));
    assert!(document.contains("Connectivity data not available for this local authority."));
    assert!(document.contains("Mobile coverage data not available."));
    assert!(!document.contains("## Registered Companies at Postcode"));
    assert!(
        document.contains("No significant infrastructure flags identified from available data.")
    );
}

#[tokio::test]
async fn placeholder_area_row_scores_as_absent_but_keeps_keyword_rules() {
    let service = stub_service();

    let report = service.park_report("placeholder-park").await.expect("report builds");

    let area = report.area.as_ref().expect("authority row exists");
    assert_eq!(area.authority, "PLACEHOLDER DISTRICT");
    assert!(report.coverage.is_none());
    assert_eq!(report.connectivity.status, RagStatus::Unknown);
    assert_eq!(
        report.recommendations.kinds(),
        [OpportunityKind::StartupPackages]
    );
}

#[tokio::test]
async fn partial_authority_match_uses_nested_figures() {
    let service = stub_service();

    let report = service.park_report("city-innovation").await.expect("report builds");

    let area = report.area.as_ref().expect("authority matched");
    assert_eq!(area.authority, "CITY OF EXAMPLE");
    assert_eq!(area.match_kind, MatchKind::Partial);
    assert_eq!(report.connectivity.score, Some(96));
    assert_eq!(report.mobile.score, Some(92));
    assert_eq!(
        report.recommendations.kinds(),
        [OpportunityKind::CampusScaleNetwork]
    );
    assert!(report.recommendations.flags.is_empty());
}

#[tokio::test]
async fn unknown_park_is_reported() {
    let service = stub_service();

    let err = service.park_report("  missing-park ").await.unwrap_err();
    assert!(matches!(err, ReportError::UnknownPark(ref id) if id == "missing-park"));
}

#[tokio::test]
async fn area_report_orders_rows_by_connectivity() {
    let service = stub_service();

    let report = service
        .area_report(&AreaFilter::default())
        .await
        .expect("area report builds");

    assert_eq!(report.scope, "All parks");
    assert_eq!(report.park_count, 4);
    let order: Vec<&str> = report.parks.iter().map(|row| row.park_id.as_str()).collect();
    assert_eq!(
        order,
        ["city-innovation", "valley-bio", "quiet-works", "placeholder-park"]
    );
    assert_eq!(report.average_connectivity, Some(76.5));
    assert_eq!(report.average_mobile, Some(69.0));

    let mix: Vec<(RagStatus, usize)> = report
        .status_counts
        .iter()
        .map(|count| (count.status, count.parks))
        .collect();
    assert_eq!(
        mix,
        [
            (RagStatus::Green, 1),
            (RagStatus::Amber, 1),
            (RagStatus::Unknown, 2)
        ]
    );
    assert_eq!(report.common_opportunities.len(), 5);
    assert_eq!(report.parks[2].active_companies, None);
    assert_eq!(report.parks[1].active_companies, Some(22));
}

#[tokio::test]
async fn area_report_respects_region_and_cluster_filters() {
    let service = stub_service();

    let filter = AreaFilter::new(Some(" south ".to_string()), Some("CITY".to_string()));
    let report = service.area_report(&filter).await.expect("area report builds");
    assert_eq!(report.scope, "south / CITY");
    assert_eq!(report.park_count, 2);

    let empty = AreaFilter::new(Some("East".to_string()), None);
    let err = service.area_report(&empty).await.unwrap_err();
    assert!(matches!(err, ReportError::EmptySelection(ref scope) if scope == "East"));
}

#[tokio::test]
async fn area_exports_render_rows_in_report_order() {
    let service = stub_service();
    let report = service
        .area_report(&AreaFilter::default())
        .await
        .expect("area report builds");

    let csv = area_csv_string(&report).expect("csv renders");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("rank,park_id,park_name,region,cluster,local_authority"));
    assert!(lines[1].starts_with(
        "1,city-innovation,City Innovation Quarter,South,City,Example,CITY OF EXAMPLE,\
         96,Green,92,Green,0,0,"
    ));
    assert!(lines[3]
        .starts_with("3,quiet-works,Quiet Works,North,,Nowhere Borough,,,Unknown,,Unknown,,0,"));

    let document = render_area_document(&report);
    assert!(document.starts_with("# Arc Parks Area Report: All parks\n"));
    assert!(document.contains("- Parks assessed: 4"));
    assert!(document
        .contains("| 1 | City Innovation Quarter | Example | 96/100 Green | 92/100 Green |"));
    assert!(document.contains("### Valley Bio Park"));
}

#[tokio::test]
async fn disabled_registry_reports_missing_credential() {
    let (catalog, dataset) = load_inputs();
    let service = ParkIntelService::new(
        catalog,
        dataset,
        Arc::new(DisabledRegistry),
        MatchPolicy::default(),
    );

    let report = service.park_report("valley-bio").await.expect("report builds");
    assert_eq!(report.registry.absent_reason, Some(AbsentReason::NoCredential));
    assert!(!report
        .recommendations
        .contains(OpportunityKind::TenantCommunity));

    let document = render_park_document(&report);
    assert!(document.contains("**Connectivity Score:** 57/100 (Amber)"));
    assert!(!document.contains("### Sample Active Companies"));
}

#[tokio::test]
async fn custom_thresholds_change_which_rules_fire() {
    let thresholds = OpportunityThresholds {
        full_fibre_min_pct: 95.0,
        ..OpportunityThresholds::default()
    };
    let service = stub_service().with_thresholds(thresholds);

    let report = service.park_report("city-innovation").await.expect("report builds");
    assert!(report
        .recommendations
        .contains(OpportunityKind::FullFibreUpgrade));
}

#[test]
fn document_names_are_stable() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 9).expect("valid date");
    assert_eq!(
        document_file_name("Valley Bio Park", date, "md"),
        "Arc_Parks_Valley_Bio_Park_20260309.md"
    );
}
