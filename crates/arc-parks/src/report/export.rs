use super::service::ReportError;
use super::views::AreaReport;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct AreaCsvRow<'a> {
    rank: usize,
    park_id: &'a str,
    park_name: &'a str,
    region: &'a str,
    cluster: &'a str,
    local_authority: &'a str,
    matched_authority: &'a str,
    connectivity_score: Option<u8>,
    connectivity_status: &'static str,
    mobile_score: Option<u8>,
    mobile_status: &'static str,
    active_companies: Option<usize>,
    flag_count: usize,
    top_opportunity: &'a str,
}

/// Writes one CSV row per park, in report order, with a header row.
pub fn write_area_csv<W: Write>(report: &AreaReport, writer: W) -> Result<(), ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for (index, row) in report.parks.iter().enumerate() {
        csv.serialize(AreaCsvRow {
            rank: index + 1,
            park_id: &row.park_id,
            park_name: &row.park_name,
            region: row.region.as_deref().unwrap_or_default(),
            cluster: row.cluster.as_deref().unwrap_or_default(),
            local_authority: &row.local_authority,
            matched_authority: row.matched_authority.as_deref().unwrap_or_default(),
            connectivity_score: row.connectivity.score,
            connectivity_status: row.connectivity.status_label,
            mobile_score: row.mobile.score,
            mobile_status: row.mobile.status_label,
            active_companies: row.active_companies,
            flag_count: row.flag_titles.len(),
            top_opportunity: row
                .opportunities
                .first()
                .map(String::as_str)
                .unwrap_or_default(),
        })?;
    }
    csv.flush()?;
    Ok(())
}

pub fn area_csv_string(report: &AreaReport) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    write_area_csv(report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| ReportError::Encoding(err.to_string()))
}
