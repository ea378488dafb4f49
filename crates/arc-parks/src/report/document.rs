//! Markdown rendering for park and area reports.

use super::views::{AreaReport, ParkReport, ScoreView};
use crate::coverage::format_figure;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt::{self, Display, Formatter};

const COMPANY_NAME_WIDTH: usize = 45;
const SIC_COLUMN_WIDTH: usize = 30;
const FILE_STEM_WIDTH: usize = 40;
const AREA_HIGHLIGHT_OPPORTUNITIES: usize = 3;

pub fn render_park_document(report: &ParkReport) -> String {
    ParkDocument(report).to_string()
}

pub fn render_area_document(report: &AreaReport) -> String {
    AreaDocument(report).to_string()
}

/// `Arc_Parks_<name>_<YYYYMMDD>.<extension>`, with the name reduced to a
/// filesystem- and header-safe stem.
pub fn document_file_name(name: &str, date: NaiveDate, extension: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .filter_map(|ch| match ch {
            ' ' => Some('_'),
            '/' => Some('-'),
            ch if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') => Some(ch),
            _ => None,
        })
        .take(FILE_STEM_WIDTH)
        .collect();
    format!("Arc_Parks_{stem}_{}.{extension}", date.format("%Y%m%d"))
}

struct ParkDocument<'a>(&'a ParkReport);

impl Display for ParkDocument<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let park = &report.park;

        writeln!(f, "# {}", park.name)?;
        writeln!(f)?;
        writeln!(f, "{}", park.subtitle())?;
        writeln!(f)?;

        writeln!(f, "## Park Profile")?;
        writeln!(f)?;
        table_header(f, "Field", "Value")?;
        if let Some(region) = &park.region {
            table_row(f, "Region", region)?;
        }
        if let Some(cluster) = &park.cluster {
            table_row(f, "Cluster", cluster)?;
        }
        table_row(f, "Location", &park.location)?;
        table_row(f, "County", &park.county)?;
        table_row(f, "Postcode", &park.postcode)?;
        table_row(f, "Local Authority", &park.local_authority)?;
        table_row(f, "Sector Focus", &park.sector)?;
        table_row(f, "Tenants / Scale", &park.tenants)?;
        table_row(f, "Operator", &park.operator)?;
        table_row(f, "Status", &park.status)?;
        if let Some(size) = park.size_sqft {
            table_row(f, "Size (sq ft)", &thousands(size))?;
        }
        if let Some(website) = &park.website {
            table_row(f, "Website", website)?;
        }
        if let Some(notes) = &park.notes {
            writeln!(f)?;
            writeln!(f, "_{}_", notes.trim())?;
        }
        writeln!(f)?;

        writeln!(f, "## Connectivity Profile")?;
        writeln!(f)?;
        let authority = report
            .area
            .as_ref()
            .map(|area| area.authority.as_str())
            .unwrap_or(park.local_authority.as_str());
        writeln!(
            f,
            "_Source: Ofcom Connected Nations, local authority: {authority}. Figures cover the \
             whole authority area; campus provision may differ and an on-site survey is \
             recommended._"
        )?;
        writeln!(f)?;
        match report.coverage.as_ref().filter(|coverage| coverage.has_connectivity_fields()) {
            Some(coverage) => {
                score_line(f, "Connectivity Score", &report.connectivity)?;
                writeln!(f)?;
                table_header(f, "Measure", "Value")?;
                table_row(f, "Full Fibre available", &pct(coverage.full_fibre_pct, "of premises"))?;
                table_row(f, "Gigabit-capable", &pct(coverage.gigabit_pct, "of premises"))?;
                table_row(f, "Superfast (30Mbps+)", &pct(coverage.superfast_pct, "of premises"))?;
                table_row(f, "No decent broadband", &pct(coverage.no_decent_pct, "of premises"))?;
                table_row(
                    f,
                    "Full Fibre take-up",
                    &pct(coverage.ff_takeup_pct, "of available premises"),
                )?;
                table_row(
                    f,
                    "Avg monthly data usage",
                    &figure(coverage.avg_data_usage_gb, " GB per premises"),
                )?;
            }
            None => writeln!(
                f,
                "Connectivity data not available for this local authority. On-site survey required."
            )?,
        }
        writeln!(f)?;

        writeln!(f, "## Mobile Coverage")?;
        writeln!(f)?;
        match report.coverage.as_ref().filter(|coverage| coverage.has_mobile_fields()) {
            Some(coverage) => {
                score_line(f, "Mobile Score", &report.mobile)?;
                writeln!(f)?;
                table_header(f, "Measure", "Value")?;
                table_row(
                    f,
                    "Indoor 4G (all operators)",
                    &pct(coverage.indoor_4g_pct, "of premises"),
                )?;
                table_row(
                    f,
                    "Outdoor 4G (all operators)",
                    &pct(coverage.outdoor_4g_pct, "of premises"),
                )?;
                table_row(
                    f,
                    "Outdoor 5G (all operators)",
                    &pct(coverage.outdoor_5g_pct, "of premises"),
                )?;
                table_row(
                    f,
                    "Indoor voice (all operators)",
                    &pct(coverage.indoor_voice_pct, "of premises"),
                )?;
            }
            None => writeln!(f, "Mobile coverage data not available.")?,
        }
        writeln!(f)?;

        let registry = &report.registry;
        if registry.available {
            writeln!(f, "## Registered Companies at Postcode")?;
            writeln!(f)?;
            writeln!(
                f,
                "_Source: Companies House. Active companies registered at or near {}. \
                 Not every tenant is registered at this postcode._",
                park.postcode
            )?;
            writeln!(f)?;
            table_header(f, "Measure", "Value")?;
            table_row(f, "Total results found", &registry.total_results.to_string())?;
            table_row(f, "Active companies", &registry.active_companies.to_string())?;
            if !registry.sectors.is_empty() {
                let profile = registry
                    .sectors
                    .iter()
                    .map(|sector| format!("{} ({})", sector.label, sector.count))
                    .collect::<Vec<_>>()
                    .join(", ");
                table_row(f, "Sector profile", &profile)?;
            }

            if !registry.sample_companies.is_empty() {
                writeln!(f)?;
                writeln!(f, "### Sample Active Companies")?;
                writeln!(f)?;
                writeln!(f, "| Company Name | Status | Incorporated | SIC Codes |")?;
                writeln!(f, "|---|---|---|---|")?;
                for company in &registry.sample_companies {
                    let incorporated = company
                        .incorporated_on
                        .map(|date| date.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".to_string());
                    writeln!(
                        f,
                        "| {} | {} | {} | {} |",
                        cell(&truncate(&company.name, COMPANY_NAME_WIDTH)),
                        cell(&capitalize(&company.status)),
                        incorporated,
                        cell(&truncate(&company.industry_codes.join(", "), SIC_COLUMN_WIDTH)),
                    )?;
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "## Infrastructure Intelligence Flags")?;
        writeln!(f)?;
        writeln!(
            f,
            "The following observations come from public data and sector knowledge. They are \
             meant to inform commercial conversations, not to serve as definitive technical \
             assessments."
        )?;
        writeln!(f)?;
        if report.recommendations.flags.is_empty() {
            writeln!(f, "No significant infrastructure flags identified from available data.")?;
        } else {
            for flag in &report.recommendations.flags {
                writeln!(f, "- **{}:** {}", flag.title, flag.detail)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "## Commercial Opportunities")?;
        writeln!(f)?;
        writeln!(
            f,
            "Based on the data and sector context, these managed service and connectivity \
             opportunities are identified for this park:"
        )?;
        writeln!(f)?;
        for (index, opportunity) in report.recommendations.opportunities.iter().enumerate() {
            writeln!(f, "{}. {}", index + 1, opportunity.text)?;
        }
        writeln!(f)?;

        writeln!(f, "## Recommended Next Steps")?;
        writeln!(f)?;
        for (index, step) in report.next_steps.iter().enumerate() {
            writeln!(f, "{}. **{}:** {}", index + 1, step.title, step.detail)?;
        }
        writeln!(f)?;

        footer(f, report.generated_at)
    }
}

struct AreaDocument<'a>(&'a AreaReport);

impl Display for AreaDocument<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "# Arc Parks Area Report: {}", report.scope)?;
        writeln!(f)?;

        writeln!(f, "## Summary")?;
        writeln!(f)?;
        writeln!(f, "- Parks assessed: {}", report.park_count)?;
        writeln!(
            f,
            "- Average connectivity score: {}",
            average_text(report.average_connectivity)
        )?;
        writeln!(f, "- Average mobile score: {}", average_text(report.average_mobile))?;
        if !report.status_counts.is_empty() {
            let mix = report
                .status_counts
                .iter()
                .map(|count| format!("{} {}", count.status_label, count.parks))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "- Connectivity status mix: {mix}")?;
        }
        writeln!(f)?;

        writeln!(f, "## Parks by Connectivity Score")?;
        writeln!(f)?;
        writeln!(
            f,
            "| # | Park | Local Authority | Connectivity | Mobile | Active Companies | Flags |"
        )?;
        writeln!(f, "|---|---|---|---|---|---|---|")?;
        for (index, row) in report.parks.iter().enumerate() {
            let companies = row
                .active_companies
                .map(|count| count.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "| {} | {} | {} | {} | {} | {} | {} |",
                index + 1,
                cell(&row.park_name),
                cell(&row.local_authority),
                score_cell(&row.connectivity),
                score_cell(&row.mobile),
                companies,
                row.flag_titles.len(),
            )?;
        }
        writeln!(f)?;

        if !report.common_opportunities.is_empty() {
            writeln!(f, "## Most Common Opportunities")?;
            writeln!(f)?;
            for (index, tally) in report.common_opportunities.iter().enumerate() {
                let noun = if tally.parks == 1 { "park" } else { "parks" };
                writeln!(f, "{}. {} ({} {noun})", index + 1, tally.label, tally.parks)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "## Park Highlights")?;
        writeln!(f)?;
        for row in &report.parks {
            writeln!(f, "### {}", row.park_name)?;
            writeln!(f)?;
            if !row.flag_titles.is_empty() {
                writeln!(f, "Flags: {}", row.flag_titles.join(", "))?;
                writeln!(f)?;
            }
            for opportunity in row.opportunities.iter().take(AREA_HIGHLIGHT_OPPORTUNITIES) {
                writeln!(f, "- {opportunity}")?;
            }
            writeln!(f)?;
        }

        footer(f, report.generated_at)
    }
}

fn footer(f: &mut Formatter<'_>, generated_at: DateTime<Utc>) -> fmt::Result {
    writeln!(f, "---")?;
    writeln!(f)?;
    writeln!(
        f,
        "_Report generated: {} · Oxford-Cambridge Arc Digital Infrastructure Intelligence · \
         Internal Use Only · Data sources: Ofcom Connected Nations, Companies House, UKSPA. \
         Connectivity data is area-level (local authority) and may not reflect \
         campus-specific provision._",
        generated_at.format("%d %B %Y, %H:%M")
    )
}

fn table_header(f: &mut Formatter<'_>, left: &str, right: &str) -> fmt::Result {
    writeln!(f, "| {left} | {right} |")?;
    writeln!(f, "|---|---|")
}

fn table_row(f: &mut Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    writeln!(f, "| {} | {} |", label, cell(value))
}

fn score_line(f: &mut Formatter<'_>, label: &str, score: &ScoreView) -> fmt::Result {
    match score.score {
        Some(_) => writeln!(f, "**{label}:** {} ({})", score.display, score.status_label),
        None => writeln!(f, "**{label}:** Data not available for this area"),
    }
}

fn score_cell(score: &ScoreView) -> String {
    match score.score {
        Some(_) => format!("{} {}", score.display, score.status_label),
        None => score.display.clone(),
    }
}

fn pct(value: Option<f64>, suffix: &str) -> String {
    figure(value, &format!("% {suffix}"))
}

fn figure(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(value) => format!("{}{suffix}", format_figure(value)),
        None => "Not published".to_string(),
    }
}

fn average_text(value: Option<f64>) -> String {
    value
        .map(|average| format!("{}/100", format_figure(average)))
        .unwrap_or_else(|| "N/A".to_string())
}

fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}

fn capitalize(value: &str) -> String {
    let lower = value.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
