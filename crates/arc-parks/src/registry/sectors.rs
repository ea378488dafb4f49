use super::domain::CompanyRecord;
use serde::Serialize;

/// Sector labels and the SIC code prefixes that place a company in them.
/// Table order is the order sectors are reported in.
pub const SECTOR_CODE_PREFIXES: &[(&str, &[&str])] = &[
    ("Research & Development", &["721", "722", "723"]),
    ("Software & IT Services", &["620", "631"]),
    ("Pharmaceuticals", &["210", "211", "212"]),
    ("Medical Devices / Electronics", &["321", "322", "325", "329"]),
    ("Engineering & Technical Consultancy", &["711", "712"]),
    ("Energy Technology", &["351"]),
    ("Telecommunications", &["611", "612", "613", "619"]),
    ("Financial Services / Investment", &["641", "642", "643", "649"]),
    ("Security Services", &["801", "802", "803"]),
    ("Management Consultancy", &["701", "702"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorCount {
    pub label: &'static str,
    pub count: usize,
}

/// Counts active companies per sector. A company counts once per sector but
/// may appear in several; malformed codes are ignored.
pub fn classify_companies(companies: &[CompanyRecord]) -> Vec<SectorCount> {
    let active: Vec<Vec<&str>> = companies
        .iter()
        .filter(|company| company.is_active())
        .map(|company| {
            company
                .industry_codes
                .iter()
                .map(|code| code.trim())
                .filter(|code| is_numeric_code(code))
                .collect()
        })
        .collect();

    SECTOR_CODE_PREFIXES
        .iter()
        .filter_map(|(label, prefixes)| {
            let count = active
                .iter()
                .filter(|codes| {
                    codes
                        .iter()
                        .any(|code| prefixes.iter().any(|prefix| code.starts_with(prefix)))
                })
                .count();
            (count > 0).then_some(SectorCount {
                label: *label,
                count,
            })
        })
        .collect()
}

fn is_numeric_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|byte| byte.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(status: &str, codes: &[&str]) -> CompanyRecord {
        CompanyRecord {
            name: "Test Co".to_string(),
            status: status.to_string(),
            incorporated_on: None,
            industry_codes: codes.iter().map(|code| code.to_string()).collect(),
            company_number: None,
            address_snippet: None,
        }
    }

    #[test]
    fn counts_sectors_in_table_order() {
        let companies = vec![
            company("active", &["62012"]),
            company("active", &["72110", "21100"]),
            company("active", &["72190"]),
        ];

        let sectors = classify_companies(&companies);
        assert_eq!(
            sectors,
            vec![
                SectorCount {
                    label: "Research & Development",
                    count: 2
                },
                SectorCount {
                    label: "Software & IT Services",
                    count: 1
                },
                SectorCount {
                    label: "Pharmaceuticals",
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn inactive_companies_never_count() {
        let companies = vec![
            company("dissolved", &["62012"]),
            company("liquidation", &["72110"]),
        ];
        assert!(classify_companies(&companies).is_empty());
    }

    #[test]
    fn company_counts_once_per_sector() {
        let companies = vec![company("active", &["72110", "72190", "72200"])];
        let sectors = classify_companies(&companies);
        assert_eq!(sectors.len(), 1);
        assert_eq!(sectors[0].count, 1);
    }

    #[test]
    fn malformed_codes_are_skipped() {
        let companies = vec![company("active", &["", "N/A", "62-01", " 35110 "])];
        let sectors = classify_companies(&companies);
        assert_eq!(
            sectors,
            vec![SectorCount {
                label: "Energy Technology",
                count: 1
            }]
        );
    }
}
