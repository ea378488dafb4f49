use super::domain::{AreaCoverageRecord, AreaFields, ConnectivityFields, MobileFields, RawAreaEntry};

/// Resolves any dataset row shape into the canonical record.
///
/// Returns `None` for missing or empty rows, rows carrying none of the
/// canonical fields, and all-zero placeholder rows.
pub fn normalize(entry: Option<&RawAreaEntry>) -> Option<AreaCoverageRecord> {
    let record = match entry? {
        RawAreaEntry::Empty => return None,
        RawAreaEntry::Flat(fields) => {
            from_parts(Some(&fields.connectivity), Some(&fields.mobile), None)
        }
        RawAreaEntry::Nested {
            connectivity,
            mobile,
            fallback,
        } => from_parts(connectivity.as_ref(), mobile.as_ref(), Some(fallback)),
    };

    if !record.has_any_field() || record.is_placeholder() {
        return None;
    }

    Some(record)
}

fn from_parts(
    connectivity: Option<&ConnectivityFields>,
    mobile: Option<&MobileFields>,
    fallback: Option<&AreaFields>,
) -> AreaCoverageRecord {
    let conn = |pick: fn(&ConnectivityFields) -> Option<f64>| {
        connectivity
            .and_then(pick)
            .or_else(|| fallback.and_then(|flat| pick(&flat.connectivity)))
    };
    let mob = |pick: fn(&MobileFields) -> Option<f64>| {
        mobile
            .and_then(pick)
            .or_else(|| fallback.and_then(|flat| pick(&flat.mobile)))
    };

    AreaCoverageRecord {
        full_fibre_pct: conn(|c| c.full_fibre_pct),
        gigabit_pct: conn(|c| c.gigabit_pct),
        superfast_pct: conn(|c| c.superfast_pct),
        no_decent_pct: conn(|c| c.no_decent_pct),
        ff_takeup_pct: conn(|c| c.ff_takeup_pct),
        avg_data_usage_gb: conn(|c| c.avg_data_usage_gb),
        indoor_4g_pct: mob(|m| m.indoor_4g_all_operators_pct),
        outdoor_4g_pct: mob(|m| m.outdoor_4g_all_operators_pct),
        outdoor_5g_pct: mob(|m| m.outdoor_5g_all_operators_pct),
        indoor_voice_pct: mob(|m| m.indoor_voice_all_operators_pct),
    }
}
