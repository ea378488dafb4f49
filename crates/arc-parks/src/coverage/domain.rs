use crate::fields::lenient_f64;
use serde::{Deserialize, Serialize};

/// Fixed broadband figures as published per local authority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityFields {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub full_fibre_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gigabit_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub superfast_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub no_decent_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ff_takeup_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub avg_data_usage_gb: Option<f64>,
}

impl ConnectivityFields {
    fn is_empty(&self) -> bool {
        self.full_fibre_pct.is_none()
            && self.gigabit_pct.is_none()
            && self.superfast_pct.is_none()
            && self.no_decent_pct.is_none()
            && self.ff_takeup_pct.is_none()
            && self.avg_data_usage_gb.is_none()
    }
}

/// All-operator mobile coverage figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MobileFields {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub indoor_4g_all_operators_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub outdoor_4g_all_operators_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub outdoor_5g_all_operators_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub indoor_voice_all_operators_pct: Option<f64>,
}

impl MobileFields {
    fn is_empty(&self) -> bool {
        self.indoor_4g_all_operators_pct.is_none()
            && self.outdoor_4g_all_operators_pct.is_none()
            && self.outdoor_5g_all_operators_pct.is_none()
            && self.indoor_voice_all_operators_pct.is_none()
    }
}

/// Flat row carrying connectivity and mobile fields side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaFields {
    #[serde(flatten)]
    pub connectivity: ConnectivityFields,
    #[serde(flatten)]
    pub mobile: MobileFields,
}

impl AreaFields {
    pub fn is_empty(&self) -> bool {
        self.connectivity.is_empty() && self.mobile.is_empty()
    }
}

/// One dataset row, in whichever shape the source file used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawAreaShape")]
pub enum RawAreaEntry {
    Empty,
    Flat(AreaFields),
    Nested {
        connectivity: Option<ConnectivityFields>,
        mobile: Option<MobileFields>,
        /// Flat fields found next to the groups; used where a group is silent.
        fallback: AreaFields,
    },
}

#[derive(Deserialize)]
struct RawAreaShape {
    #[serde(default)]
    connectivity: Option<ConnectivityFields>,
    #[serde(default)]
    mobile: Option<MobileFields>,
    #[serde(flatten)]
    flat: AreaFields,
}

impl From<RawAreaShape> for RawAreaEntry {
    fn from(shape: RawAreaShape) -> Self {
        let RawAreaShape {
            connectivity,
            mobile,
            flat,
        } = shape;

        if connectivity.is_some() || mobile.is_some() {
            RawAreaEntry::Nested {
                connectivity,
                mobile,
                fallback: flat,
            }
        } else if flat.is_empty() {
            RawAreaEntry::Empty
        } else {
            RawAreaEntry::Flat(flat)
        }
    }
}

/// Canonical coverage record consumed by every scorer and rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AreaCoverageRecord {
    pub full_fibre_pct: Option<f64>,
    pub gigabit_pct: Option<f64>,
    pub superfast_pct: Option<f64>,
    pub no_decent_pct: Option<f64>,
    pub ff_takeup_pct: Option<f64>,
    pub avg_data_usage_gb: Option<f64>,
    pub indoor_4g_pct: Option<f64>,
    pub outdoor_4g_pct: Option<f64>,
    pub outdoor_5g_pct: Option<f64>,
    pub indoor_voice_pct: Option<f64>,
}

impl AreaCoverageRecord {
    pub fn has_mobile_fields(&self) -> bool {
        self.indoor_4g_pct.is_some()
            || self.outdoor_4g_pct.is_some()
            || self.outdoor_5g_pct.is_some()
            || self.indoor_voice_pct.is_some()
    }

    pub fn has_connectivity_fields(&self) -> bool {
        self.full_fibre_pct.is_some()
            || self.gigabit_pct.is_some()
            || self.superfast_pct.is_some()
            || self.no_decent_pct.is_some()
            || self.ff_takeup_pct.is_some()
            || self.avg_data_usage_gb.is_some()
    }

    pub fn has_any_field(&self) -> bool {
        self.has_connectivity_fields() || self.has_mobile_fields()
    }

    /// Placeholder rows (merged authorities, unpublished areas) report zero for
    /// every headline figure.
    pub fn is_placeholder(&self) -> bool {
        [
            self.full_fibre_pct,
            self.gigabit_pct,
            self.indoor_4g_pct,
            self.outdoor_5g_pct,
        ]
        .iter()
        .all(|value| *value == Some(0.0))
    }
}

/// Red/Amber/Green rating derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RagStatus {
    Green,
    Amber,
    Red,
    Unknown,
}

impl RagStatus {
    pub const GREEN_MIN: u8 = 70;
    pub const AMBER_MIN: u8 = 40;

    pub const fn ordered() -> [Self; 4] {
        [Self::Green, Self::Amber, Self::Red, Self::Unknown]
    }

    pub const fn from_score(score: u8) -> Self {
        if score >= Self::GREEN_MIN {
            Self::Green
        } else if score >= Self::AMBER_MIN {
            Self::Amber
        } else {
            Self::Red
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Amber => "Amber",
            Self::Red => "Red",
            Self::Unknown => "Unknown",
        }
    }
}

/// Score in [0, 100], or `None` when the area has no usable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: Option<u8>,
    pub status: RagStatus,
}

impl ScoreResult {
    pub const fn absent() -> Self {
        Self {
            score: None,
            status: RagStatus::Unknown,
        }
    }

    pub const fn scored(score: u8) -> Self {
        Self {
            score: Some(score),
            status: RagStatus::from_score(score),
        }
    }

    pub fn display(&self) -> String {
        match self.score {
            Some(score) => format!("{score}/100"),
            None => "N/A".to_string(),
        }
    }
}

/// Renders a percentage or usage figure without a trailing `.0`.
pub fn format_figure(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.1}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
