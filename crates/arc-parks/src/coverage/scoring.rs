use super::domain::{AreaCoverageRecord, ScoreResult};

/// Weight and cap for one scored input: contributes `min(cap, value * weight)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component {
    pub weight: f64,
    pub cap: f64,
}

impl Component {
    const fn new(weight: f64, cap: f64) -> Self {
        Self { weight, cap }
    }

    fn contribution(self, value: Option<f64>) -> f64 {
        (value.unwrap_or(0.0) * self.weight).min(self.cap)
    }
}

pub const FULL_FIBRE: Component = Component::new(0.4, 40.0);
pub const GIGABIT: Component = Component::new(0.3, 20.0);
pub const SUPERFAST: Component = Component::new(0.2, 20.0);
/// Points available when nobody lacks decent broadband.
pub const NO_DECENT_CEILING: f64 = 20.0;
/// Points lost per percentage point of premises without decent broadband.
pub const NO_DECENT_PENALTY: f64 = 2.0;

pub const INDOOR_4G: Component = Component::new(0.4, 40.0);
pub const OUTDOOR_5G: Component = Component::new(0.4, 40.0);
pub const INDOOR_VOICE: Component = Component::new(0.2, 20.0);

/// Fixed-weight broadband score.
pub fn score_connectivity(record: Option<&AreaCoverageRecord>) -> ScoreResult {
    let Some(record) = record else {
        return ScoreResult::absent();
    };

    let no_decent = record.no_decent_pct.unwrap_or(0.0);
    let raw = FULL_FIBRE.contribution(record.full_fibre_pct)
        + GIGABIT.contribution(record.gigabit_pct)
        + SUPERFAST.contribution(record.superfast_pct)
        + (NO_DECENT_CEILING - no_decent * NO_DECENT_PENALTY).max(0.0);

    ScoreResult::scored(to_score(raw))
}

/// Fixed-weight mobile score; absent when the record carries no mobile figures.
pub fn score_mobile(record: Option<&AreaCoverageRecord>) -> ScoreResult {
    let Some(record) = record.filter(|record| record.has_mobile_fields()) else {
        return ScoreResult::absent();
    };

    let raw = INDOOR_4G.contribution(record.indoor_4g_pct)
        + OUTDOOR_5G.contribution(record.outdoor_5g_pct)
        + INDOOR_VOICE.contribution(record.indoor_voice_pct);

    ScoreResult::scored(to_score(raw))
}

fn to_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}
