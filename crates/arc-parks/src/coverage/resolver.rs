use super::dataset::{AreaDataset, AreaEntry};
use super::domain::{AreaCoverageRecord, RawAreaEntry};
use super::normalizer::normalize;
use serde::Serialize;

/// How to choose among several partial (substring) matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Most specific key wins; equal lengths fall back to file order.
    #[default]
    LongestKey,
    /// First key in file order wins.
    FirstMatch,
}

impl MatchPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "longest" | "longest_key" | "longest-key" => Some(Self::LongestKey),
            "first" | "first_match" | "first-match" => Some(Self::FirstMatch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Partial,
}

/// Dataset row chosen for a free-text authority name.
#[derive(Debug, Clone, Copy)]
pub struct AreaMatch<'a> {
    pub authority: &'a str,
    pub kind: MatchKind,
    pub entry: &'a RawAreaEntry,
}

impl AreaMatch<'_> {
    pub fn coverage(&self) -> Option<AreaCoverageRecord> {
        normalize(Some(self.entry))
    }
}

pub(crate) fn normalize_key(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

impl AreaDataset {
    /// Exact key first; otherwise a bidirectional substring match.
    pub fn lookup(&self, local_authority: &str, policy: MatchPolicy) -> Option<AreaMatch<'_>> {
        let query = normalize_key(local_authority);
        if query.is_empty() {
            return None;
        }

        if let Some(entry) = self.exact(&query) {
            return Some(to_match(entry, MatchKind::Exact));
        }

        let mut candidates = self
            .entries()
            .iter()
            .filter(|entry| {
                query.contains(entry.key.as_str()) || entry.key.contains(query.as_str())
            });

        let chosen = match policy {
            MatchPolicy::FirstMatch => candidates.next(),
            MatchPolicy::LongestKey => candidates.fold(None, |best: Option<&AreaEntry>, entry| {
                match best {
                    Some(current) if current.key.len() >= entry.key.len() => Some(current),
                    _ => Some(entry),
                }
            }),
        };

        chosen.map(|entry| to_match(entry, MatchKind::Partial))
    }
}

fn to_match(entry: &AreaEntry, kind: MatchKind) -> AreaMatch<'_> {
    AreaMatch {
        authority: &entry.authority,
        kind,
        entry: &entry.raw,
    }
}

/// Looks up a park's local authority and normalizes the matched row.
pub fn resolve_area(
    local_authority: &str,
    dataset: &AreaDataset,
    policy: MatchPolicy,
) -> Option<AreaCoverageRecord> {
    dataset
        .lookup(local_authority, policy)
        .and_then(|found| found.coverage())
}
