//! Local-authority coverage: dataset loading, authority resolution, record
//! normalization and the two fixed-weight scorers.

mod dataset;
pub mod domain;
mod normalizer;
mod resolver;
pub mod scoring;

pub use dataset::{AreaDataset, AreaEntry};
pub use domain::{
    format_figure, AreaCoverageRecord, AreaFields, ConnectivityFields, MobileFields, RagStatus,
    RawAreaEntry, ScoreResult,
};
pub use normalizer::normalize;
pub use resolver::{resolve_area, AreaMatch, MatchKind, MatchPolicy};
pub use scoring::{score_connectivity, score_mobile};
