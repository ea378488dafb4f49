pub mod catalog;
pub mod config;
pub mod coverage;
pub mod error;
mod fields;
pub mod opportunities;
pub mod registry;
pub mod report;
pub mod telemetry;
