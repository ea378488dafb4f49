//! Company registry lookups and SIC-based sector classification.

mod client;
mod domain;
mod sectors;

pub use client::{
    CompaniesHouseClient, CompanyRegistry, DisabledRegistry, RegistryClient, RegistryError,
};
pub use domain::{AbsentReason, CompanyRecord, CompanySearch, RegistryLookup};
pub use sectors::{classify_companies, SectorCount, SECTOR_CODE_PREFIXES};
