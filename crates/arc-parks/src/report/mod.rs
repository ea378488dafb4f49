mod document;
mod export;
mod service;
mod summary;
mod views;

pub use document::{document_file_name, render_area_document, render_park_document};
pub use export::{area_csv_string, write_area_csv};
pub use service::{ParkIntelService, ReportError};
pub use summary::{
    build_area_report, build_park_report, COMMON_OPPORTUNITY_LIMIT, SAMPLE_COMPANY_LIMIT,
};
pub use views::{
    AreaMatchView, AreaParkRow, AreaReport, NextStep, OpportunityTally, ParkReport,
    RegistrySummary, ScoreView, StatusCount, NEXT_STEPS,
};
