use crate::cli::{AreaFormat, AreaReportArgs, ParkFormat, ParkReportArgs, SelectionArgs};
use crate::infra::{build_service, ParkService};
use arc_parks::catalog::{AreaFilter, ParkCatalog};
use arc_parks::config::AppConfig;
use arc_parks::error::AppError;
use arc_parks::report::{
    area_csv_string, document_file_name, render_area_document, render_park_document, ReportError,
};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn list_parks(args: SelectionArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = ParkCatalog::load(&config.data.catalog_path)?;
    let filter = AreaFilter::new(args.region, args.cluster);

    println!("{}", filter.describe());
    let mut shown = 0usize;
    for park in catalog.filter(&filter) {
        shown += 1;
        println!(
            "  {:<32} {:<42} {:<10} {}",
            park.id, park.name, park.postcode, park.local_authority
        );
    }
    println!("{shown} of {} parks", catalog.len());
    Ok(())
}

pub(crate) async fn write_park_report(args: ParkReportArgs) -> Result<(), AppError> {
    let service = load_service()?;
    let report = service.park_report(&args.park).await?;

    let (body, extension) = match args.format {
        ParkFormat::Markdown => (render_park_document(&report), "md"),
        ParkFormat::Json => (to_json(&report)?, "json"),
    };
    let default_name = document_file_name(&report.park.name, Utc::now().date_naive(), extension);
    emit(&body, args.output.as_deref(), &default_name)
}

pub(crate) async fn write_area_report(args: AreaReportArgs) -> Result<(), AppError> {
    let service = load_service()?;
    let filter = AreaFilter::new(args.selection.region, args.selection.cluster);
    let report = service.area_report(&filter).await?;

    let (body, extension) = match args.format {
        AreaFormat::Markdown => (render_area_document(&report), "md"),
        AreaFormat::Json => (to_json(&report)?, "json"),
        AreaFormat::Csv => (area_csv_string(&report)?, "csv"),
    };
    let default_name = document_file_name(&report.scope, Utc::now().date_naive(), extension);
    emit(&body, args.output.as_deref(), &default_name)
}

fn load_service() -> Result<ParkService, AppError> {
    let config = AppConfig::load()?;
    build_service(&config)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Prints to stdout, or writes to `output`. A directory receives the default
/// file name.
fn emit(body: &str, output: Option<&Path>, default_name: &str) -> Result<(), AppError> {
    let Some(output) = output else {
        print!("{body}");
        if !body.ends_with('\n') {
            println!();
        }
        return Ok(());
    };

    let target = resolve_target(output, default_name);
    fs::write(&target, body)?;
    eprintln!("wrote {}", target.display());
    Ok(())
}

fn resolve_target(output: &Path, default_name: &str) -> PathBuf {
    if output.is_dir() {
        output.join(default_name)
    } else {
        output.to_path_buf()
    }
}
