use crate::output::{list_parks, write_area_report, write_park_report};
use crate::server;
use arc_parks::error::AppError;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Arc Parks Intelligence",
    about = "Profile connectivity and commercial opportunities across Oxford-Cambridge Arc \
             science parks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List catalog parks, optionally narrowed to a region or cluster
    Parks(SelectionArgs),
    /// Generate a park or area report
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Full intelligence profile for one park
    Park(ParkReportArgs),
    /// Ranked summary across a region or cluster
    Area(AreaReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SelectionArgs {
    /// Region name (case-insensitive)
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// Cluster name within the region (case-insensitive)
    #[arg(long)]
    pub(crate) cluster: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ParkReportArgs {
    /// Park id or exact park name
    pub(crate) park: String,
    #[arg(long, value_enum, default_value_t = ParkFormat::Markdown)]
    pub(crate) format: ParkFormat,
    /// File or directory to write to; prints to stdout when omitted
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct AreaReportArgs {
    #[command(flatten)]
    pub(crate) selection: SelectionArgs,
    #[arg(long, value_enum, default_value_t = AreaFormat::Markdown)]
    pub(crate) format: AreaFormat,
    /// File or directory to write to; prints to stdout when omitted
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParkFormat {
    Markdown,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AreaFormat {
    Markdown,
    Json,
    Csv,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Parks(args) => list_parks(args),
        Command::Report {
            command: ReportCommand::Park(args),
        } => write_park_report(args).await,
        Command::Report {
            command: ReportCommand::Area(args),
        } => write_area_report(args).await,
    }
}
