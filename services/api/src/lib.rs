mod cli;
mod infra;
mod output;
mod routes;
mod server;

use arc_parks::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
