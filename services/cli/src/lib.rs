mod cli;
mod commands;

use carbon_footprint::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
