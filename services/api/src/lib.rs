mod cli;
mod evaluate;
mod infra;
mod routes;
mod scheme;
mod server;

use marking_engine::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
