mod cli;
mod infra;
mod routes;
mod server;

use oc_lettings::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
