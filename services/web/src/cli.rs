use crate::server;
use clap::{Args, Parser, Subcommand};
use oc_lettings::config::AppConfig;
use oc_lettings::error::AppError;
use oc_lettings::storage::Database;
use oc_lettings::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "oc-lettings-web",
    about = "Serve the lettings and profiles site",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default command)
    Serve(ServeArgs),
    /// Apply pending database migrations and exit
    Migrate(DatabaseArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) database: DatabaseArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DatabaseArgs {
    /// Override DATABASE_URL
    #[arg(long)]
    pub(crate) database_url: Option<String>,
}

impl DatabaseArgs {
    pub(crate) fn apply(&mut self, config: &mut AppConfig) {
        if let Some(url) = self.database_url.take() {
            config.database.url = url;
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Migrate(args) => migrate(args).await,
    }
}

async fn migrate(mut args: DatabaseArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    args.apply(&mut config);
    telemetry::init(&config.telemetry)?;

    let database = Database::connect(&config.database).await?;
    database.migrate().await?;
    info!(url = %config.database.url, "migrations applied");
    database.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_optional() {
        let cli = Cli::try_parse_from(["oc-lettings-web"]).expect("bare invocation parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "oc-lettings-web",
            "serve",
            "--port",
            "9000",
            "--database-url",
            "sqlite::memory:",
        ])
        .expect("serve flags parse");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.database.database_url.as_deref(), Some("sqlite::memory:"));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn migrate_takes_database_url() {
        let cli = Cli::try_parse_from(["oc-lettings-web", "migrate", "--database-url", "sqlite://x.db"])
            .expect("migrate flags parse");
        assert!(matches!(
            cli.command,
            Some(Command::Migrate(DatabaseArgs { database_url: Some(ref url) })) if url == "sqlite://x.db"
        ));
    }
}
