use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use tracing::error;
use warbler::config::db::{db_url, DbKind, DbProfile};
use warbler::{connect_db, AppError};

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Warbler database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Which database URL to use: DATABASE_URL (prod) or TEST_DATABASE_URL (test)
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,
}

async fn run(args: Args) -> Result<(), AppError> {
    let profile = match args.env {
        Env::Prod => DbProfile::Prod,
        Env::Test => DbProfile::Test,
    };

    let url = db_url(profile)?;
    if DbKind::from_url(&url)? == DbKind::SqliteMemory {
        return Err(AppError::config(
            "in-memory SQLite is discarded when the command exits; set TEST_DATABASE_URL to a file or Postgres database",
        ));
    }

    let conn = connect_db(&url).await?;
    migrate(&conn, args.command.into())
        .await
        .map_err(|e| AppError::migration(e.to_string()))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,warbler=info,sqlx=warn")
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!(error = %e, "Migration failed");
        std::process::exit(1);
    }
}
