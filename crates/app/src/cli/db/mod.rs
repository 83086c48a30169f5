use clap::{Args, Subcommand};

mod migrate;
mod status;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate,

    /// List bundled migrations and whether each has been applied
    Status,
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    let database_url = command
        .database_url
        .ok_or_else(|| "DATABASE_URL is not set".to_string())?;

    match command.command {
        DbSubcommand::Migrate => migrate::run(&database_url).await,
        DbSubcommand::Status => status::run(&database_url).await,
    }
}
