mod config;
mod http;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, connect};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{EmployeeInput, EmployeeService};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "employee-server", version, about = "Employee manager REST service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert demo employees.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing(ObsConfig::from_env())?;
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(cmd) => run_server(cmd).await,
        Command::Migrate(action) => match action {
            MigrateCommand::Up => migrate_up().await,
            MigrateCommand::Down => migrate_down().await,
        },
        Command::Seed => run_seed().await,
    }
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env();
    connect(&settings)
        .await
        .context("failed to open database pool")
}

async fn run_server(cmd: ServeCommand) -> Result<()> {
    let config = Arc::new(AppConfig::load()?);
    let pool = setup_pool().await?;
    ensure_migrations(&pool, cmd.allow_dirty).await?;
    let state = AppState::new(pool, config);
    http::serve(ServeConfig::from(&cmd), state).await
}

async fn ensure_migrations(pool: &DbPool, allow_dirty: bool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() && !allow_dirty {
        anyhow::bail!(
            "{} pending migration(s); run `employee-server migrate up` or pass --allow-dirty",
            pending.len()
        );
    }
    Ok(())
}

async fn migrate_up() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down() -> Result<()> {
    let pool = setup_pool().await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}

async fn run_seed() -> Result<()> {
    let pool = setup_pool().await?;
    let service = EmployeeService::new(pool);
    for input in demo_employees() {
        let employee = service
            .create(input)
            .await
            .context("failed to seed employee")?;
        info!(id = employee.id, code = %employee.employee_code, "seeded employee");
    }
    Ok(())
}

fn demo_employees() -> Vec<EmployeeInput> {
    [
        ("Ada Lovelace", "ada@example.test", "Analyst", "555-0101"),
        ("Grace Hopper", "grace@example.test", "Engineering Manager", "555-0102"),
        ("Alan Turing", "alan@example.test", "Research Engineer", "555-0103"),
    ]
    .into_iter()
    .map(|(name, email, job_title, phone)| EmployeeInput {
        id: None,
        name: Some(name.into()),
        email: Some(email.into()),
        job_title: Some(job_title.into()),
        phone_number: Some(phone.into()),
        image_url: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_flags() {
        let cli =
            Cli::try_parse_from(["employee-server", "serve", "--port", "9090", "--allow-dirty"])
                .unwrap();
        match cli.command {
            Command::Serve(cmd) => {
                assert_eq!(cmd.port, 9090);
                assert!(cmd.allow_dirty);
                assert_eq!(cmd.host.to_string(), "0.0.0.0");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_migrate_down() {
        let cli = Cli::try_parse_from(["employee-server", "migrate", "down"]).unwrap();
        assert!(matches!(cli.command, Command::Migrate(MigrateCommand::Down)));
    }

    #[test]
    fn demo_employees_have_no_preset_ids() {
        let demo = demo_employees();
        assert_eq!(demo.len(), 3);
        assert!(demo.iter().all(|e| e.id.is_none() && e.name.is_some()));
    }
}
