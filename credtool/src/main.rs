use std::error::Error;

use clap::Parser;
use tracing::info;

use credtool::bootstrap::state::AppState;
use credtool::cli::{Cli, Commands};
use credtool::config_loader;
use credtool::observability;

use planhive_adapters::outgoing::passwords::argon2::Argon2PasswordHasher;
use planhive_application::ports::outgoing::password_hasher::PasswordHasherPort;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config_loader::load_config()?;
    observability::tracing::setup_logging(&config)?;

    info!("Configuration loaded successfully");
    info!("Database URL: {}", config.db.redacted_url());

    match cli.command {
        Commands::Hash { password } => {
            let hasher = Argon2PasswordHasher::from_config(&config.credentials.argon2)?;
            print_line(&hasher.hash(&password)?);
        }
        Commands::Verify {
            password,
            stored_secret,
        } => {
            let hasher = Argon2PasswordHasher::from_config(&config.credentials.argon2)?;
            let matched = hasher.verify(&password, &stored_secret)?;
            print_line(if matched { "match" } else { "no match" });
        }
        Commands::Migrate => {
            let state = AppState::new(&config)?;
            sqlx::migrate!().run(&state.pool).await?;
            info!("database migrations applied");
        }
        Commands::RehashLegacy => {
            let state = AppState::new(&config)?;
            let migrated = state.maintenance.rehash_legacy_credentials().await?;
            info!(migrated, "legacy credentials rehashed");
            print_line(&format!("rehashed {migrated} legacy credentials"));
        }
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{line}");
}
