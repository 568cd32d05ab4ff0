use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "credtool")]
#[command(about = "Credential maintenance for the PlanHive backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash a plaintext password into its stored form
    Hash {
        password: String,
    },

    /// Check a plaintext password against a stored secret
    Verify {
        password: String,
        stored_secret: String,
    },

    /// Apply database migrations
    Migrate,

    /// Rewrite legacy plaintext credentials in salted form
    RehashLegacy,
}
