//! oxide-ddl CLI
//!
//! Command-line tool for rendering SQLite table definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_ddl_cli::{Catalog, SchemaDocument};

/// Render SQLite CREATE TABLE statements from a JSON schema document.
#[derive(Parser)]
#[command(name = "oxide-ddl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema document (JSON).
    #[arg(short, long, env = "OXIDE_DDL_SCHEMA")]
    schema: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the CREATE TABLE statements.
    Render {
        /// Table to render (all if not specified).
        #[arg(short, long)]
        table: Option<String>,

        /// Terminate each statement with a semicolon.
        #[arg(long)]
        semicolon: bool,
    },

    /// Print a debug description of the tables.
    Describe {
        /// Table to describe (all if not specified).
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Validate every table without printing DDL.
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries DDL
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let document = SchemaDocument::from_path(&cli.schema)?;
    let catalog = Catalog::new(document)?;

    match cli.command {
        Commands::Render { table, semicolon } => {
            for sql in catalog.render(table.as_deref(), semicolon)? {
                println!("{sql}");
            }
        }

        Commands::Describe { table } => {
            let described = catalog.describe(table.as_deref())?;
            println!("{}", described.join("\n\n"));
        }

        Commands::Check => {
            let count = catalog.check()?;
            info!("{count} table(s) are valid.");
        }
    }

    Ok(())
}
