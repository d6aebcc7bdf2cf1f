//! CREDshop CLI - catalog inspection and persisted-state management.
//!
//! # Usage
//!
//! ```bash
//! # List the live catalog, filtered like the storefront search box
//! credshop catalog list --query backpack --category "men's clothing"
//!
//! # Show or empty the persisted cart
//! credshop cart show
//! credshop cart clear
//!
//! # Show the rewards balance
//! credshop rewards show
//!
//! # Point at another data directory
//! credshop --data-dir /var/lib/credshop cart show
//! ```
//!
//! # Commands
//!
//! - `catalog list` - Fetch and filter the product catalog
//! - `cart show` / `cart clear` - Inspect or empty the saved cart
//! - `rewards show` - Print the rewards balance

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "credshop")]
#[command(author, version, about = "CREDshop CLI tools")]
struct Cli {
    /// Directory holding the persisted cart and rewards
    #[arg(long, global = true, env = "CREDSHOP_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Inspect the rewards balance
    Rewards {
        #[command(subcommand)]
        action: RewardsAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Fetch the catalog and print the products passing the filter
    List {
        /// Text matched against title and description
        #[arg(short, long, default_value = "")]
        query: String,

        /// Exact category label, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the saved cart
    Show,
    /// Delete the saved cart
    Clear,
}

#[derive(Subcommand)]
enum RewardsAction {
    /// Print the rewards balance
    Show,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { query, category } => {
                commands::catalog::list(&query, &category).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&cli.data_dir)?,
            CartAction::Clear => commands::cart::clear(&cli.data_dir)?,
        },
        Commands::Rewards { action } => match action {
            RewardsAction::Show => commands::rewards::show(&cli.data_dir)?,
        },
    }
    Ok(())
}
