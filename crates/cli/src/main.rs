//! Corner Shop CLI - catalog inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # List electronics under $90
//! cs-cli catalog list --category electronics --max-price 90
//!
//! # List the categories of a custom catalog
//! cs-cli catalog categories --file catalog.json
//!
//! # Show one product and its related products
//! cs-cli catalog show 2
//!
//! # Validate a catalog file before pointing CORNERSHOP_CATALOG_PATH at it
//! cs-cli catalog check catalog.json
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use cornershop_core::ProductId;

mod commands;

use commands::catalog::ListOptions;

#[derive(Parser)]
#[command(name = "cs-cli")]
#[command(author, version, about = "Corner Shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally filtered
    List {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Lowest price (inclusive)
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Highest price (inclusive)
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Case-insensitive text in the name or description
        #[arg(short, long)]
        search: Option<String>,

        /// Only featured products
        #[arg(long)]
        featured: bool,

        /// JSON catalog file (defaults to the built-in catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// List categories with product counts
    Categories {
        /// JSON catalog file (defaults to the built-in catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: ProductId,

        /// JSON catalog file (defaults to the built-in catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Validate a JSON catalog file
    Check {
        /// Path to the catalog file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                min_price,
                max_price,
                search,
                featured,
                file,
            } => {
                let options = ListOptions {
                    category,
                    min_price,
                    max_price,
                    search,
                    featured,
                };
                commands::catalog::list(file.as_deref(), &options).await?;
            }
            CatalogAction::Categories { file } => {
                commands::catalog::categories(file.as_deref()).await?;
            }
            CatalogAction::Show { id, file } => {
                commands::catalog::show(file.as_deref(), id).await?;
            }
            CatalogAction::Check { path } => commands::catalog::check(&path).await?,
        },
    }
    Ok(())
}
