//! Shopcart CLI - drive a cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! shopcart show
//!
//! # Add one unit of product 1
//! shopcart add 1
//!
//! # Set product 1's quantity to 3
//! shopcart set 1 3
//!
//! # Remove product 1 entirely
//! shopcart remove 1
//!
//! # Empty the cart
//! shopcart clear
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPCART_API_URL` - Base URL of the commerce API (required)
//! - `SHOPCART_API_TOKEN` - Bearer token for the commerce API
//! - `SHOPCART_DATA_DIR` - Directory for the persisted cart (default: .shopcart)
//! - `SHOPCART_STORAGE_KEY` - Storage key for the cart payload

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shopcart::api::CommerceClient;
use shopcart::config::CartConfig;
use shopcart::notify::TracingNotifier;
use shopcart::persist::FileStore;
use shopcart::store::CartStore;
use shopcart_core::ProductId;

mod commands;

use commands::CliStore;

#[derive(Parser)]
#[command(name = "shopcart")]
#[command(author, version, about = "Shopcart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Product id to add
        product_id: i64,
    },
    /// Remove a product from the cart entirely
    Remove {
        /// Product id to remove
        product_id: i64,
    },
    /// Set a product's quantity
    Set {
        /// Product id to update
        product_id: i64,

        /// Target quantity (zero or less leaves the cart untouched)
        amount: i64,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; defaults to info level if RUST_LOG is not set
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "shopcart=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let client = CommerceClient::new(&config);

    let store: CliStore = CartStore::load(
        client.clone(),
        client,
        FileStore::new(&config.data_dir),
        TracingNotifier,
        config.storage_key.as_str(),
    );

    match cli.command {
        Commands::Show => commands::show(&store),
        Commands::Add { product_id } => {
            store.add_product(ProductId::new(product_id)).await;
            commands::show(&store);
        }
        Commands::Remove { product_id } => {
            store.remove_product(ProductId::new(product_id));
            commands::show(&store);
        }
        Commands::Set { product_id, amount } => {
            store
                .update_product_amount(ProductId::new(product_id), amount)
                .await;
            commands::show(&store);
        }
        Commands::Clear => {
            store.clear();
            commands::show(&store);
        }
    }

    Ok(())
}
