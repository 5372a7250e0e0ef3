//! Tranquil Trails CLI - Drive the cart widget from a terminal.
//!
//! Each invocation behaves like one storefront page load: the cart is read
//! from a JSON file standing in for browser storage, the command runs
//! against it, and the result is written back.
//!
//! # Usage
//!
//! ```bash
//! # Add a product by its fields or from the catalog
//! trails-cart add --name "Cork Yoga Mat" --price 499 --image cork-mat.jpg
//! trails-cart add --sku trail-mix
//!
//! # Adjust quantities
//! trails-cart inc cork-yoga-mat
//! trails-cart dec trail-mix
//! trails-cart remove trail-mix
//! trails-cart clear --yes
//!
//! # Inspect the cart
//! trails-cart show --view sidebar
//!
//! # Sign in and check out
//! trails-cart login ana@example.com
//! trails-cart checkout
//! ```
//!
//! # Environment Variables
//!
//! - `TRAILS_STORE_PATH` - Storage file (default: `.trails-cart.json`)
//! - `TRAILS_CATALOG` - Product catalog YAML (default: `catalog.yaml`)
//! - `RUST_LOG` - Log filter (default: `tranquil_trails=info`)
//!
//! Widget settings (`TRAILS_CART_KEY`, `TRAILS_CURRENCY`, ...) are read as
//! well; see `tranquil_trails_widget::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "trails-cart")]
#[command(author, version, about = "Tranquil Trails cart tools")]
struct Cli {
    /// Storage file (overrides `TRAILS_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add {
        /// Catalog SKU; fills in every other field
        #[arg(long, conflicts_with_all = ["name", "price", "image"])]
        sku: Option<String>,

        /// Explicit item id (derived from the name when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Unit price
        #[arg(long)]
        price: Option<String>,

        /// Image path or URL
        #[arg(long)]
        image: Option<String>,

        /// Catalog file (overrides `TRAILS_CATALOG`)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Increase an item's quantity by one
    Inc {
        /// Item id
        id: String,
    },
    /// Decrease an item's quantity by one
    Dec {
        /// Item id
        id: String,
    },
    /// Remove an item
    Remove {
        /// Item id
        id: String,
    },
    /// Empty the cart
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print a cart view
    Show {
        /// Which view to print
        #[arg(long, value_enum, default_value = "sidebar")]
        view: View,

        /// Print the rendered markup instead of a summary
        #[arg(long)]
        html: bool,
    },
    /// Record a sign-in
    Login {
        /// Identity the cart is scoped to
        identity: String,

        /// Sign in with the admin marker
        #[arg(long)]
        admin: bool,
    },
    /// Forget the sign-in
    Logout,
    /// Run the checkout gate
    Checkout,
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

/// Cart views printable by `show`.
#[derive(Clone, Copy, ValueEnum)]
pub enum View {
    Badge,
    Sidebar,
    Page,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// Catalog file (overrides `TRAILS_CATALOG`)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tranquil_trails=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = commands::Settings::from_env(cli.store)?;

    match cli.command {
        Commands::Add {
            sku,
            id,
            name,
            price,
            image,
            catalog,
        } => {
            let product = match sku {
                Some(sku) => commands::catalog::lookup(&settings.catalog_path(catalog), &sku)?,
                None => tranquil_trails_core::ProductInput {
                    id,
                    name,
                    price,
                    image,
                },
            };
            commands::cart::add(&settings, &product)?;
        }
        Commands::Inc { id } => commands::cart::increment(&settings, &id)?,
        Commands::Dec { id } => commands::cart::decrement(&settings, &id)?,
        Commands::Remove { id } => commands::cart::remove(&settings, &id)?,
        Commands::Clear { yes } => commands::cart::clear(&settings, yes)?,
        Commands::Show { view, html } => commands::cart::show(&settings, view, html)?,
        Commands::Login { identity, admin } => commands::account::login(&settings, &identity, admin)?,
        Commands::Logout => commands::account::logout(&settings)?,
        Commands::Checkout => commands::cart::checkout(&settings)?,
        Commands::Catalog { action } => match action {
            CatalogAction::List { category, catalog } => {
                commands::catalog::list(&settings.catalog_path(catalog), category.as_deref())?;
            }
        },
    }
    Ok(())
}
