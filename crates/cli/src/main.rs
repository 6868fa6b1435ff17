//! Shopfront CLI - Browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! shopfront browse
//!
//! # Show the detail overlay for a product
//! shopfront show 3
//!
//! # Add a product to the cart (again to increase its quantity)
//! shopfront add 3
//!
//! # Show the cart with its total
//! shopfront cart
//!
//! # Remove a product from the cart
//! shopfront remove 3
//! ```
//!
//! # Commands
//!
//! - `browse` - Catalog grid
//! - `show` - Product detail
//! - `add` / `remove` - Cart mutations
//! - `cart` - Cart list and total
//! - `drift` - Cart items whose catalog price changed
//! - `checkout` - Not available yet

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_core::ProductId;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::error::AppError;
use shopfront_storefront::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product in the catalog
    Browse,
    /// Show product details
    Show {
        /// Catalog product id
        id: ProductId,
    },
    /// Add a product to the cart
    Add {
        /// Catalog product id
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product id
        id: ProductId,
    },
    /// Show the cart and its total
    Cart,
    /// List cart items whose catalog price changed since they were added
    Drift,
    /// Check out the cart
    Checkout,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr; stdout carries the rendered screens
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=warn,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, config).await {
        e.report();
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), AppError> {
    let state = AppState::connect(config).await?;

    match cli.command {
        Commands::Browse => commands::catalog::browse(&state).await,
        Commands::Show { id } => commands::catalog::show(&state, id).await?,
        Commands::Add { id } => commands::catalog::add(&state, id).await?,
        Commands::Remove { id } => commands::cart::remove(&state, id).await,
        Commands::Cart => commands::cart::list(&state).await,
        Commands::Drift => commands::cart::drift(&state).await,
        Commands::Checkout => commands::cart::checkout(&state).await,
    }
    Ok(())
}
