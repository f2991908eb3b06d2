//! Saho CLI - cart, catalog, customer requests and back-office tools.
//!
//! # Usage
//!
//! ```bash
//! # Cart (persisted under $SAHO_DATA_DIR)
//! saho cart add 6650f0c2 --color Noyer
//! saho cart set 6650f0c2 3
//! saho cart show
//!
//! # Catalog
//! saho catalog products --category salon --sort price-asc
//! saho catalog categories
//!
//! # Customer requests
//! saho quote submit --name "Awa Diop" --email awa@example.sn --phone "+221 77 000 00 00"
//! saho request submit --name "Moussa Ba" --email moussa@example.sn \
//!     --description "Tables de terrasse en teck" --image ref.jpg
//!
//! # Back-office (logs in with SAHO_ADMIN_EMAIL / SAHO_ADMIN_PASSWORD)
//! saho admin quotes list --status NEW
//! saho admin quotes note 665f... --content "Devis envoyé" --pdf devis.pdf
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use saho_client::{ApiClient, AuthSession};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

use commands::Context;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "saho")]
#[command(author, version, about = "Saho storefront and back-office CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Browse products and categories
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Request a quote for the cart
    Quote {
        #[command(subcommand)]
        action: commands::quote::QuoteAction,
    },
    /// Ask for a product that is not in the catalog
    Request {
        #[command(subcommand)]
        action: commands::request::RequestAction,
    },
    /// Back-office operations
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
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

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "saho=info,saho_client=info,saho_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();
    tracing::debug!(?config, "configuration loaded");

    let result = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api = ApiClient::new(&config.client, AuthSession::new())?;
    let ctx = Context { config, api };

    match cli.command {
        Commands::Cart { action } => commands::cart::run(&ctx, action).await?,
        Commands::Catalog { action } => commands::catalog::run(&ctx, action).await?,
        Commands::Quote { action } => commands::quote::run(&ctx, action).await?,
        Commands::Request { action } => commands::request::run(&ctx, action).await?,
        Commands::Admin { action } => commands::admin::run(&ctx, action).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
