//! PricePulse - Main Entry Point
//!
//! Terminal client for the PricePulse price-tracking service.

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use pricepulse_lib::{
    cli::{Cli, Commands},
    commands,
    config::{self, Config},
    logging,
    views::TrackerForm,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config = cli.command {
        print!("{}", config::generate_default_config());
        return Ok(());
    }

    let mut config = Config::resolve(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    if let Err(e) = logging::init(&config.logging, &config.storage.log_dir(), cli.verbose) {
        warn!("File logging disabled: {}", e);
    }
    info!("PricePulse starting against {}", config.api.base_url);

    let state = AppState::from_config(&config).context("Failed to initialize HTTP client")?;

    let output = match cli.command {
        Commands::Open { path } => match commands::open(&state, &path).await {
            Ok(out) => out,
            Err(e) => format!("{}\n", e),
        },
        Commands::Login { email, password } => commands::login(&state, &email, &password).await,
        Commands::Register { email, username, password } => {
            commands::register(&state, &email, &username, &password).await
        }
        Commands::Logout => commands::logout(&state).await,
        Commands::Whoami => commands::whoami(&state).await,
        Commands::Dashboard => commands::dashboard(&state).await,
        Commands::Track { url, target_price, email } => {
            let form = TrackerForm {
                url,
                target_price: target_price.unwrap_or_default(),
                email: email.unwrap_or_default(),
            };
            commands::track(&state, form).await
        }
        Commands::Delete { id } => commands::delete_product(&state, id).await,
        Commands::History { id } => commands::history(&state, id).await,
        Commands::Config => config::generate_default_config(),
    };

    print!("{}", output);
    Ok(())
}
