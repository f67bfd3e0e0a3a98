//! Command-line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::ProductId;

#[derive(Debug, Parser)]
#[command(name = "pricepulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track product prices from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides config and PRICEPULSE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Mirror logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open a page by path, e.g. "/dashboard" or "/history/3"
    Open {
        #[arg(default_value = "/")]
        path: String,
    },

    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PRICEPULSE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "PRICEPULSE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// List tracked products
    Dashboard,

    /// Start tracking a product URL
    Track {
        url: String,
        /// Notify when the price drops below this
        #[arg(long)]
        target_price: Option<String>,
        /// Address for price drop notifications
        #[arg(long)]
        email: Option<String>,
    },

    /// Stop tracking a product
    Delete {
        id: ProductId,
    },

    /// Show price history for a product
    History {
        id: ProductId,
    },

    /// Print a default config file
    Config,
}
