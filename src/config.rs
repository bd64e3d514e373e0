//! # Configuration
//!
//! Runtime settings, read from CLI flags and environment variables (a `.env` file is
//! honoured when present). Every value has a default, so an empty environment yields
//! the same configuration as [`ShopConfig::default`].

use clap::{Args, Parser};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Clone, Debug, Args)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "TIENDA_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

/// Cart capacity and shipping settings.
#[derive(Clone, Copy, Debug, PartialEq, Args)]
pub struct CartLimits {
    /// Maximum number of distinct products in one cart.
    #[arg(long, env = "TIENDA_CART_MAX_LINES", default_value_t = 8)]
    pub max_lines: usize,

    /// Maximum quantity of a single product in one cart.
    #[arg(long, env = "TIENDA_CART_MAX_QUANTITY", default_value_t = 100)]
    pub max_quantity: u32,

    /// Flat shipping fee charged on every cart.
    #[arg(long, env = "TIENDA_SHIPPING_BASE", default_value_t = 1000)]
    pub shipping_base: u64,

    /// Shipping surcharge as a fraction of each line's price.
    #[arg(long, env = "TIENDA_SHIPPING_RATE", default_value_t = 0.05)]
    pub shipping_rate: f64,
}

impl Default for CartLimits {
    fn default() -> Self {
        Self {
            max_lines: 8,
            max_quantity: 100,
            shipping_base: 1000,
            shipping_rate: 0.05,
        }
    }
}

/// Tienda configuration
#[derive(Clone, Debug, Parser)]
#[command(name = "tienda", about = "Purchase request and reservation core", long_about = None)]
pub struct ShopConfig {
    /// Cart limits and shipping.
    #[command(flatten)]
    pub cart: CartLimits,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Mailbox capacity of every actor.
    #[arg(long, env = "TIENDA_ACTOR_BUFFER", default_value_t = 32)]
    pub actor_buffer: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            cart: CartLimits::default(),
            logging: LoggingConfig::default(),
            actor_buffer: 32,
        }
    }
}

impl ShopConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
