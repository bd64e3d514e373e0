//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber for the shop.
//!
//! ## Configuration
//!
//! The filter comes from [`LoggingConfig::log_level`] (`RUST_LOG`, default `info`) and
//! accepts full directives such as `info,actor_framework=debug`. An invalid directive
//! falls back to `info`.
//!
//! The compact format hides the module path (`with_target(false)`); actors already
//! tag every line with `entity_type`. `TIENDA_LOG_FORMAT=json` switches to one JSON
//! object per line with the current span attached.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup with the initial store size, shutdown with the final one
//! - **Entity Operations**: create, get, update, delete and actions, with the entity id
//! - **Rejected Writes**: a store refusing a write is a `warn` naming the id
//! - **Compensation**: stock released after a failed create or delete, and any
//!   compensation that itself failed (`error`)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads with debug logs
//! RUST_LOG=debug cargo run
//!
//! # Only the framework's operation log
//! RUST_LOG=warn,actor_framework=debug cargo run
//!
//! # JSON lines
//! TIENDA_LOG_FORMAT=json cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! A checkout of one cancha reservation, at `info`:
//!
//! ```text
//! INFO Action ok entity_type="Product" id=product_1
//! INFO Created entity_type="Solicitud" id=solicitud_1 size=1
//! INFO Action ok entity_type="Cart" id=user_2
//! INFO checkout{user_id=user_2 lines=1}: Checkout complete count=1
//! ```
//!
//! Actors run in their own tasks, so their lines carry no caller span.
//! The reservation of stock (`Action ok ... Product`) happens inside the solicitud's
//! `on_create` hook, so it appears before the solicitud itself is stored.
use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Fails if one is already installed, which tests
/// calling this more than once can ignore.
pub fn setup_tracing(config: &LoggingConfig) -> Result<(), TryInitError> {
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    match config.log_format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .finish()
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .finish()
            .try_init(),
    }
}
