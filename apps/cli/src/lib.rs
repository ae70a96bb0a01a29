//! # Marketplace Pricer CLI
//!
//! Finds the selling price that leaves a target profit after marketplace
//! fees and discounts.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           pricer                                        │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────────┐  ┌────────────────────────┐│
//! │  │  solve         │  │  batch             │  │  template              ││
//! │  │                │  │                    │  │                        ││
//! │  │ • flags → row  │  │ • CSV/JSON/XLSX in │  │ • import header row    ││
//! │  │ • JSON report  │  │ • parallel solve   │  │ • file or stdout       ││
//! │  │   on stdout    │  │ • --filter by SKU  │  │                        ││
//! │  │                │  │ • CSV/JSON/XLSX out│  │                        ││
//! │  └────────────────┘  └────────────────────┘  └────────────────────────┘│
//! │                                                                         │
//! │  Global: --config, --msf, --payment, --premium, --campaign             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PRICER_MSF_PCT` - Marketplace service fee (default: 11.66)
//! - `PRICER_PAYMENT_PCT` - Payment fee (default: 3.38)
//! - `PRICER_PREMIUM_PCT` - Premium fee before the cap (default: 4.28)
//! - `PRICER_CAMPAIGN_PCT` - Campaign fee (default: 5.35)
//! - `PRICER_MANDATORY_DISCOUNT_PCT` - Blank `MandDisc` value (default: 5)
//! - `RUST_LOG` - Log filter (default: `info`)

pub mod cli;
pub mod commands;
pub mod config;

// Re-exports
pub use cli::Cli;
pub use config::{ConfigError, PricerConfig};

use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr, keeping stdout free for reports.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Also show coerced cells and config overrides
/// - `RUST_LOG=pricer_io=trace` - Trace the I/O crate only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
