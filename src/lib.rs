//! Client for the local web interface of an Enphase Envoy solar monitor.
//!
//! The Envoy serves two HTML status pages: `/home` with the "System
//! Statistics" table and `/production` with the production history. [`Envoy`]
//! scrapes both, keeps each page's label/value table for a configurable number
//! of seconds, and exposes the interesting rows as typed accessors.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use envoy_monitor::{Envoy, EnvoyConfig};
//!
//! let mut envoy = Envoy::new(&EnvoyConfig::new("192.168.1.50"))?;
//! let now = envoy.current_generation().await?;
//! println!("Current generation: {} {}", now.number, now.unit);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod envoy;
pub mod error;


pub use config::{EnvoyConfig, RowPolicy};
pub use envoy::{Envoy, EnvoySummary, Page, Quantity, StatsTable};
pub use error::{ConfigError, EnvoyError, Error, FetchError, ParseError, Result};
