//! Core library for the `gweather` CLI.
//!
//! This crate defines:
//! - Configuration handling (stored defaults, scraper timeouts)
//! - The page capability and its drivers (headless Chromium, plain HTTP)
//! - The lookup pipeline that reads the weather widget of a localized search
//! - Shared domain models (queries, raw widget text, results)
//!
//! It is used by `gweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod driver;
pub mod error;
pub mod extract;
pub mod locale;
pub mod location;
pub mod locator;
pub mod model;
pub mod page;
pub mod query;
pub mod units;
pub mod weather;

pub use config::{Config, ScraperConfig};
pub use driver::{DriverId, SessionFactory};
pub use error::{DriverError, ScrapeError, ValidationError, WeatherError};
pub use locale::{LocaleConfig, LocaleRegistry};
pub use location::clean_location;
pub use model::{WeatherQuery, WeatherResult};
pub use page::PageSession;
pub use units::{TempUnit, WindUnit};
pub use weather::WeatherScraper;
