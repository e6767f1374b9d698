use crate::{error::DriverError, locale::LocaleConfig, page::PageSession};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

#[cfg(feature = "browser")]
pub mod chrome;
pub mod http;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DriverId {
    #[default]
    Chrome,
    Http,
}

impl DriverId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverId::Chrome => "chrome",
            DriverId::Http => "http",
        }
    }

    pub const fn all() -> &'static [DriverId] {
        &[DriverId::Chrome, DriverId::Http]
    }
}

impl std::fmt::Display for DriverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DriverId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "chrome" | "chromium" | "browser" => Ok(DriverId::Chrome),
            "http" => Ok(DriverId::Http),
            _ => Err(anyhow::anyhow!(
                "Unknown driver '{value}'. Supported drivers: chrome, http."
            )),
        }
    }
}

/// Accepts a 2xx page response; anything else is [`DriverError::Status`].
pub fn check_status(status: i64) -> Result<(), DriverError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(DriverError::Status(u16::try_from(status).unwrap_or(0)))
    }
}

/// Opens one fresh [`PageSession`] per lookup.
#[async_trait]
pub trait SessionFactory: Send + Sync + Debug {
    type Session: PageSession;

    async fn open(&self, locale: &LocaleConfig) -> Result<Self::Session, DriverError>;
}
