//! The page capability the lookup pipeline drives.
//!
//! A [`PageSession`] is one open page: it navigates, finds elements and reads
//! their text. Drivers in [`crate::driver`] implement it over a real browser or
//! a plain HTTP fetch.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverError;

/// Outcome of a bounded wait for an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<E> {
    Found(E),
    TimedOut,
}

impl<E> Lookup<E> {
    pub fn found(self) -> Option<E> {
        match self {
            Lookup::Found(element) => Some(element),
            Lookup::TimedOut => None,
        }
    }
}

#[async_trait]
pub trait PageSession: Send + Sync {
    /// Handle to an element of the loaded page.
    type Element: Send + Sync;

    /// Loads `url`. A non-success response is [`DriverError::Status`].
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// First element matching `selector`, without waiting.
    async fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>, DriverError>;

    /// Waits up to `timeout` for `selector` to appear.
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Lookup<Self::Element>, DriverError>;

    /// First descendant of `scope` matching `selector`.
    async fn find_in(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Option<Self::Element>, DriverError>;

    async fn read_text(&self, element: &Self::Element) -> Result<String, DriverError>;

    async fn inner_html(&self, element: &Self::Element) -> Result<String, DriverError>;

    /// Releases the page and whatever backs it.
    async fn close(&mut self) -> Result<(), DriverError>;
}
