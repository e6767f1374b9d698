use std::time::Duration;

use tracing::{debug, info, trace};

use crate::{
    error::ScrapeError,
    page::{Lookup, PageSession},
};

/// Container of the weather widget.
pub const WIDGET_SELECTOR: &str = "#wob_wc";

/// Tried when the primary container is absent.
pub const WIDGET_FALLBACK_SELECTORS: &[&str] = &[".wob_wc", "[id^='wob_wc']"];

pub const WIDGET_TIMEOUT: Duration = Duration::from_secs(30);

/// Finds the weather widget, waiting a bounded time for it to render.
#[derive(Debug, Clone)]
pub struct WidgetLocator {
    timeout: Duration,
}

impl Default for WidgetLocator {
    fn default() -> Self {
        Self::new(WIDGET_TIMEOUT)
    }
}

impl WidgetLocator {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Checks every selector once, then waits for the primary one, then
    /// checks the fallbacks again. Fails once the wait has run out.
    pub async fn locate<P: PageSession>(&self, page: &P) -> Result<P::Element, ScrapeError> {
        let all = std::iter::once(WIDGET_SELECTOR).chain(WIDGET_FALLBACK_SELECTORS.iter().copied());
        if let Some(widget) = first_present(page, all).await? {
            return Ok(widget);
        }

        debug!(selector = WIDGET_SELECTOR, timeout = ?self.timeout, "waiting for weather widget");
        let waited = page.wait_for_selector(WIDGET_SELECTOR, self.timeout).await?;
        if let Lookup::Found(widget) = waited {
            info!("weather widget found");
            return Ok(widget);
        }

        match first_present(page, WIDGET_FALLBACK_SELECTORS.iter().copied()).await? {
            Some(widget) => Ok(widget),
            None => Err(ScrapeError::WidgetNotFound),
        }
    }
}

async fn first_present<P, I>(page: &P, selectors: I) -> Result<Option<P::Element>, ScrapeError>
where
    P: PageSession,
    I: IntoIterator<Item = &'static str>,
{
    for selector in selectors {
        if let Some(element) = page.query_selector(selector).await? {
            if tracing::enabled!(tracing::Level::TRACE) {
                let html = page.inner_html(&element).await?;
                trace!(selector, %html, "weather widget markup");
            }
            return Ok(Some(element));
        }
    }
    Ok(None)
}
