//! Real Chromium over the DevTools protocol.

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use chromiumoxide::{
    browser::{Browser, BrowserConfig},
    element::Element,
    error::CdpError,
    page::Page,
};
use futures::StreamExt;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, trace, warn};

use crate::{
    config::ScraperConfig,
    error::DriverError,
    locale::LocaleConfig,
    page::{Lookup, PageSession},
};

use super::{SessionFactory, check_status};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launches one Chromium per session with the locale's language.
#[derive(Debug, Clone)]
pub struct ChromeDriver {
    headless: bool,
    chrome_executable: Option<PathBuf>,
    user_agent: String,
}

impl ChromeDriver {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            headless: config.headless,
            chrome_executable: config.chrome_executable.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    fn browser_config(&self, locale: &LocaleConfig) -> Result<BrowserConfig, DriverError> {
        let mut builder = BrowserConfig::builder()
            .window_size(1920, 1080)
            .arg(format!("--lang={}", locale.locale_tag))
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg(format!("--user-agent={}", self.user_agent));

        if !self.headless {
            builder = builder.with_head();
        }

        if let Some(ref path) = self.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder
            .build()
            .map_err(|e| DriverError::Launch(format!("failed to build browser config: {e}")))
    }
}

#[async_trait]
impl SessionFactory for ChromeDriver {
    type Session = ChromeSession;

    async fn open(&self, locale: &LocaleConfig) -> Result<ChromeSession, DriverError> {
        let config = self.browser_config(locale)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    trace!(error = %e, "browser handler event failed");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!(error = %close_err, "failed to close browser after page error");
                }
                handler_task.abort();
                return Err(DriverError::Launch(format!("failed to create page: {e}")));
            }
        };

        debug!(locale = locale.locale_tag, headless = self.headless, "browser session opened");

        Ok(ChromeSession {
            browser: Mutex::new(browser),
            page,
            handler_task,
        })
    }
}

#[derive(Debug)]
pub struct ChromeSession {
    browser: Mutex<Browser>,
    page: Page,
    handler_task: JoinHandle<()>,
}

fn protocol(e: impl std::fmt::Display) -> DriverError {
    DriverError::Protocol(e.to_string())
}

/// A missing node is an empty match list; any other CDP failure is an error.
fn first_match(found: Result<Vec<Element>, CdpError>) -> Result<Option<Element>, DriverError> {
    Ok(found.map_err(protocol)?.into_iter().next())
}

impl ChromeSession {
    async fn poll_for(&self, selector: &str) -> Result<Element, DriverError> {
        loop {
            if let Some(element) = first_match(self.page.find_elements(selector).await)? {
                return Ok(element);
            }
            trace!(selector, "selector not present yet");
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl PageSession for ChromeSession {
    type Element = Element;

    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        let navigation = |e: CdpError| DriverError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };

        self.page.goto(url).await.map_err(navigation)?;
        let request = self
            .page
            .wait_for_navigation_response()
            .await
            .map_err(navigation)?;

        match request.as_ref().and_then(|req| req.response.as_ref()) {
            Some(response) => check_status(response.status),
            None => {
                debug!(url, "no response recorded for navigation");
                Ok(())
            }
        }
    }

    async fn query_selector(&self, selector: &str) -> Result<Option<Element>, DriverError> {
        first_match(self.page.find_elements(selector).await)
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Lookup<Element>, DriverError> {
        match tokio::time::timeout(timeout, self.poll_for(selector)).await {
            Ok(found) => found.map(Lookup::Found),
            Err(_) => Ok(Lookup::TimedOut),
        }
    }

    async fn find_in(
        &self,
        scope: &Element,
        selector: &str,
    ) -> Result<Option<Element>, DriverError> {
        first_match(scope.find_elements(selector).await)
    }

    async fn read_text(&self, element: &Element) -> Result<String, DriverError> {
        Ok(element.inner_text().await.map_err(protocol)?.unwrap_or_default())
    }

    async fn inner_html(&self, element: &Element) -> Result<String, DriverError> {
        Ok(element.inner_html().await.map_err(protocol)?.unwrap_or_default())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        if let Err(e) = self.page.clone().close().await {
            warn!(error = %e, "failed to close page");
        }

        let mut browser = self.browser.lock().await;
        let closed = browser.close().await.map_err(protocol);
        if let Err(e) = browser.wait().await {
            warn!(error = %e, "failed to wait for browser exit");
        }
        self.handler_task.abort();

        closed.map(|_| ())
    }
}
