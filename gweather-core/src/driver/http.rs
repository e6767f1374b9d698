use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT_LANGUAGE};
use scraper::{Html, Selector};
use tracing::debug;

use crate::{
    config::ScraperConfig,
    error::DriverError,
    locale::LocaleConfig,
    page::{Lookup, PageSession},
};

use super::{SessionFactory, check_status};

/// Fetches the results page once over HTTP and answers selector queries
/// against the static document.
#[derive(Debug, Clone)]
pub struct HttpDriver {
    http: Client,
}

impl HttpDriver {
    pub fn new(config: &ScraperConfig) -> Result<Self, DriverError> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| DriverError::Launch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl SessionFactory for HttpDriver {
    type Session = HttpSession;

    async fn open(&self, locale: &LocaleConfig) -> Result<HttpSession, DriverError> {
        Ok(HttpSession {
            http: self.http.clone(),
            accept_language: locale.locale_tag.to_string(),
            document: None,
        })
    }
}

#[derive(Debug)]
pub struct HttpSession {
    http: Client,
    accept_language: String,
    document: Option<String>,
}

/// Snapshot of an element of the fetched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    outer_html: String,
    inner_html: String,
    text: String,
}

impl HttpSession {
    fn document(&self) -> Result<&str, DriverError> {
        self.document.as_deref().ok_or(DriverError::NoPage)
    }
}

#[async_trait]
impl PageSession for HttpSession {
    type Element = HtmlElement;

    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        let res = self
            .http
            .get(url)
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await
            .map_err(|e| DriverError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| DriverError::Navigation {
            url: url.to_string(),
            message: format!("failed to read response body: {e}"),
        })?;

        if let Err(e) = check_status(i64::from(status.as_u16())) {
            debug!(%status, body = %truncate_body(&body), "results page request failed");
            return Err(e);
        }

        debug!(bytes = body.len(), "results page loaded");
        self.document = Some(body);
        Ok(())
    }

    async fn query_selector(&self, selector: &str) -> Result<Option<HtmlElement>, DriverError> {
        select_first(self.document()?, selector, false)
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<Lookup<HtmlElement>, DriverError> {
        // A static document never changes, so there is nothing to wait for.
        Ok(match select_first(self.document()?, selector, false)? {
            Some(element) => Lookup::Found(element),
            None => Lookup::TimedOut,
        })
    }

    async fn find_in(
        &self,
        scope: &HtmlElement,
        selector: &str,
    ) -> Result<Option<HtmlElement>, DriverError> {
        select_first(&scope.outer_html, selector, true)
    }

    async fn read_text(&self, element: &HtmlElement) -> Result<String, DriverError> {
        Ok(element.text.clone())
    }

    async fn inner_html(&self, element: &HtmlElement) -> Result<String, DriverError> {
        Ok(element.inner_html.clone())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.document = None;
        Ok(())
    }
}

fn select_first(
    html: &str,
    selector: &str,
    fragment: bool,
) -> Result<Option<HtmlElement>, DriverError> {
    let parsed = Selector::parse(selector).map_err(|e| DriverError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })?;

    let document = if fragment {
        Html::parse_fragment(html)
    } else {
        Html::parse_document(html)
    };

    Ok(document.select(&parsed).next().map(|element| HtmlElement {
        outer_html: element.html(),
        inner_html: element.inner_html(),
        text: element.text().collect(),
    }))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
