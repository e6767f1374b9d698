//! Reads the raw widget text, field by field.

use std::time::Duration;

use tracing::debug;

use crate::{
    error::{Field, ScrapeError},
    model::RawWidgetFields,
    page::{Lookup, PageSession},
};

pub const TEMPERATURE_SELECTOR: &str = "#wob_tm";
pub const CONDITION_SELECTOR: &str = "#wob_dc";
pub const HUMIDITY_SELECTOR: &str = "#wob_hm";
pub const WIND_METRIC_SELECTOR: &str = "#wob_ws";
pub const WIND_IMPERIAL_SELECTOR: &str = "#wob_tws";
pub const UNIT_SELECTOR: &str = ".wob-unit span[aria-disabled='true']";

/// Labelled results heading that names the location.
pub const LOCATION_SELECTOR: &str = ".BBwThe";
pub const LOCATION_FALLBACK_SELECTORS: &[&str] = &["#wob_loc", ".wob_loc"];
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct FieldExtractor {
    location_timeout: Duration,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(LOCATION_TIMEOUT)
    }
}

impl FieldExtractor {
    pub fn new(location_timeout: Duration) -> Self {
        Self { location_timeout }
    }

    /// Reads temperature, condition, humidity, wind, location and the
    /// displayed unit, in that order. The first field that cannot be read
    /// ends the extraction.
    pub async fn extract<P: PageSession>(
        &self,
        page: &P,
        widget: &P::Element,
    ) -> Result<RawWidgetFields, ScrapeError> {
        let temperature = required(page, widget, TEMPERATURE_SELECTOR, Field::Temperature).await?;
        let condition = required(page, widget, CONDITION_SELECTOR, Field::Condition).await?;
        let humidity = required(page, widget, HUMIDITY_SELECTOR, Field::Humidity).await?;

        let wind_metric = optional(page, widget, WIND_METRIC_SELECTOR).await?;
        let wind_imperial = optional(page, widget, WIND_IMPERIAL_SELECTOR).await?;
        if wind_metric.is_none() && wind_imperial.is_none() {
            return Err(ScrapeError::FieldMissing(Field::Wind));
        }

        let location = self.location(page).await?;
        let unit_symbol = required(page, widget, UNIT_SELECTOR, Field::TemperatureUnit).await?;

        let fields = RawWidgetFields {
            temperature,
            condition,
            humidity,
            wind_metric,
            wind_imperial,
            location,
            unit_symbol,
        };
        debug!(?fields, "raw widget fields");
        Ok(fields)
    }

    /// The heading is outside the widget and has its own, shorter wait.
    async fn location<P: PageSession>(&self, page: &P) -> Result<String, ScrapeError> {
        let waited = page
            .wait_for_selector(LOCATION_SELECTOR, self.location_timeout)
            .await?;
        if let Lookup::Found(heading) = waited {
            if let Some(text) = non_empty(page.read_text(&heading).await?) {
                return Ok(text);
            }
        }

        for selector in LOCATION_FALLBACK_SELECTORS {
            if let Some(element) = page.query_selector(selector).await? {
                if let Some(text) = non_empty(page.read_text(&element).await?) {
                    debug!(selector, "location read from fallback");
                    return Ok(text);
                }
            }
        }

        Err(ScrapeError::LocationMissing)
    }
}

async fn required<P: PageSession>(
    page: &P,
    widget: &P::Element,
    selector: &str,
    field: Field,
) -> Result<String, ScrapeError> {
    optional(page, widget, selector)
        .await?
        .ok_or(ScrapeError::FieldMissing(field))
}

async fn optional<P: PageSession>(
    page: &P,
    widget: &P::Element,
    selector: &str,
) -> Result<Option<String>, ScrapeError> {
    match page.find_in(widget, selector).await? {
        Some(element) => Ok(non_empty(page.read_text(&element).await?)),
        None => Ok(None),
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
