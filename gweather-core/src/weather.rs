//! The lookup pipeline.
//!
//! Input is validated before a page is opened. The page is then navigated to
//! the localized search, the widget is located and read, and the raw text is
//! converted into a [`WeatherResult`]. The session is closed on every path.

use tracing::{info, instrument, warn};

use crate::{
    config::ScraperConfig,
    driver::SessionFactory,
    error::{Field, ScrapeError, WeatherError},
    extract::FieldExtractor,
    locale::{LocaleConfig, LocaleRegistry},
    location::clean_location,
    locator::WidgetLocator,
    model::{RawWidgetFields, TargetUnits, WeatherQuery, WeatherResult},
    page::PageSession,
    query::{build_query, search_url},
    units::{self, TempUnit},
};

#[derive(Debug)]
pub struct WeatherScraper<F> {
    factory: F,
    base_url: String,
    locator: WidgetLocator,
    extractor: FieldExtractor,
    registry: &'static LocaleRegistry,
}

impl<F: SessionFactory> WeatherScraper<F> {
    pub fn new(factory: F, config: &ScraperConfig) -> Self {
        Self {
            factory,
            base_url: config.base_url.clone(),
            locator: WidgetLocator::new(config.widget_timeout()),
            extractor: FieldExtractor::new(config.location_timeout()),
            registry: LocaleRegistry::global(),
        }
    }

    /// Current weather for `query.city`.
    ///
    /// Unit overrides are checked before anything is opened; a bad unit is a
    /// [`WeatherError::Validation`]. Every other failure is a
    /// [`WeatherError::Scrape`] whose message starts with
    /// `"Error getting weather"`.
    #[instrument(skip_all, fields(city = %query.city, lang = %query.lang))]
    pub async fn get_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, WeatherError> {
        let overrides = query.validate()?;
        let locale = self.registry.resolve(&query.lang);
        let units = overrides.resolve(locale);

        let search = build_query(&query.city, locale)?;
        let url = search_url(&self.base_url, &search, locale)?;
        info!(
            %url,
            locale = locale.locale_tag,
            temp = %units.temp,
            wind = %units.wind,
            "looking up weather"
        );

        let mut session = self.factory.open(locale).await?;
        let outcome = self.scrape(&mut session, url.as_str(), locale, units).await;
        if let Err(e) = session.close().await {
            warn!(error = %e, "failed to close page session");
        }

        let result = outcome?;
        info!(location = %result.location, temperature = %result.temperature, "weather found");
        Ok(result)
    }

    async fn scrape(
        &self,
        session: &mut F::Session,
        url: &str,
        locale: &LocaleConfig,
        units: TargetUnits,
    ) -> Result<WeatherResult, ScrapeError> {
        session
            .navigate(url)
            .await
            .map_err(ScrapeError::from_navigation)?;

        let widget = self.locator.locate(&*session).await?;
        let raw = self.extractor.extract(&*session, &widget).await?;
        assemble(&raw, locale, units)
    }
}

/// Converts raw widget text into the result, in `units`.
pub fn assemble(
    raw: &RawWidgetFields,
    locale: &LocaleConfig,
    units: TargetUnits,
) -> Result<WeatherResult, ScrapeError> {
    let displayed = TempUnit::from_display(&raw.unit_symbol).ok_or_else(|| {
        ScrapeError::Unparseable {
            field: Field::TemperatureUnit,
            raw: raw.unit_symbol.clone(),
        }
    })?;

    let temperature = units::to_temperature(&raw.temperature, displayed, units.temp)?;
    let humidity = units::format_humidity(&raw.humidity)?;

    let (wind_raw, wind_from) = raw
        .wind_source(displayed, units.wind)
        .ok_or(ScrapeError::FieldMissing(Field::Wind))?;
    let wind = units::to_wind(wind_raw, wind_from, units.wind)?;

    let condition = raw.condition.trim();
    if condition.is_empty() {
        return Err(ScrapeError::FieldMissing(Field::Condition));
    }
    if !locale.recognizes_condition(condition) {
        warn!(condition, lang = locale.lang, "condition not in locale translations");
    }

    let location = clean_location(&raw.location);
    if location.is_empty() {
        return Err(ScrapeError::LocationMissing);
    }

    Ok(WeatherResult {
        temperature,
        humidity,
        wind,
        condition: condition.to_string(),
        location,
    })
}
