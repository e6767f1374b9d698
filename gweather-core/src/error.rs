use std::fmt;

use thiserror::Error;

/// A value read from the weather widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Temperature,
    Condition,
    Humidity,
    Wind,
    Location,
    TemperatureUnit,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Temperature => "temperature",
            Field::Condition => "condition",
            Field::Humidity => "humidity",
            Field::Wind => "wind",
            Field::Location => "location",
            Field::TemperatureUnit => "temperature unit",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bad caller input. Raised before any page is opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid temperature unit '{0}'. Supported units: C, F.")]
    TempUnit(String),

    #[error("Invalid wind unit '{0}'. Supported units: kmh, mph.")]
    WindUnit(String),

    #[error("City must not be empty.")]
    EmptyCity,
}

/// Failures reported by a navigation driver.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to start session: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// The results page answered with a non-success status.
    #[error("{0}")]
    Status(u16),

    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("no page has been loaded")]
    NoPage,

    #[error("browser protocol error: {0}")]
    Protocol(String),
}

/// Failures of the scraping stages, from navigation to assembly.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{0}")]
    Status(u16),

    #[error("{0}")]
    Navigation(String),

    #[error("weather widget not found")]
    WidgetNotFound,

    #[error("no valid location could be extracted")]
    LocationMissing,

    #[error("could not read {0} from the weather widget")]
    FieldMissing(Field),

    #[error("could not parse {field} value '{raw}'")]
    Unparseable { field: Field, raw: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl ScrapeError {
    /// Maps a failed `navigate` call: a status stays a status, anything else
    /// becomes a navigation failure.
    pub fn from_navigation(err: DriverError) -> Self {
        match err {
            DriverError::Status(code) => ScrapeError::Status(code),
            other => ScrapeError::Navigation(other.to_string()),
        }
    }
}

/// Error returned by a weather lookup.
///
/// Every scraping failure displays as `Error getting weather: <detail>`, so
/// callers can match on that prefix whatever stage failed. Validation errors
/// are kept apart so bad input can be told from a failed scrape.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error getting weather: {0}")]
    Scrape(#[from] ScrapeError),
}

impl WeatherError {
    pub fn is_validation(&self) -> bool {
        matches!(self, WeatherError::Validation(_))
    }
}

impl From<DriverError> for WeatherError {
    fn from(err: DriverError) -> Self {
        WeatherError::Scrape(ScrapeError::Driver(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_renders_with_generic_prefix() {
        let err = WeatherError::from(ScrapeError::Status(404));
        assert_eq!(err.to_string(), "Error getting weather: 404");
    }

    #[test]
    fn navigation_keeps_status_codes() {
        let err = ScrapeError::from_navigation(DriverError::Status(503));
        assert!(matches!(err, ScrapeError::Status(503)));

        let err = ScrapeError::from_navigation(DriverError::Navigation {
            url: "https://example.invalid".into(),
            message: "dns error".into(),
        });
        assert!(matches!(err, ScrapeError::Navigation(_)));
        assert!(err.to_string().contains("dns error"));
    }

    #[test]
    fn validation_is_not_wrapped() {
        let err = WeatherError::from(ValidationError::TempUnit("X".into()));
        assert!(err.is_validation());
        assert!(!err.to_string().contains("Error getting weather"));
    }

    #[test]
    fn widget_and_location_details_are_wrapped() {
        let widget = WeatherError::from(ScrapeError::WidgetNotFound);
        assert_eq!(widget.to_string(), "Error getting weather: weather widget not found");

        let location = WeatherError::from(ScrapeError::LocationMissing);
        assert!(location.to_string().starts_with("Error getting weather"));
        assert!(location.to_string().contains("no valid location"));
    }
}
