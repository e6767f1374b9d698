use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    locale::{FALLBACK_LANG, LocaleConfig},
    units::{TempUnit, WindUnit},
};

/// A weather lookup as the caller phrased it. Units are kept as text until
/// [`WeatherQuery::validate`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
    pub lang: String,
    pub temp_unit: Option<String>,
    pub wind_unit: Option<String>,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            lang: FALLBACK_LANG.to_string(),
            temp_unit: None,
            wind_unit: None,
        }
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn temp_unit(mut self, unit: impl Into<String>) -> Self {
        self.temp_unit = Some(unit.into());
        self
    }

    pub fn wind_unit(mut self, unit: impl Into<String>) -> Self {
        self.wind_unit = Some(unit.into());
        self
    }

    /// Checks the city and parses the unit overrides.
    pub fn validate(&self) -> Result<UnitOverrides, ValidationError> {
        if self.city.trim().is_empty() {
            return Err(ValidationError::EmptyCity);
        }

        let temp = self
            .temp_unit
            .as_deref()
            .map(str::parse::<TempUnit>)
            .transpose()?;
        let wind = self
            .wind_unit
            .as_deref()
            .map(str::parse::<WindUnit>)
            .transpose()?;

        Ok(UnitOverrides { temp, wind })
    }
}

/// Validated caller overrides; `None` means "use the locale default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitOverrides {
    pub temp: Option<TempUnit>,
    pub wind: Option<WindUnit>,
}

impl UnitOverrides {
    pub fn resolve(&self, locale: &LocaleConfig) -> TargetUnits {
        TargetUnits {
            temp: self.temp.unwrap_or(locale.default_temp_unit),
            wind: self.wind.unwrap_or(locale.default_wind_unit),
        }
    }
}

/// Units the result is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetUnits {
    pub temp: TempUnit,
    pub wind: WindUnit,
}

/// Text read from the widget for one lookup, before any conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWidgetFields {
    /// Number in whatever unit the page renders.
    pub temperature: String,
    pub condition: String,
    pub humidity: String,
    /// Metric wind member, e.g. `"10 km/h"`.
    pub wind_metric: Option<String>,
    /// Imperial wind member, e.g. `"6 mph"`.
    pub wind_imperial: Option<String>,
    pub location: String,
    /// Temperature unit symbol the page displays, e.g. `"°C"`.
    pub unit_symbol: String,
}

impl RawWidgetFields {
    /// Picks the wind reading to format for `target` and the unit it is in.
    ///
    /// The imperial member is read directly only while the page renders
    /// imperial units; otherwise the metric member is the source.
    pub fn wind_source(&self, displayed: TempUnit, target: WindUnit) -> Option<(&str, WindUnit)> {
        if target == WindUnit::Mph && displayed.wind_system() == WindUnit::Mph {
            if let Some(imperial) = self.wind_imperial.as_deref() {
                return Some((imperial, WindUnit::Mph));
            }
        }

        match (self.wind_metric.as_deref(), self.wind_imperial.as_deref()) {
            (Some(metric), _) => Some((metric, WindUnit::Kmh)),
            (None, Some(imperial)) => Some((imperial, WindUnit::Mph)),
            (None, None) => None,
        }
    }
}

/// Current conditions for a city. Every field is display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherResult {
    /// `"<value>°C"` or `"<value>°F"`.
    pub temperature: String,
    /// `"<value>%"`.
    pub humidity: String,
    /// `"<value>kmh"` or `"<value>mph"`.
    pub wind: String,
    pub condition: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleRegistry;

    fn raw() -> RawWidgetFields {
        RawWidgetFields {
            temperature: "25".into(),
            condition: "Soleado".into(),
            humidity: "80%".into(),
            wind_metric: Some("10 km/h".into()),
            wind_imperial: Some("6 mph".into()),
            location: "Buenos Aires".into(),
            unit_symbol: "°C".into(),
        }
    }

    #[test]
    fn query_defaults_to_english() {
        let query = WeatherQuery::new("Paris");
        assert_eq!(query.lang, "en");
        assert_eq!(query.validate(), Ok(UnitOverrides::default()));
    }

    #[test]
    fn validate_rejects_unknown_units() {
        let err = WeatherQuery::new("Paris").temp_unit("X").validate().unwrap_err();
        assert_eq!(err, ValidationError::TempUnit("X".into()));

        let err = WeatherQuery::new("Paris").wind_unit("knots").validate().unwrap_err();
        assert_eq!(err, ValidationError::WindUnit("knots".into()));

        let err = WeatherQuery::new("  ").validate().unwrap_err();
        assert_eq!(err, ValidationError::EmptyCity);
    }

    #[test]
    fn validate_rejects_unit_aliases() {
        let err = WeatherQuery::new("Paris").temp_unit("c").validate().unwrap_err();
        assert_eq!(err, ValidationError::TempUnit("c".into()));

        let err = WeatherQuery::new("Paris").wind_unit("KM/H").validate().unwrap_err();
        assert_eq!(err, ValidationError::WindUnit("KM/H".into()));
    }

    #[test]
    fn overrides_win_over_locale_defaults() {
        let en = LocaleRegistry::global().resolve("en");
        let overrides = WeatherQuery::new("New York")
            .temp_unit("C")
            .wind_unit("kmh")
            .validate()
            .unwrap();
        assert_eq!(
            overrides.resolve(en),
            TargetUnits { temp: TempUnit::Celsius, wind: WindUnit::Kmh }
        );
        assert_eq!(
            UnitOverrides::default().resolve(en),
            TargetUnits { temp: TempUnit::Fahrenheit, wind: WindUnit::Mph }
        );
    }

    #[test]
    fn metric_page_converts_from_metric_member() {
        let fields = raw();
        assert_eq!(
            fields.wind_source(TempUnit::Celsius, WindUnit::Mph),
            Some(("10 km/h", WindUnit::Kmh))
        );
        assert_eq!(
            fields.wind_source(TempUnit::Celsius, WindUnit::Kmh),
            Some(("10 km/h", WindUnit::Kmh))
        );
    }

    #[test]
    fn imperial_page_reads_imperial_member_directly() {
        let fields = raw();
        assert_eq!(
            fields.wind_source(TempUnit::Fahrenheit, WindUnit::Mph),
            Some(("6 mph", WindUnit::Mph))
        );
    }

    #[test]
    fn imperial_member_is_used_when_metric_is_missing() {
        let fields = RawWidgetFields { wind_metric: None, ..raw() };
        assert_eq!(
            fields.wind_source(TempUnit::Celsius, WindUnit::Kmh),
            Some(("6 mph", WindUnit::Mph))
        );

        let fields = RawWidgetFields { wind_metric: None, wind_imperial: None, ..raw() };
        assert_eq!(fields.wind_source(TempUnit::Celsius, WindUnit::Kmh), None);
    }

    #[test]
    fn result_serializes_exactly_five_keys() {
        let result = WeatherResult {
            temperature: "25.0°C".into(),
            humidity: "80%".into(),
            wind: "10kmh".into(),
            condition: "Soleado".into(),
            location: "Buenos Aires".into(),
        };
        let value = serde_json::to_value(&result).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["condition", "humidity", "location", "temperature", "wind"]);
    }
}
