//! Temperature and wind-speed units: parsing, conversion and output formatting.
//!
//! Output strings never carry the page's own labels: temperatures render as
//! `<value>°C`/`<value>°F` and wind as `<value>kmh`/`<value>mph`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Field, ScrapeError, ValidationError};

/// Miles per kilometre.
pub const MPH_PER_KMH: f64 = 0.621371;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TempUnit {
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TempUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TempUnit::Celsius => "C",
            TempUnit::Fahrenheit => "F",
        }
    }

    /// Reads the unit symbol the page displays next to the temperature, e.g. `°C`.
    pub fn from_display(text: &str) -> Option<Self> {
        let symbol = text.trim().trim_start_matches('°').trim();
        if symbol.eq_ignore_ascii_case("c") {
            Some(TempUnit::Celsius)
        } else if symbol.eq_ignore_ascii_case("f") {
            Some(TempUnit::Fahrenheit)
        } else {
            None
        }
    }

    /// Wind unit the page pairs with this temperature unit.
    pub fn wind_system(&self) -> WindUnit {
        match self {
            TempUnit::Celsius => WindUnit::Kmh,
            TempUnit::Fahrenheit => WindUnit::Mph,
        }
    }
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TempUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "C" => Ok(TempUnit::Celsius),
            "F" => Ok(TempUnit::Fahrenheit),
            _ => Err(ValidationError::TempUnit(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    Kmh,
    Mph,
}

impl WindUnit {
    /// Suffix used in formatted output.
    pub fn as_str(&self) -> &'static str {
        match self {
            WindUnit::Kmh => "kmh",
            WindUnit::Mph => "mph",
        }
    }
}

impl fmt::Display for WindUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "kmh" => Ok(WindUnit::Kmh),
            "mph" => Ok(WindUnit::Mph),
            _ => Err(ValidationError::WindUnit(s.to_string())),
        }
    }
}

/// A number read from widget text, with the count of decimals it was rendered with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub decimals: usize,
}

/// Parses the leading number of strings like `"25"`, `"10 km/h"`, `"80%"` or `"−3,5"`.
pub fn parse_reading(raw: &str) -> Option<Reading> {
    let normalized: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '\u{2212}' => '-',
            ',' => '.',
            other => other,
        })
        .collect();

    let start = normalized.find(|c: char| c.is_ascii_digit() || c == '-' || c == '+')?;
    let token: String = normalized[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        .collect();

    let value: f64 = token.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let decimals = token.split_once('.').map_or(0, |(_, frac)| frac.len());

    Some(Reading { value, decimals })
}

pub fn convert_temperature(value: f64, from: TempUnit, to: TempUnit) -> f64 {
    match (from, to) {
        (TempUnit::Celsius, TempUnit::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
        (TempUnit::Fahrenheit, TempUnit::Celsius) => (value - 32.0) * 5.0 / 9.0,
        _ => value,
    }
}

pub fn convert_wind(value: f64, from: WindUnit, to: WindUnit) -> f64 {
    match (from, to) {
        (WindUnit::Kmh, WindUnit::Mph) => value * MPH_PER_KMH,
        (WindUnit::Mph, WindUnit::Kmh) => value / MPH_PER_KMH,
        _ => value,
    }
}

/// Formats a raw temperature in `to`, keeping the source precision with at
/// least one decimal: `"25"` in °C becomes `"25.0°C"` or `"77.0°F"`.
pub fn to_temperature(raw: &str, from: TempUnit, to: TempUnit) -> Result<String, ScrapeError> {
    let reading = parse_reading(raw).ok_or_else(|| ScrapeError::Unparseable {
        field: Field::Temperature,
        raw: raw.to_string(),
    })?;

    let value = convert_temperature(reading.value, from, to);
    Ok(format!("{}°{}", format_fixed(value, reading.decimals.max(1)), to))
}

/// Formats a raw wind speed in `to`.
///
/// When the reading is already in `to` the number is kept as rendered,
/// otherwise it is converted and rounded to one decimal.
pub fn to_wind(raw: &str, from: WindUnit, to: WindUnit) -> Result<String, ScrapeError> {
    let reading = parse_reading(raw).ok_or_else(|| ScrapeError::Unparseable {
        field: Field::Wind,
        raw: raw.to_string(),
    })?;

    let value = if from == to {
        format_fixed(reading.value, reading.decimals)
    } else {
        format_fixed(convert_wind(reading.value, from, to), 1)
    };
    Ok(format!("{value}{to}"))
}

/// Normalizes humidity text such as `"80%"` or `"80 %"` to `"80%"`.
pub fn format_humidity(raw: &str) -> Result<String, ScrapeError> {
    let reading = parse_reading(raw).ok_or_else(|| ScrapeError::Unparseable {
        field: Field::Humidity,
        raw: raw.to_string(),
    })?;

    Ok(format!("{}%", format_fixed(reading.value, reading.decimals)))
}

fn format_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    // "-0.0" after rounding
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}
