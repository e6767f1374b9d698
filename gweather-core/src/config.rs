use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{driver::DriverId, locale::FALLBACK_LANG, model::WeatherQuery};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// How pages are fetched and how long the pipeline waits for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Search engine origin (default: <https://www.google.com>).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bounded wait for the weather widget, in seconds (default: 30).
    #[serde(default = "default_widget_timeout")]
    pub widget_timeout_secs: u64,

    /// Bounded wait for the location heading, in seconds (default: 5).
    #[serde(default = "default_location_timeout")]
    pub location_timeout_secs: u64,

    /// HTTP driver request timeout, in seconds (default: 30).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Chromium binary; auto-detected when absent.
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://www.google.com".to_string()
}

const fn default_widget_timeout() -> u64 {
    30
}

const fn default_location_timeout() -> u64 {
    5
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_headless() -> bool {
    true
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            widget_timeout_secs: default_widget_timeout(),
            location_timeout_secs: default_location_timeout(),
            request_timeout_secs: default_request_timeout(),
            headless: default_headless(),
            user_agent: default_user_agent(),
            chrome_executable: None,
        }
    }
}

impl ScraperConfig {
    pub fn widget_timeout(&self) -> Duration {
        Duration::from_secs(self.widget_timeout_secs)
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_secs(self.location_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Language used when none is given, e.g. "es" or "en-GB".
    pub default_lang: Option<String>,

    /// Temperature unit override, "C" or "F". Absent means the locale default.
    pub temp_unit: Option<String>,

    /// Wind unit override, "kmh" or "mph". Absent means the locale default.
    pub wind_unit: Option<String>,

    /// Driver id, "chrome" or "http".
    pub default_driver: Option<String>,

    /// Example TOML:
    /// [scraper]
    /// widget_timeout_secs = 30
    /// headless = false
    #[serde(default)]
    pub scraper: ScraperConfig,
}

impl Config {
    /// Return the configured driver as a strongly-typed DriverId.
    pub fn default_driver_id(&self) -> Result<DriverId> {
        match self.default_driver.as_deref() {
            Some(s) => DriverId::try_from(s),
            None => Ok(DriverId::default()),
        }
    }

    pub fn set_default_driver(&mut self, id: DriverId) {
        self.default_driver = Some(id.as_str().to_string());
    }

    pub fn default_lang(&self) -> &str {
        self.default_lang.as_deref().unwrap_or(FALLBACK_LANG)
    }

    /// Build a query for `city`; explicit arguments win over stored defaults.
    pub fn query_for(
        &self,
        city: &str,
        lang: Option<String>,
        temp_unit: Option<String>,
        wind_unit: Option<String>,
    ) -> WeatherQuery {
        WeatherQuery {
            city: city.to_string(),
            lang: lang.unwrap_or_else(|| self.default_lang().to_string()),
            temp_unit: temp_unit.or_else(|| self.temp_unit.clone()),
            wind_unit: wind_unit.or_else(|| self.wind_unit.clone()),
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "gweather", "gweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_driver_is_chrome_when_not_set() {
        let cfg = Config::default();
        assert_eq!(cfg.default_driver_id().unwrap(), DriverId::Chrome);
    }

    #[test]
    fn set_default_driver_overrides_default() {
        let mut cfg = Config::default();
        cfg.set_default_driver(DriverId::Http);

        let driver = cfg.default_driver_id().expect("driver must parse");
        assert_eq!(driver, DriverId::Http);
    }

    #[test]
    fn unknown_stored_driver_errors() {
        let cfg = Config {
            default_driver: Some("lynx".into()),
            ..Config::default()
        };
        assert!(cfg.default_driver_id().unwrap_err().to_string().contains("Unknown driver"));
    }

    #[test]
    fn explicit_arguments_win_over_stored_defaults() {
        let cfg = Config {
            default_lang: Some("es".into()),
            temp_unit: Some("F".into()),
            ..Config::default()
        };

        let query = cfg.query_for("Madrid", None, None, None);
        assert_eq!(query.lang, "es");
        assert_eq!(query.temp_unit.as_deref(), Some("F"));
        assert_eq!(query.wind_unit, None);

        let query = cfg.query_for(
            "Madrid",
            Some("de".into()),
            Some("C".into()),
            Some("mph".into()),
        );
        assert_eq!(query.lang, "de");
        assert_eq!(query.temp_unit.as_deref(), Some("C"));
        assert_eq!(query.wind_unit.as_deref(), Some("mph"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_lang(), "en");
        assert_eq!(cfg.scraper, ScraperConfig::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config {
            default_lang: Some("fr".into()),
            wind_unit: Some("kmh".into()),
            ..Config::default()
        };
        cfg.set_default_driver(DriverId::Http);
        cfg.scraper.headless = false;
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_lang(), "fr");
        assert_eq!(loaded.wind_unit.as_deref(), Some("kmh"));
        assert_eq!(loaded.default_driver_id().unwrap(), DriverId::Http);
        assert!(!loaded.scraper.headless);
        assert_eq!(loaded.scraper.widget_timeout_secs, 30);
    }

    #[test]
    fn partial_scraper_table_fills_defaults() {
        let cfg: Config = toml::from_str("[scraper]\nwidget_timeout_secs = 10\n").unwrap();
        assert_eq!(cfg.scraper.widget_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.scraper.location_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.scraper.base_url, "https://www.google.com");
    }
}
