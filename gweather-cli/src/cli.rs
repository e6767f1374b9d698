use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gweather_core::{
    Config, DriverId, LocaleRegistry, ScraperConfig, SessionFactory, WeatherError, WeatherQuery,
    WeatherResult, WeatherScraper,
    driver::{chrome::ChromeDriver, http::HttpDriver},
};
use inquire::{Confirm, Select};
use tracing::debug;

const LOCALE_DEFAULT: &str = "locale default";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "gweather", version, about = "Current weather from a search results page")]
pub struct Cli {
    /// More logging on stderr (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a default language, units and driver.
    Configure,

    /// Show the current weather for a city.
    Show {
        /// City name, e.g. "Buenos Aires".
        city: String,

        /// Language of the search, e.g. "es" or "en-GB".
        #[arg(long)]
        lang: Option<String>,

        /// Temperature unit, C or F.
        #[arg(long)]
        temp_unit: Option<String>,

        /// Wind unit, kmh or mph.
        #[arg(long)]
        wind_unit: Option<String>,

        /// Driver short name, "chrome" or "http".
        #[arg(long)]
        driver: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List supported languages and their default units.
    Languages,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                city,
                lang,
                temp_unit,
                wind_unit,
                driver,
                json,
            } => {
                let cfg = Config::load()?;
                let driver = match driver {
                    Some(name) => DriverId::try_from(name.as_str())?,
                    None => cfg.default_driver_id()?,
                };
                let query = cfg.query_for(&city, lang, temp_unit, wind_unit);
                debug!(%driver, ?query, "resolved lookup");

                let weather = match driver {
                    DriverId::Chrome => {
                        lookup(ChromeDriver::new(&cfg.scraper), &cfg.scraper, &query).await
                    }
                    DriverId::Http => {
                        lookup(HttpDriver::new(&cfg.scraper)?, &cfg.scraper, &query).await
                    }
                }?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&weather)?);
                } else {
                    print_weather(&weather);
                }
                Ok(())
            }
            Command::Languages => {
                print_languages();
                Ok(())
            }
        }
    }
}

async fn lookup<F: SessionFactory>(
    factory: F,
    config: &ScraperConfig,
    query: &WeatherQuery,
) -> Result<WeatherResult, WeatherError> {
    WeatherScraper::new(factory, config).get_weather(query).await
}

fn print_weather(weather: &WeatherResult) {
    println!("{}", weather.location);
    println!("  Condition:   {}", weather.condition);
    println!("  Temperature: {}", weather.temperature);
    println!("  Humidity:    {}", weather.humidity);
    println!("  Wind:        {}", weather.wind);
}

fn print_languages() {
    println!("{:<6} {:<7} {:<5} {:<5} QUERY", "LANG", "LOCALE", "TEMP", "WIND");
    for locale in LocaleRegistry::global().entries() {
        println!(
            "{:<6} {:<7} {:<5} {:<5} {}",
            locale.lang,
            locale.locale_tag,
            locale.default_temp_unit.as_str(),
            locale.default_wind_unit.as_str(),
            locale.query_template
        );
    }
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    let langs: Vec<&str> = LocaleRegistry::global()
        .entries()
        .iter()
        .map(|locale| locale.lang)
        .collect();
    let current = langs
        .iter()
        .position(|lang| lang.eq_ignore_ascii_case(cfg.default_lang()))
        .unwrap_or(0);
    let lang = Select::new("Default language:", langs)
        .with_starting_cursor(current)
        .prompt()
        .context("Language selection aborted")?;
    cfg.default_lang = Some(lang.to_string());

    cfg.temp_unit = select_unit("Temperature unit:", &["C", "F"], cfg.temp_unit.as_deref())?;
    cfg.wind_unit = select_unit("Wind unit:", &["kmh", "mph"], cfg.wind_unit.as_deref())?;

    let drivers = DriverId::all().to_vec();
    let current = cfg.default_driver_id().unwrap_or_default();
    let driver = Select::new("Default driver:", drivers.clone())
        .with_starting_cursor(drivers.iter().position(|d| *d == current).unwrap_or(0))
        .prompt()
        .context("Driver selection aborted")?;
    cfg.set_default_driver(driver);

    if driver == DriverId::Chrome {
        cfg.scraper.headless = Confirm::new("Run the browser headless?")
            .with_default(cfg.scraper.headless)
            .prompt()
            .context("Headless prompt aborted")?;
    }

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

/// `None` keeps the locale's own default unit.
fn select_unit(
    message: &str,
    units: &[&'static str],
    current: Option<&str>,
) -> Result<Option<String>> {
    let options: Vec<&str> = std::iter::once(LOCALE_DEFAULT)
        .chain(units.iter().copied())
        .collect();
    let cursor = current
        .and_then(|unit| options.iter().position(|o| o.eq_ignore_ascii_case(unit)))
        .unwrap_or(0);

    let choice = Select::new(message, options)
        .with_starting_cursor(cursor)
        .prompt()
        .with_context(|| format!("{message} selection aborted"))?;

    Ok((choice != LOCALE_DEFAULT).then(|| choice.to_string()))
}
