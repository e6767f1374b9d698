//! Per-language lookup settings: browser locale, default units, search phrasing
//! and the condition words the widget uses in that language.
//!
//! The table is a process-wide static; [`LocaleRegistry::resolve`] never fails
//! and falls back to English for tags it does not know.

use crate::units::{TempUnit, WindUnit};

/// Language used when a tag resolves to nothing else.
pub const FALLBACK_LANG: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Language tag this entry is keyed by, e.g. `en-GB`.
    pub lang: &'static str,
    /// Locale handed to the browser, e.g. `es-ES`.
    pub locale_tag: &'static str,
    pub default_temp_unit: TempUnit,
    pub default_wind_unit: WindUnit,
    /// Search phrase with a `{city}` placeholder.
    pub query_template: &'static str,
    /// Canonical condition key to the word the widget shows in this language.
    pub condition_translations: &'static [(&'static str, &'static str)],
}

impl LocaleConfig {
    /// Canonical key of the first translation contained in `condition`.
    pub fn condition_key(&self, condition: &str) -> Option<&'static str> {
        let condition = condition.to_lowercase();
        self.condition_translations
            .iter()
            .find(|(_, word)| condition.contains(&word.to_lowercase()))
            .map(|(key, _)| *key)
    }

    pub fn recognizes_condition(&self, condition: &str) -> bool {
        self.condition_key(condition).is_some()
    }

    pub fn translation(&self, key: &str) -> Option<&'static str> {
        self.condition_translations
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, word)| *word)
    }
}

const EN_CONDITIONS: &[(&str, &str)] = &[
    ("sunny", "Sunny"),
    ("clear", "Clear"),
    ("partly_cloudy", "Partly cloudy"),
    ("mostly_cloudy", "Mostly cloudy"),
    ("cloudy", "Cloudy"),
    ("overcast", "Overcast"),
    ("showers", "Showers"),
    ("drizzle", "Drizzle"),
    ("rain", "Rain"),
    ("thunderstorm", "Thunderstorm"),
    ("snow", "Snow"),
    ("fog", "Fog"),
    ("mist", "Mist"),
    ("haze", "Haze"),
    ("windy", "Windy"),
];

const ES_CONDITIONS: &[(&str, &str)] = &[
    ("sunny", "Soleado"),
    ("clear", "Despejado"),
    ("partly_cloudy", "Parcialmente nublado"),
    ("mostly_cloudy", "Mayormente nublado"),
    ("cloudy", "Nublado"),
    ("overcast", "Cubierto"),
    ("showers", "Chubascos"),
    ("drizzle", "Llovizna"),
    ("rain", "Lluvia"),
    ("thunderstorm", "Tormenta"),
    ("snow", "Nieve"),
    ("fog", "Niebla"),
    ("mist", "Neblina"),
    ("haze", "Bruma"),
    ("windy", "Ventoso"),
];

const FR_CONDITIONS: &[(&str, &str)] = &[
    ("sunny", "Ensoleillé"),
    ("clear", "Dégagé"),
    ("partly_cloudy", "Partiellement nuageux"),
    ("mostly_cloudy", "Généralement nuageux"),
    ("cloudy", "Nuageux"),
    ("overcast", "Couvert"),
    ("showers", "Averses"),
    ("drizzle", "Bruine"),
    ("rain", "Pluie"),
    ("thunderstorm", "Orage"),
    ("snow", "Neige"),
    ("fog", "Brouillard"),
    ("mist", "Brume"),
    ("haze", "Brume sèche"),
    ("windy", "Venteux"),
];

const DE_CONDITIONS: &[(&str, &str)] = &[
    ("sunny", "Sonnig"),
    ("clear", "Klar"),
    ("partly_cloudy", "Teilweise bewölkt"),
    ("mostly_cloudy", "Überwiegend bewölkt"),
    ("cloudy", "Bewölkt"),
    ("overcast", "Bedeckt"),
    ("showers", "Schauer"),
    ("drizzle", "Nieselregen"),
    ("rain", "Regen"),
    ("thunderstorm", "Gewitter"),
    ("snow", "Schnee"),
    ("fog", "Nebel"),
    ("mist", "Dunst"),
    ("windy", "Windig"),
];

const IT_CONDITIONS: &[(&str, &str)] = &[
    ("sunny", "Soleggiato"),
    ("clear", "Sereno"),
    ("partly_cloudy", "Parzialmente nuvoloso"),
    ("mostly_cloudy", "Prevalentemente nuvoloso"),
    ("cloudy", "Nuvoloso"),
    ("overcast", "Coperto"),
    ("showers", "Rovesci"),
    ("drizzle", "Pioggerella"),
    ("rain", "Pioggia"),
    ("thunderstorm", "Temporale"),
    ("snow", "Neve"),
    ("fog", "Nebbia"),
    ("mist", "Foschia"),
    ("windy", "Ventoso"),
];

const PT_CONDITIONS: &[(&str, &str)] = &[
    ("sunny", "Ensolarado"),
    ("clear", "Céu limpo"),
    ("partly_cloudy", "Parcialmente nublado"),
    ("mostly_cloudy", "Predominantemente nublado"),
    ("cloudy", "Nublado"),
    ("overcast", "Encoberto"),
    ("showers", "Pancadas de chuva"),
    ("drizzle", "Garoa"),
    ("rain", "Chuva"),
    ("thunderstorm", "Tempestade"),
    ("snow", "Neve"),
    ("fog", "Nevoeiro"),
    ("mist", "Névoa"),
    ("windy", "Ventania"),
];

// The first entry doubles as the fallback.
const LOCALES: &[LocaleConfig] = &[
    LocaleConfig {
        lang: "en",
        locale_tag: "en-US",
        default_temp_unit: TempUnit::Fahrenheit,
        default_wind_unit: WindUnit::Mph,
        query_template: "weather in {city}",
        condition_translations: EN_CONDITIONS,
    },
    LocaleConfig {
        lang: "en-GB",
        locale_tag: "en-GB",
        default_temp_unit: TempUnit::Celsius,
        default_wind_unit: WindUnit::Mph,
        query_template: "weather in {city}",
        condition_translations: EN_CONDITIONS,
    },
    LocaleConfig {
        lang: "es",
        locale_tag: "es-ES",
        default_temp_unit: TempUnit::Celsius,
        default_wind_unit: WindUnit::Kmh,
        query_template: "clima en {city}",
        condition_translations: ES_CONDITIONS,
    },
    LocaleConfig {
        lang: "fr",
        locale_tag: "fr-FR",
        default_temp_unit: TempUnit::Celsius,
        default_wind_unit: WindUnit::Kmh,
        query_template: "météo à {city}",
        condition_translations: FR_CONDITIONS,
    },
    LocaleConfig {
        lang: "de",
        locale_tag: "de-DE",
        default_temp_unit: TempUnit::Celsius,
        default_wind_unit: WindUnit::Kmh,
        query_template: "wetter in {city}",
        condition_translations: DE_CONDITIONS,
    },
    LocaleConfig {
        lang: "it",
        locale_tag: "it-IT",
        default_temp_unit: TempUnit::Celsius,
        default_wind_unit: WindUnit::Kmh,
        query_template: "meteo a {city}",
        condition_translations: IT_CONDITIONS,
    },
    LocaleConfig {
        lang: "pt",
        locale_tag: "pt-BR",
        default_temp_unit: TempUnit::Celsius,
        default_wind_unit: WindUnit::Kmh,
        query_template: "previsão do tempo em {city}",
        condition_translations: PT_CONDITIONS,
    },
];

static REGISTRY: LocaleRegistry = LocaleRegistry {
    entries: LOCALES,
    fallback: &LOCALES[0],
};

/// Read-only table of [`LocaleConfig`]s.
#[derive(Debug)]
pub struct LocaleRegistry {
    entries: &'static [LocaleConfig],
    fallback: &'static LocaleConfig,
}

impl LocaleRegistry {
    /// The built-in table shared by every lookup.
    pub fn global() -> &'static LocaleRegistry {
        &REGISTRY
    }

    pub fn entries(&self) -> &'static [LocaleConfig] {
        self.entries
    }

    /// Entry keyed exactly by `lang` (case-insensitive, `_` accepted for `-`).
    pub fn get(&self, lang: &str) -> Option<&'static LocaleConfig> {
        let tag = normalize_tag(lang);
        self.entries
            .iter()
            .find(|entry| entry.lang.eq_ignore_ascii_case(&tag))
    }

    /// Exact tag first, then the primary subtag, then English.
    ///
    /// A regional entry such as `en-GB` wins over the bare language when both
    /// exist; `en-AU` has no entry of its own and resolves to `en`.
    pub fn resolve(&self, lang: &str) -> &'static LocaleConfig {
        if let Some(entry) = self.get(lang) {
            return entry;
        }

        let tag = normalize_tag(lang);
        let primary = tag.split('-').next().unwrap_or_default();
        self.get(primary).unwrap_or(self.fallback)
    }
}

fn normalize_tag(lang: &str) -> String {
    lang.trim().replace('_', "-")
}
