//! Cleaning of the location text scraped next to the weather widget.
//!
//! The heading arrives in many shapes depending on locale and on which element
//! it was read from: `"Resultados para Madrid, España"`,
//! `"Tokyo Weather - 14 Day Forecast"`, `"Météo à Paris | 7 Day Forecast"`.
//! [`clean_location`] runs the [`CleaningStep`]s in [`CleaningStep::ORDER`];
//! each step receives the previous one's output and never empties it.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// "Results for" headings, matched at the start of the text.
const RESULTS_PREFIXES: &[&str] = &[
    "Resultados para ",
    "Results for ",
    "Résultats pour ",
    "Ergebnisse für ",
    "Risultati per ",
];

static DECORATIVE_SUFFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // any pipe-delimited tail: "| 7 Day Forecast", "| Pronóstico"
        r"\s*\|.*$",
        // "- 14 Day Forecast", "– 10 días"
        r"(?i)\s+[-–—]\s+\d+[\s-]*(?:day|days|días|dias|jours|tage|giorni)\b.*$",
        r"(?i)\s+(?:hourly|por\s+horas|horaire|heure\s+par\s+heure|stündlich|orario)$",
        r"(?i)\s+(?:forecast|pronóstico|pronostico|prévisions|vorhersage|previsioni|previsão)$",
        r"(?i)\s+(?:weather|clima|tiempo|météo|meteo|wetter|tempo)$",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("decorative suffix pattern is valid"))
    .collect()
});

static WEATHER_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:weather\s+(?:in|for)|clima\s+(?:en|de)|(?:el\s+)?tiempo\s+en|météo\s+(?:à|a|de|pour)|meteo\s+(?:a|di)|wetter\s+(?:in|für)|previsão\s+do\s+tempo\s+(?:em|para)|tempo\s+em)\s+(\S.*)$",
    )
    .expect("weather phrase pattern is valid")
});

static REGION_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[-–—]\s+").expect("region dash pattern is valid"));

/// One stage of location cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningStep {
    /// Drops a leading "Results for " style phrase.
    StripResultsPrefix,
    /// Drops hourly/forecast/pipe tails and a trailing "Weather" word, repeatedly.
    StripDecorativeSuffix,
    /// Drops a leading "Weather in " style phrase when a city follows.
    StripWeatherPhrase,
    /// Cuts at the first comma or spaced dash, keeping the city.
    TruncateRegion,
    CollapseWhitespace,
}

impl CleaningStep {
    pub const ORDER: [CleaningStep; 5] = [
        CleaningStep::StripResultsPrefix,
        CleaningStep::StripDecorativeSuffix,
        CleaningStep::StripWeatherPhrase,
        CleaningStep::TruncateRegion,
        CleaningStep::CollapseWhitespace,
    ];

    pub fn apply(self, input: &str) -> String {
        let input = input.trim();
        let output = match self {
            CleaningStep::StripResultsPrefix => strip_results_prefix(input),
            CleaningStep::StripDecorativeSuffix => strip_decorative_suffix(input),
            CleaningStep::StripWeatherPhrase => strip_weather_phrase(input),
            CleaningStep::TruncateRegion => truncate_region(input),
            CleaningStep::CollapseWhitespace => collapse_whitespace(input),
        };

        if output.is_empty() {
            input.to_string()
        } else {
            output
        }
    }
}

/// Reduces a scraped location heading to the city name.
///
/// ```
/// use gweather_core::clean_location;
///
/// assert_eq!(clean_location("Weather in New York Hourly"), "New York");
/// assert_eq!(clean_location("Buenos Aires, Argentina"), "Buenos Aires");
/// ```
pub fn clean_location(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    for step in CleaningStep::ORDER {
        let next = step.apply(&text);
        if next != text {
            trace!(?step, before = %text, after = %next, "location cleaning step");
        }
        text = next;
    }
    text
}

fn strip_results_prefix(input: &str) -> String {
    RESULTS_PREFIXES
        .iter()
        .find_map(|prefix| input.strip_prefix(prefix))
        .unwrap_or(input)
        .trim()
        .to_string()
}

fn strip_decorative_suffix(input: &str) -> String {
    // only the text after a leading "Weather in" phrase can carry tails
    match WEATHER_PHRASE.captures(input).and_then(|caps| caps.get(1)) {
        Some(city) => {
            let (phrase, rest) = input.split_at(city.start());
            format!("{phrase}{}", strip_tails(rest))
        }
        None => strip_tails(input),
    }
}

fn strip_tails(input: &str) -> String {
    let mut text = input.to_string();
    loop {
        let stripped = DECORATIVE_SUFFIXES.iter().find_map(|pattern| {
            let candidate = pattern.replace(&text, "");
            let candidate = candidate.trim();
            (candidate.len() < text.len() && !candidate.is_empty())
                .then(|| candidate.to_string())
        });

        match stripped {
            Some(next) => text = next,
            None => return text,
        }
    }
}

fn strip_weather_phrase(input: &str) -> String {
    WEATHER_PHRASE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map_or(input, |city| city.as_str())
        .trim()
        .to_string()
}

fn truncate_region(input: &str) -> String {
    let cut = match input.find(',') {
        Some(idx) => &input[..idx],
        None => match REGION_DASH.find(input) {
            Some(m) => &input[..m.start()],
            None => input,
        },
    };
    cut.trim().to_string()
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_titles_and_forecast_tails() {
        let cases = [
            ("Weather in New York Hourly", "New York"),
            ("Météo à Paris | 7 Day Forecast", "Paris"),
            ("Tokyo Weather - 14 Day Forecast", "Tokyo"),
            ("Clima en Buenos Aires | Pronóstico", "Buenos Aires"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_location(input), expected, "{input}");
        }
    }

    #[test]
    fn drops_region_and_country_fragments() {
        let cases = [
            ("Buenos Aires, Argentina", "Buenos Aires"),
            ("Weather in New York, NY", "New York"),
            ("Météo à Paris, France", "Paris"),
            ("Wetter in Berlin - Deutschland", "Berlin"),
            ("Resultados para Madrid, España", "Madrid"),
            ("Results for Tokyo, Japan", "Tokyo"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_location(input), expected, "{input}");
        }
    }

    #[test]
    fn keeps_hyphenated_and_multi_word_cities() {
        assert_eq!(clean_location("Stratford-upon-Avon, UK"), "Stratford-upon-Avon");
        assert_eq!(clean_location("  San   Carlos de  Bariloche "), "San Carlos de Bariloche");
        assert_eq!(clean_location("Buenos Aires"), "Buenos Aires");
    }

    #[test]
    fn never_strips_the_whole_text() {
        assert_eq!(clean_location("Weather"), "Weather");
        assert_eq!(clean_location("Hourly"), "Hourly");
        assert_eq!(clean_location("Weather in"), "Weather in");
        assert_eq!(clean_location("   "), "");
    }

    #[test]
    fn suffix_runs_before_weather_phrase() {
        // the tail goes first, then the phrase
        assert_eq!(CleaningStep::ORDER[1], CleaningStep::StripDecorativeSuffix);
        assert_eq!(CleaningStep::ORDER[2], CleaningStep::StripWeatherPhrase);
        assert_eq!(
            CleaningStep::StripDecorativeSuffix.apply("Weather in New York Hourly"),
            "Weather in New York"
        );
        assert_eq!(CleaningStep::StripWeatherPhrase.apply("Weather in New York"), "New York");
    }

    #[test]
    fn city_named_like_a_weather_word_survives() {
        let cases = [
            ("Weather in Wetter Hourly", "Wetter"),
            ("Weather in Tempo", "Tempo"),
            ("Météo à Meteo | 7 Day Forecast", "Meteo"),
            ("Clima en Tiempo, Chile", "Tiempo"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_location(input), expected, "{input}");
        }
    }

    #[test]
    fn each_step_is_a_no_op_on_a_bare_city() {
        for step in CleaningStep::ORDER {
            assert_eq!(step.apply("Berlin"), "Berlin", "{step:?}");
        }
    }
}
