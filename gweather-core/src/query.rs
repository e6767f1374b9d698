//! Search phrase and results-page URL for a city.

use url::Url;

use crate::{error::ScrapeError, locale::LocaleConfig};

pub const CITY_PLACEHOLDER: &str = "{city}";

/// Fills the locale's query template with `city`, joining words with `+`:
/// `"clima en {city}"` and `"Buenos Aires"` give `"clima+en+Buenos+Aires"`.
pub fn build_query(city: &str, locale: &LocaleConfig) -> Result<String, ScrapeError> {
    let template = locale.query_template;
    if !template.contains(CITY_PLACEHOLDER) {
        return Err(ScrapeError::Config(format!(
            "query template '{template}' for '{}' has no {CITY_PLACEHOLDER} placeholder",
            locale.lang
        )));
    }

    let phrase = template.replace(CITY_PLACEHOLDER, city.trim());
    Ok(phrase.split_whitespace().collect::<Vec<_>>().join("+"))
}

/// `<base>/search?q=<query>&hl=<lang>`, form-encoded.
pub fn search_url(base_url: &str, query: &str, locale: &LocaleConfig) -> Result<Url, ScrapeError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ScrapeError::Config(format!("invalid base url '{base_url}': {e}")))?;

    url.path_segments_mut()
        .map_err(|_| ScrapeError::Config(format!("base url '{base_url}' cannot have a path")))?
        .pop_if_empty()
        .push("search");

    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("hl", locale.lang);

    Ok(url)
}
