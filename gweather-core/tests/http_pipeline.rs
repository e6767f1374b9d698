//! Integration tests for the lookup pipeline using wiremock
//!
//! The HTTP driver fetches a canned results page from a mock server, so the
//! whole pipeline runs from query validation to the formatted result.

use gweather_core::{
    ScrapeError, ScraperConfig, WeatherError, WeatherQuery, WeatherResult, WeatherScraper,
    driver::http::HttpDriver,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

/// Results page with the weather widget, rendered in `unit`.
fn results_page(temperature: &str, unit: &str, heading: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <body>
    <div class="BBwThe">{heading}</div>
    <div id="wob_wc">
      <span id="wob_tm">{temperature}</span>
      <div class="vk_bk wob-unit">
        <span aria-disabled="true">{unit}</span>
        <a role="button">°X</a>
      </div>
      <div id="wob_dc">Soleado</div>
      <div>Humedad: <span id="wob_hm">80%</span></div>
      <div>Viento: <span id="wob_ws">10 km/h</span><span id="wob_tws">6 mph</span></div>
    </div>
  </body>
</html>"#
    )
}

/// Create a scraper that fetches from the mock server
fn scraper(server: &MockServer) -> WeatherScraper<HttpDriver> {
    let config = ScraperConfig {
        base_url: server.uri(),
        ..ScraperConfig::default()
    };
    let driver = HttpDriver::new(&config).expect("http client");
    WeatherScraper::new(driver, &config)
}

async fn serve(server: &MockServer, query: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn spanish_lookup_uses_metric_defaults() {
    // metric defaults need "es": the "en" defaults are F/mph
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "clima+en+Buenos+Aires"))
        .and(query_param("hl", "es"))
        .and(header("accept-language", "es-ES"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(results_page("25", "°C", "Buenos Aires")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let query = WeatherQuery::new("Buenos Aires").lang("es");
    let weather = scraper(&server).get_weather(&query).await.unwrap();

    assert_eq!(
        weather,
        WeatherResult {
            temperature: "25.0°C".into(),
            humidity: "80%".into(),
            wind: "10kmh".into(),
            condition: "Soleado".into(),
            location: "Buenos Aires".into(),
        }
    );
}

#[tokio::test]
async fn overrides_convert_metric_page() {
    let server = MockServer::start().await;
    serve(&server, "clima+en+Buenos+Aires", results_page("25", "°C", "Buenos Aires")).await;

    let query = WeatherQuery::new("Buenos Aires")
        .lang("es")
        .temp_unit("F")
        .wind_unit("mph");
    let weather = scraper(&server).get_weather(&query).await.unwrap();

    assert_eq!(weather.temperature, "77.0°F");
    assert_eq!(weather.wind, "6.2mph");
    assert_eq!(weather.humidity, "80%");
}

#[tokio::test]
async fn english_lookup_reads_imperial_page() {
    let server = MockServer::start().await;
    serve(
        &server,
        "weather+in+New+York",
        results_page("77", "°F", "Results for New York, NY"),
    )
    .await;

    let weather = scraper(&server)
        .get_weather(&WeatherQuery::new("New York"))
        .await
        .unwrap();

    assert_eq!(weather.temperature, "77.0°F");
    assert_eq!(weather.wind, "6mph");
    assert_eq!(weather.location, "New York");
}

#[tokio::test]
async fn unknown_language_falls_back_to_english() {
    let server = MockServer::start().await;
    serve(&server, "weather+in+Tokyo", results_page("20", "°C", "Tokyo")).await;

    let weather = scraper(&server)
        .get_weather(&WeatherQuery::new("Tokyo").lang("xx"))
        .await
        .unwrap();

    assert_eq!(weather.temperature, "68.0°F");
    assert_eq!(weather.wind, "6.2mph");
}

#[tokio::test]
async fn error_status_is_wrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = scraper(&server)
        .get_weather(&WeatherQuery::new("New York"))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Scrape(ScrapeError::Status(404))));
    assert_eq!(err.to_string(), "Error getting weather: 404");
}

#[tokio::test]
async fn page_without_widget_is_an_error() {
    let server = MockServer::start().await;
    serve(
        &server,
        "weather+in+ThisCityDoesNotExist12345",
        "<html><body><p>No results</p></body></html>".to_string(),
    )
    .await;

    let err = scraper(&server)
        .get_weather(&WeatherQuery::new("ThisCityDoesNotExist12345"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Error getting weather"));
    assert!(matches!(err, WeatherError::Scrape(ScrapeError::WidgetNotFound)));
}

#[tokio::test]
async fn invalid_unit_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = scraper(&server)
        .get_weather(&WeatherQuery::new("Paris").temp_unit("X"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "Invalid temperature unit 'X'. Supported units: C, F."
    );
}

#[tokio::test]
async fn rate_limited_page_reports_its_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>unusual traffic</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = scraper(&server)
        .get_weather(&WeatherQuery::new("Paris").lang("fr"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Error getting weather: 503");
}
