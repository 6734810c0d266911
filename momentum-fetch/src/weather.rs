//! OpenWeatherMap lookup for the selected city (Celsius, Korean locale).

use momentum_core::WeatherInfo;
use serde::Deserialize;

use crate::error::FetchError;

const OWM_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Deserialize)]
struct OwmResponse {
    name: Option<String>,
    #[serde(default)]
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    #[serde(default)]
    wind: OwmWind,
}

#[derive(Debug, Default, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmWeather {
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
}

/// Fetch current weather for `city`.
///
/// An empty credential short-circuits before any network I/O. Missing
/// numeric fields render as empty strings rather than failing the whole
/// lookup.
pub async fn fetch_weather(
    client: &reqwest::Client,
    city: &str,
    api_key: &str,
) -> Result<WeatherInfo, FetchError> {
    if city.is_empty() || api_key.is_empty() {
        return Err(FetchError::MissingCredential);
    }

    let resp = client
        .get(OWM_URL)
        .query(&[
            ("q", city),
            ("appid", api_key),
            ("units", "metric"),
            ("lang", "kr"),
        ])
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body: OwmResponse = resp
        .json()
        .await
        .map_err(|e| FetchError::MalformedBody(e.to_string()))?;

    tracing::debug!(city, "weather fetch ok");

    let description = body
        .weather
        .first()
        .and_then(|w| w.description.clone())
        .unwrap_or_default();

    Ok(WeatherInfo {
        city: body.name.unwrap_or_else(|| city.to_string()),
        temp_c: num_text(body.main.temp),
        feels_like_c: num_text(body.main.feels_like),
        description,
        humidity: num_text(body.main.humidity),
        wind_ms: num_text(body.wind.speed),
    })
}

fn num_text(v: Option<f64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}
