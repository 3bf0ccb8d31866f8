//! Plain-text weather reports

use crate::config::Settings;
use crate::error::{FetchError, FetchResult};
use crate::models::WeatherReport;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use percent_encoding::percent_decode_str;
use reqwest::{Client, Url};

/// Four pipe-delimited fields: condition, temperature, humidity, wind
pub const WEATHER_FORMAT: &str = "%C|🌡️ Temperature: %t|💧 Humidity: %h|💨 Wind: %w";

const TEMPERATURE_LABELS: &[&str] = &["🌡️ Temperature:", "🌡 Temperature:", "Temperature:"];
const HUMIDITY_LABELS: &[&str] = &["💧 Humidity:", "Humidity:"];
const WIND_LABELS: &[&str] = &["💨 Wind:", "Wind:"];

pub const DAY_SYMBOL: &str = "🌞";
pub const NIGHT_SYMBOL: &str = "🌙";
pub const NEUTRAL_SYMBOL: &str = "🌤️";

pub async fn fetch_weather(
    client: &Client,
    settings: &Settings,
    city: &str,
) -> FetchResult<WeatherReport> {
    let url = city_url(&settings.weather_url, city)?;

    let response = client
        .get(url)
        .query(&[("format", WEATHER_FORMAT)])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() || body.trim().is_empty() {
        return Err(FetchError::not_found(
            "Could not retrieve weather data. Please check the city name.",
        ));
    }

    let symbol = day_night_symbol(settings.resolved_timezone(), Utc::now());
    parse_report(city, &body, symbol)
}

/// `{base}/{city}` with the city percent-encoded as one path segment
fn city_url(base: &str, city: &str) -> FetchResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| FetchError::unknown(format!("Invalid weather URL '{}': {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| FetchError::unknown(format!("Weather URL '{}' cannot take a path", base)))?
        .pop_if_empty()
        .push(city);

    Ok(url)
}

/// Decode and split a raw response into a report
pub fn parse_report(city: &str, raw: &str, symbol: &str) -> FetchResult<WeatherReport> {
    let decoded = percent_decode_str(raw.trim()).decode_utf8_lossy();
    let parts: Vec<&str> = decoded.split('|').collect();

    if parts.len() < 4 {
        return Err(FetchError::parse(format!(
            "Unexpected weather response for '{}': {}",
            city,
            decoded.trim()
        )));
    }

    Ok(WeatherReport {
        city: city.to_string(),
        symbol: symbol.to_string(),
        condition: parts[0].trim().to_string(),
        temperature: strip_label(parts[1], TEMPERATURE_LABELS),
        humidity: strip_label(parts[2], HUMIDITY_LABELS),
        wind: strip_label(parts[3], WIND_LABELS),
    })
}

/// Remove any leading labels from a field. Idempotent.
pub fn strip_label(field: &str, labels: &[&str]) -> String {
    let mut value = field.trim();
    while let Some(rest) = labels.iter().find_map(move |label| value.strip_prefix(label)) {
        value = rest.trim();
    }
    value.to_string()
}

/// Day between 06:00 and 18:00 local time; neutral when the zone is unknown
pub fn day_night_symbol(timezone: Option<Tz>, now: DateTime<Utc>) -> &'static str {
    match timezone {
        Some(tz) => {
            let hour = now.with_timezone(&tz).hour();
            if (6..18).contains(&hour) {
                DAY_SYMBOL
            } else {
                NIGHT_SYMBOL
            }
        }
        None => NEUTRAL_SYMBOL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use chrono::TimeZone;

    #[test]
    fn test_parse_report_decodes_and_strips_labels() {
        let raw = "Partly cloudy|🌡️ Temperature: +31°C|💧 Humidity: 70%25|💨 Wind: ↙13km/h\n";
        let report = parse_report("Mumbai", raw, DAY_SYMBOL).unwrap();

        assert_eq!(report.condition, "Partly cloudy");
        assert_eq!(report.temperature, "+31°C");
        assert_eq!(report.humidity, "70%");
        assert_eq!(report.wind, "↙13km/h");
        assert_eq!(report.symbol, DAY_SYMBOL);
    }

    #[test]
    fn test_parse_report_rejects_short_response() {
        let err = parse_report("Atlantis", "Unknown location; please try ~Atlantis", NEUTRAL_SYMBOL)
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::Parse);
    }

    #[test]
    fn test_strip_label_is_idempotent() {
        let cases = [
            "🌡️ Temperature: +31°C",
            "  Temperature:   Temperature: 5°C ",
            "+31°C",
            "",
        ];

        for c in cases {
            let once = strip_label(c, TEMPERATURE_LABELS);
            let twice = strip_label(&once, TEMPERATURE_LABELS);
            assert_eq!(once, twice, "field: {:?}", c);
        }
        assert_eq!(strip_label(cases[1], TEMPERATURE_LABELS), "5°C");
    }

    #[test]
    fn test_day_night_boundaries() {
        let kolkata: Tz = "Asia/Kolkata".parse().unwrap();

        // 00:30 UTC is 06:00 in Kolkata
        let dawn = Utc.with_ymd_and_hms(2024, 3, 1, 0, 30, 0).unwrap();
        assert_eq!(day_night_symbol(Some(kolkata), dawn), DAY_SYMBOL);

        // 12:30 UTC is 18:00 in Kolkata
        let dusk = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(day_night_symbol(Some(kolkata), dusk), NIGHT_SYMBOL);

        assert_eq!(day_night_symbol(None, dusk), NEUTRAL_SYMBOL);
    }

    #[test]
    fn test_city_url_encodes_segment() {
        let url = city_url("https://wttr.in", "New Delhi").unwrap();
        assert_eq!(url.as_str(), "https://wttr.in/New%20Delhi");

        let url = city_url("http://localhost:8000/weather/", "Mumbai").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/weather/Mumbai");
    }
}
