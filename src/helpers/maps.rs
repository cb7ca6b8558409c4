//! Resolves Google Maps share links to coordinates.
//!
//! Short links (`maps.app.goo.gl/...`) only reveal a position after their
//! redirects are followed, so the resolver fetches the link and reads the
//! coordinates out of the final URL.

use crate::configuration::MapsSettings;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    #[error("not a Google Maps link: {0}")]
    InvalidUrl(String),
    #[error("no coordinates found in {0}")]
    CoordinatesNotFound(String),
    #[error("failed to follow link: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for resolving share links. Each redirect hop must stay on a Google
/// Maps host or on the host the request started from.
pub fn http_client(settings: &MapsSettings) -> Result<reqwest::Client, reqwest::Error> {
    let max_redirects = settings.max_redirects;
    let policy = reqwest::redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() > max_redirects {
            return attempt.error("too many redirects");
        }

        let origin = attempt.previous().first().and_then(|url| url.host_str());
        let allowed = match attempt.url().host_str() {
            Some(host) => is_maps_host(host) || Some(host) == origin,
            None => false,
        };
        if allowed {
            attempt.follow()
        } else {
            attempt.stop()
        }
    });

    reqwest::Client::builder()
        .redirect(policy)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
}

fn maps_host_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:(?:www\.|maps\.)?google\.(?:com|[a-z]{2}|com?\.[a-z]{2})|(?:maps\.app\.)?goo\.gl)$")
            .expect("host pattern compiles")
    })
}

fn is_maps_host(host: &str) -> bool {
    maps_host_pattern().is_match(host)
}

/// Accepts only http(s) links pointing at a Google Maps host.
pub fn validate_maps_url(url: &str) -> Result<reqwest::Url, MapsError> {
    let parsed = reqwest::Url::parse(url.trim()).map_err(|_| MapsError::InvalidUrl(url.to_string()))?;
    let scheme_ok = matches!(parsed.scheme(), "http" | "https");
    let host_ok = parsed.host_str().map_or(false, is_maps_host);
    if !scheme_ok || !host_ok {
        return Err(MapsError::InvalidUrl(url.to_string()));
    }

    Ok(parsed)
}

fn coordinate_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"@(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?)",
            r"!3d(-?\d+(?:\.\d+)?)!4d(-?\d+(?:\.\d+)?)",
            r"[?&](?:q|query|ll)=(-?\d+(?:\.\d+)?)(?:,|%2C)\+?(-?\d+(?:\.\d+)?)",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("coordinate pattern compiles"))
        .collect()
    })
}

/// First `lat,lng` pair in `url` that lies inside valid ranges.
pub fn extract_coordinates(url: &str) -> Option<Coordinates> {
    coordinate_patterns().iter().find_map(|pattern| {
        let captures = pattern.captures(url)?;
        let latitude = captures.get(1)?.as_str().parse::<f64>().ok()?;
        let longitude = captures.get(2)?.as_str().parse::<f64>().ok()?;

        ((-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude))
            .then_some(Coordinates {
                latitude,
                longitude,
            })
    })
}

/// Follows `url` and extracts coordinates from wherever it lands.
#[tracing::instrument(name = "Resolve maps url.", skip(client))]
pub async fn resolve_coordinates(
    client: &reqwest::Client,
    url: &str,
) -> Result<Coordinates, MapsError> {
    let parsed = validate_maps_url(url)?;

    // Full links already carry the position.
    if let Some(coordinates) = extract_coordinates(parsed.as_str()) {
        return Ok(coordinates);
    }

    let final_url = follow(client, parsed).await?;
    if !final_url.host_str().map_or(false, is_maps_host) {
        return Err(MapsError::InvalidUrl(final_url.to_string()));
    }

    extract_coordinates(final_url.as_str())
        .ok_or_else(|| MapsError::CoordinatesNotFound(final_url.to_string()))
}

/// Fetches `url` without host validation and reads the landing URL.
pub async fn follow_and_extract(
    client: &reqwest::Client,
    url: reqwest::Url,
) -> Result<Coordinates, MapsError> {
    let final_url = follow(client, url).await?;

    extract_coordinates(final_url.as_str())
        .ok_or_else(|| MapsError::CoordinatesNotFound(final_url.to_string()))
}

/// Landing URL of `url`. A redirect the client refused to follow is reported
/// as the link it pointed to.
async fn follow(client: &reqwest::Client, url: reqwest::Url) -> Result<reqwest::Url, MapsError> {
    let response = client.get(url.clone()).send().await?;
    if response.status().is_redirection() {
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        tracing::info!("Maps link {} redirects off Google Maps to {}", url, location);
        return Err(MapsError::InvalidUrl(location));
    }

    tracing::debug!("Maps link {} resolved to {}", url, response.url());
    Ok(response.url().clone())
}
