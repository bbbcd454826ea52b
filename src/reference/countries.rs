use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Public country-data endpoint, filtered to the name field.
pub const COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name";

/// Country preselected before (or instead of) any fetched list.
pub const DEFAULT_COUNTRY: &str = "Nepal";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors from the country-list fetch.
///
/// The app never surfaces these; a failed fetch just leaves the country
/// selector with the default entry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    name: CountryName,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    common: String,
}

/// Extracts the common display name of each entry from a country-list body.
pub fn parse_countries(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let entries: Vec<CountryEntry> = serde_json::from_str(body)?;
    Ok(entries.into_iter().map(|e| e.name.common).collect())
}

/// Fetches the country list from `url` and returns the display names in
/// response order.
pub async fn fetch_countries(url: &str) -> Result<Vec<String>, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()?;
    let body = client.get(url).send().await?.error_for_status()?.text().await?;
    Ok(parse_countries(&body)?)
}

/// Spawns the one-shot country fetch on a background thread.
///
/// The thread owns a current-thread tokio runtime for the single request and
/// delivers the list over the returned channel. Fetch failures are swallowed
/// (nothing is sent), and a result arriving after the receiver is dropped is
/// discarded.
pub fn spawn_country_fetch() -> mpsc::Receiver<Vec<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let Ok(runtime) = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        else {
            return;
        };
        if let Ok(countries) = runtime.block_on(fetch_countries(COUNTRIES_URL)) {
            let _ = tx.send(countries);
        }
    });
    rx
}
