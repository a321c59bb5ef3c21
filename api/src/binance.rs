//! Binance klines fetcher.

use shared::{Candle, Error, FetchRequest, Result};
use tracing::info;

/// Issues a single GET against the public klines endpoint. No retry; any
/// transport failure or non-2xx response surfaces as a fetch error.
pub async fn fetch_klines(
    http: &reqwest::Client,
    base_url: &str,
    request: &FetchRequest,
) -> Result<Vec<Candle>> {
    let end_time = request.end_time_millis();
    info!(
        "Fetching {} klines for {} at {} ending at {}",
        request.limit, request.symbol, request.interval, end_time
    );

    let response = http
        .get(format!("{base_url}/api/v3/klines"))
        .query(&[
            ("symbol", request.symbol.as_str()),
            ("interval", request.interval.as_str()),
        ])
        .query(&[("limit", request.limit)])
        .query(&[("endTime", end_time)])
        .send()
        .await
        .map_err(|e| Error::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::Fetch(format!(
            "exchange returned {}",
            response.status()
        )));
    }

    let rows: Vec<Vec<serde_json::Value>> = response
        .json()
        .await
        .map_err(|e| Error::Fetch(e.to_string()))?;
    rows.iter().map(|row| Candle::from_row(row)).collect()
}
