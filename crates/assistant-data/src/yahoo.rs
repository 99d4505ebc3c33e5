//! Yahoo Finance bar source.
//!
//! Fetches intraday OHLCV bars from the v8 chart API. Null cells in the
//! response are kept as missing (NaN) fields so that the indicator engine
//! can drop incomplete rows itself.

use std::time::Duration;

use assistant_core::error::DataError;
use assistant_core::traits::BarSource;
use assistant_core::types::Bar;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

/// Connection settings for [`YahooBarSource`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YahooConfig {
    pub base_url: String,
    /// Appended to every symbol, e.g. ".NS" for NSE listings
    pub symbol_suffix: String,
    pub interval: String,
    pub range: String,
    pub timeout_secs: u64,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            symbol_suffix: ".NS".to_string(),
            interval: "5m".to_string(),
            range: "5d".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Intraday bars from Yahoo Finance.
#[derive(Debug, Clone)]
pub struct YahooBarSource {
    config: YahooConfig,
    client: reqwest::Client,
}

impl YahooBarSource {
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) market-assistant")
            .build()
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}{}",
            self.config.base_url.trim_end_matches('/'),
            symbol,
            self.config.symbol_suffix
        )
    }
}

#[async_trait]
impl BarSource for YahooBarSource {
    async fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, DataError> {
        let url = self.chart_url(symbol);
        debug!(symbol, %url, "Fetching bars");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("interval", self.config.interval.as_str()),
                ("range", self.config.range.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }
        if !response.status().is_success() {
            return Err(DataError::ConnectionError(format!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        let bars = parse_chart_response(symbol, &body)?;
        debug!(symbol, rows = bars.len(), "Fetched bars");
        Ok(bars)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

/// Parse a chart API body into bars, oldest first.
///
/// Rows where every OHLCV cell is null are dropped; partial rows are kept
/// with NaN in the missing cells.
pub fn parse_chart_response(symbol: &str, body: &str) -> Result<Vec<Bar>, DataError> {
    let resp: ChartResponse =
        serde_json::from_str(body).map_err(|e| DataError::ParseError(e.to_string()))?;

    let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
        Some(err) if err.code == "Not Found" => DataError::SymbolNotFound(symbol.to_string()),
        Some(err) => DataError::ParseError(format!("{}: {}", err.code, err.description)),
        None => DataError::ParseError("empty result with no error".into()),
    })?;

    let data = result
        .into_iter()
        .next()
        .ok_or_else(|| DataError::NoDataAvailable(symbol.to_string()))?;

    let timestamps = data
        .timestamp
        .ok_or_else(|| DataError::NoDataAvailable(symbol.to_string()))?;

    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

    let cell = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

    let mut bars: Vec<Bar> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let open = cell(&quote.open, i);
            let high = cell(&quote.high, i);
            let low = cell(&quote.low, i);
            let close = cell(&quote.close, i);
            let volume = cell(&quote.volume, i);

            if open.is_none()
                && high.is_none()
                && low.is_none()
                && close.is_none()
                && volume.is_none()
            {
                return None;
            }

            Some(Bar::new(
                ts * 1000,
                open.unwrap_or(f64::NAN),
                high.unwrap_or(f64::NAN),
                low.unwrap_or(f64::NAN),
                close.unwrap_or(f64::NAN),
                volume.unwrap_or(f64::NAN),
            ))
        })
        .collect();

    bars.sort_by_key(|b| b.timestamp);

    if bars.is_empty() {
        return Err(DataError::NoDataAvailable(symbol.to_string()));
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "INFY.NS", "currency": "INR"},
                "timestamp": [1705290300, 1705290600, 1705290900, 1705291200],
                "indicators": {
                    "quote": [{
                        "open":   [1600.0, 1602.5, null, 1604.0],
                        "high":   [1603.0, 1605.0, null, 1606.5],
                        "low":    [1598.5, 1601.0, null, 1603.0],
                        "close":  [1602.0, 1604.0, null, null],
                        "volume": [12000, 9500, null, 8000]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_response() {
        let bars = parse_chart_response("INFY", SAMPLE).unwrap();

        // fully null row dropped
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].timestamp, 1_705_290_300_000);
        assert_eq!(bars[0].close, 1602.0);
        assert_eq!(bars[1].volume, 9500.0);

        // partially null row kept with a missing close
        assert!(bars[2].close.is_nan());
        assert!(!bars[2].is_complete());
    }

    #[test]
    fn test_parse_not_found() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

        assert!(matches!(
            parse_chart_response("NOPE", body),
            Err(DataError::SymbolNotFound(s)) if s == "NOPE"
        ));
    }

    #[test]
    fn test_parse_empty_result() {
        let body = r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#;

        assert!(matches!(
            parse_chart_response("INFY", body),
            Err(DataError::NoDataAvailable(_))
        ));
        assert!(matches!(
            parse_chart_response("INFY", "<html>"),
            Err(DataError::ParseError(_))
        ));
    }

    #[test]
    fn test_chart_url_uses_suffix() {
        let source = YahooBarSource::new(YahooConfig {
            base_url: "http://localhost:9/".into(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            source.chart_url("RELIANCE"),
            "http://localhost:9/v8/finance/chart/RELIANCE.NS"
        );
        assert_eq!(source.name(), "yahoo");
    }
}
