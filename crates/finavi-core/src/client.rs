//! Endpoint operations against the market data service.
//!
//! Every call follows the same pipeline: build the URL, send one GET,
//! validate the status, trial-decode the body, then surface either the
//! success shape or an [`ApiError`].

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use log::{debug, warn};
use reqwest::Url;

use crate::config::ClientConfig;
use crate::decode::{
    decode_untagged, history_candidates, quote_candidates, symbol_candidates, Candidate, Decoded,
};
use crate::error::{classify, validate_status, ApiError, StatusClass};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::model::{ChartRange, HistorySeries, Quote, Symbol};

pub const QUOTES_PATH: &str = "/api/v1/market/listSymbol";
pub const SYMBOLS_PATH: &str = "/s3/market/symbol.json";
pub const HISTORY_PATH: &str = "/api/v1/tradingview/history";

/// Typed client for the quotes, symbol catalog and chart history endpoints.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct FinaviClient {
    base_url: Url,
    timeout_ms: u64,
    http_client: Arc<dyn HttpClient>,
}

impl Debug for FinaviClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinaviClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl FinaviClient {
    /// Client over the reqwest transport.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::from_config(config)))
    }

    pub fn with_http_client(
        config: &ClientConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config.base_url)?;
        Ok(Self {
            base_url,
            timeout_ms: config.timeout_ms,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn quotes_url(&self, symbol_list: &str) -> Result<Url, ApiError> {
        let encoded = symbol_list
            .split(',')
            .map(|token| urlencoding::encode(token).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        self.endpoint(QUOTES_PATH, Some(&format!("symbolList={encoded}")))
    }

    pub fn symbols_url(&self) -> Result<Url, ApiError> {
        self.endpoint(SYMBOLS_PATH, None)
    }

    pub fn history_url(
        &self,
        symbol: &str,
        range: ChartRange,
        from: &str,
        to: &str,
    ) -> Result<Url, ApiError> {
        let query = format!(
            "symbol={}&resolution={}&from={}&to={}",
            urlencoding::encode(symbol),
            urlencoding::encode(range.resolution()),
            urlencoding::encode(from),
            urlencoding::encode(to),
        );
        self.endpoint(HISTORY_PATH, Some(&query))
    }

    /// Market snapshots for a comma-joined ticker list, in server order.
    pub async fn fetch_quotes(&self, symbol_list: &str) -> Result<Vec<Quote>, ApiError> {
        let url = self.quotes_url(symbol_list)?;
        let response = self.get(url).await?;
        resolve(&response, &quote_candidates())
    }

    /// The full symbol catalog.
    pub async fn fetch_all_symbols(&self) -> Result<Vec<Symbol>, ApiError> {
        let url = self.symbols_url()?;
        let response = self.get(url).await?;
        resolve(&response, &symbol_candidates())
    }

    /// Chart history for one ticker.
    ///
    /// `from` and `to` are passed through unchanged. A 2xx or 4xx body that
    /// matches neither the series nor the history error shape (including `{}`)
    /// means there is no data and yields `Ok(None)`.
    pub async fn fetch_history(
        &self,
        symbol: &str,
        range: ChartRange,
        from: &str,
        to: &str,
    ) -> Result<Option<HistorySeries>, ApiError> {
        let url = self.history_url(symbol, range, from, to)?;
        let response = self.get(url).await?;
        validate_status(response.status)?;

        match decode_untagged(&response.body, &history_candidates()) {
            Ok(Decoded::Data(series)) => Ok(Some(series)),
            Ok(Decoded::Error(payload)) => Err(classify(response.status, Some(payload))),
            Err(failure) => {
                warn!(
                    "no history for {symbol} ({range}), status {}: {failure}",
                    response.status
                );
                Ok(None)
            }
        }
    }

    fn endpoint(&self, path: &str, query: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(path).map_err(|error| ApiError::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            reason: error.to_string(),
        })?;
        url.set_query(query);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<HttpResponse, ApiError> {
        debug!("GET {url}");
        let request = HttpRequest::get(url.as_str())
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await?;
        debug!("GET {url} returned {} ({} bytes)", response.status, response.body.len());
        Ok(response)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: raw.to_owned(),
        reason,
    };

    let url = Url::parse(raw).map_err(|error| invalid(error.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid(String::from("URL has no host")));
    }
    Ok(url)
}

/// Status check plus trial decode for endpoints without an absent outcome.
fn resolve<T>(response: &HttpResponse, candidates: &[Candidate<Decoded<T>>]) -> Result<T, ApiError> {
    let class = validate_status(response.status)?;

    match decode_untagged(&response.body, candidates) {
        Ok(Decoded::Data(data)) => Ok(data),
        Ok(Decoded::Error(payload)) => Err(classify(response.status, Some(payload))),
        Err(failure) => {
            warn!("status {} with unrecognized body: {failure}", response.status);
            match class {
                StatusClass::Success => Err(ApiError::MalformedResponse(failure)),
                StatusClass::ClientError => Err(classify(response.status, None)),
            }
        }
    }
}
