//! # Finavi Core
//!
//! Typed async client for the Finavi Vietnamese stock-market data service.
//!
//! ## Overview
//!
//! - **Wire models** for quotes, symbol listings and chart history
//! - **Untagged response decoding** that tells success bodies from error bodies
//! - **Status classification** into a single [`ApiError`]
//! - **Transport seam** so requests can be served offline in tests
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`FinaviClient`] and its three endpoint operations |
//! | [`config`] | Base URL, timeout and user agent |
//! | [`decode`] | Ordered candidate decoding |
//! | [`error`] | Error types and status classification |
//! | [`http_client`] | HTTP client abstraction |
//! | [`model`] | Wire models |
//! | [`request`] | Validated request parameters |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use finavi_core::{ChartRange, ClientConfig, FinaviClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FinaviClient::new(&ClientConfig::from_env()?)?;
//!
//!     for quote in client.fetch_quotes("VNM,FPT").await? {
//!         println!("{:?} {:?}", quote.symbol, quote.close);
//!     }
//!
//!     let (from, to) = ChartRange::OneMonth.window_ending(time::OffsetDateTime::now_utc());
//!     let history = client
//!         .fetch_history("VNM", ChartRange::OneMonth, &from.to_string(), &to.to_string())
//!         .await?;
//!     println!("bars: {}", history.map_or(0, |series| series.bars().map_or(0, |b| b.len())));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  FinaviClient   │────▶│ HTTP Client      │
//! │                 │     │ (reqwest/canned) │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Status check    │────▶│ Candidate decode │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │
//!                                  ▼
//!                         ┌──────────────────┐
//!                         │ Wire models      │
//!                         └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use finavi_core::ApiError;
//!
//! fn describe(error: &ApiError) -> String {
//!     match error {
//!         ApiError::Application { payload: Some(payload), .. } => payload.to_string(),
//!         ApiError::UnexpectedStatus { status } => format!("server answered {status}"),
//!         other => other.to_string(),
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod http_client;
pub mod model;
pub mod request;

// Client
pub use client::FinaviClient;

// Configuration
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};

// Decoding
pub use decode::{decode_untagged, Candidate, DecodeFailure, Decoded};

// Error types
pub use error::{classify, validate_status, ApiError, HistoryError, StatusClass, ValidationError};

// HTTP client types
pub use http_client::{CannedHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Wire models
pub use model::{
    ChartRange, ErrorPayload, ErrorResponse, HistoryBar, HistoryErrorResponse, HistorySeries,
    IndexBasket, InstrumentType, Issuer, Market, PriceLevel, Quote, Symbol, Ticker, WarrantKind,
};

// Request parameters
pub use request::SymbolList;
