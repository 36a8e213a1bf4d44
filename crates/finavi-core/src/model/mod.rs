//! # Wire Models
//!
//! Records exchanged with the market data service. Every type decodes
//! straight from the upstream JSON and serializes back to the same keys.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Quote`] | Market snapshot with order-book levels |
//! | [`PriceLevel`] | One price/volume pair of a book side |
//! | [`Symbol`] | Static listing metadata |
//! | [`Ticker`] | Compact search-result row |
//! | [`HistorySeries`] | Column-oriented chart history |
//! | [`ErrorPayload`] | Application error body (generic or history shape) |
//! | [`ChartRange`] | History window and its resolution code |
//!
//! Records carry no synthetic identity. Equality and hashing are structural,
//! so two decodes of the same payload are interchangeable as map keys; list
//! identity for a presentation layer belongs to that layer.

mod chart_range;
mod error_payload;
mod hash;
mod history;
mod quote;
mod symbol;
mod ticker;
mod whole_number;

pub use chart_range::ChartRange;
pub use error_payload::{ErrorPayload, ErrorResponse, HistoryErrorResponse};
pub use history::{HistoryBar, HistorySeries};
pub use quote::{PriceLevel, Quote};
pub use symbol::{IndexBasket, InstrumentType, Issuer, Market, Symbol, WarrantKind};
pub use ticker::Ticker;
