use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::hash::hash_fields;

/// One price/volume pair on a side of the order book (wire name `Bb`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "v")]
    pub volume: f64,
}

impl PriceLevel {
    pub const fn new(price: f64, volume: f64) -> Self {
        Self { price, volume }
    }
}

// JSON numbers are never NaN.
impl Eq for PriceLevel {}

impl Hash for PriceLevel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_fields!(state; &self.price, &self.volume);
    }
}

super::hash::stable_hash_via_hash!(PriceLevel);

/// Point-in-time market snapshot for one instrument.
///
/// The upstream service omits metrics it has no value for, so every field is
/// optional. Prices are in the exchange's quoting unit; volumes and traded
/// values are whole numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "s")]
    pub symbol: Option<String>,

    #[serde(rename = "o")]
    pub open: Option<f64>,
    #[serde(rename = "h")]
    pub high: Option<f64>,
    #[serde(rename = "l")]
    pub low: Option<f64>,
    #[serde(rename = "c")]
    pub close: Option<f64>,
    #[serde(rename = "ch")]
    pub change: Option<f64>,
    #[serde(rename = "r")]
    pub change_rate: Option<f64>,

    #[serde(rename = "vo", default, deserialize_with = "super::whole_number::option")]
    pub volume: Option<i64>,
    #[serde(rename = "vonm", default, deserialize_with = "super::whole_number::option")]
    pub normal_volume: Option<i64>,
    #[serde(rename = "va", default, deserialize_with = "super::whole_number::option")]
    pub traded_value: Option<i64>,
    #[serde(rename = "a")]
    pub average_price: Option<f64>,
    /// Exchange timestamp in milliseconds.
    #[serde(rename = "ti", default, deserialize_with = "super::whole_number::option")]
    pub timestamp_ms: Option<i64>,
    #[serde(rename = "mv", default, deserialize_with = "super::whole_number::option")]
    pub market_value: Option<i64>,

    #[serde(rename = "bb")]
    pub bids: Option<Vec<PriceLevel>>,
    #[serde(rename = "bo")]
    pub offers: Option<Vec<PriceLevel>>,
    #[serde(rename = "bbOd")]
    pub odd_lot_bids: Option<Vec<PriceLevel>>,
    #[serde(rename = "boOd")]
    pub odd_lot_offers: Option<Vec<PriceLevel>>,

    #[serde(rename = "odC")]
    pub odd_lot_close: Option<f64>,
    #[serde(rename = "odCh")]
    pub odd_lot_change: Option<f64>,
    #[serde(rename = "odR")]
    pub odd_lot_change_rate: Option<f64>,
    #[serde(rename = "odMv")]
    pub odd_lot_market_value: Option<f64>,
    #[serde(rename = "odVo", default, deserialize_with = "super::whole_number::option")]
    pub odd_lot_volume: Option<i64>,
    #[serde(rename = "odVa", default, deserialize_with = "super::whole_number::option")]
    pub odd_lot_value: Option<i64>,

    #[serde(rename = "frBvo", default, deserialize_with = "super::whole_number::option")]
    pub foreign_buy_volume: Option<i64>,
    #[serde(rename = "frSvo", default, deserialize_with = "super::whole_number::option")]
    pub foreign_sell_volume: Option<i64>,
    #[serde(rename = "frBva", default, deserialize_with = "super::whole_number::option")]
    pub foreign_buy_value: Option<i64>,
    #[serde(rename = "frSva", default, deserialize_with = "super::whole_number::option")]
    pub foreign_sell_value: Option<i64>,
    #[serde(rename = "frTr", default, deserialize_with = "super::whole_number::option")]
    pub foreign_total_room: Option<i64>,
    #[serde(rename = "frCr", default, deserialize_with = "super::whole_number::option")]
    pub foreign_current_room: Option<i64>,
    #[serde(rename = "frVo", default, deserialize_with = "super::whole_number::option")]
    pub foreign_volume: Option<i64>,
    #[serde(rename = "frVa", default, deserialize_with = "super::whole_number::option")]
    pub foreign_value: Option<i64>,

    /// Trading session status, e.g. `"INTERMISSION"`.
    #[serde(rename = "ss")]
    pub session_status: Option<String>,

    #[serde(rename = "tbo", default, deserialize_with = "super::whole_number::option")]
    pub total_bid_volume: Option<i64>,
    #[serde(rename = "too", default, deserialize_with = "super::whole_number::option")]
    pub total_offer_volume: Option<i64>,
    #[serde(rename = "abo", default, deserialize_with = "super::whole_number::option")]
    pub additional_bid_volume: Option<i64>,
    #[serde(rename = "aoo", default, deserialize_with = "super::whole_number::option")]
    pub additional_offer_volume: Option<i64>,
    #[serde(rename = "abc", default, deserialize_with = "super::whole_number::option")]
    pub additional_bid_count: Option<i64>,
    #[serde(rename = "aoc", default, deserialize_with = "super::whole_number::option")]
    pub additional_offer_count: Option<i64>,
    #[serde(rename = "dbo", default, deserialize_with = "super::whole_number::option")]
    pub domestic_bid_volume: Option<i64>,

    #[serde(rename = "ep")]
    pub expected_price: Option<f64>,
    #[serde(rename = "ec")]
    pub expected_change: Option<f64>,
    #[serde(rename = "er")]
    pub expected_change_rate: Option<f64>,
    #[serde(rename = "ev")]
    pub expected_volume: Option<f64>,

    #[serde(rename = "be", default, deserialize_with = "super::whole_number::option")]
    pub bid_earnings: Option<i64>,
    #[serde(rename = "ba", default, deserialize_with = "super::whole_number::option")]
    pub best_ask: Option<i64>,

    #[serde(rename = "oi")]
    pub open_interest: Option<f64>,
    #[serde(rename = "mbo")]
    pub market_bid_volume: Option<f64>,
    #[serde(rename = "mso")]
    pub market_sell_volume: Option<f64>,
    #[serde(rename = "mbso")]
    pub market_buy_sell_volume: Option<f64>,
    #[serde(rename = "re")]
    pub reference_price: Option<f64>,

    #[serde(rename = "d1D")]
    pub date_1d: Option<String>,
    #[serde(rename = "d3D")]
    pub date_3d: Option<String>,
    #[serde(rename = "d1W")]
    pub date_1w: Option<String>,
    #[serde(rename = "d1M")]
    pub date_1m: Option<String>,
    #[serde(rename = "d2M")]
    pub date_2m: Option<String>,
    #[serde(rename = "d3M")]
    pub date_3m: Option<String>,
    #[serde(rename = "d6M")]
    pub date_6m: Option<String>,
    #[serde(rename = "d1Y")]
    pub date_1y: Option<String>,

    #[serde(rename = "c1D")]
    pub close_1d: Option<f64>,
    #[serde(rename = "c3D")]
    pub close_3d: Option<f64>,
    #[serde(rename = "c1W")]
    pub close_1w: Option<f64>,
    #[serde(rename = "c1M")]
    pub close_1m: Option<f64>,
    #[serde(rename = "c2M")]
    pub close_2m: Option<f64>,
    #[serde(rename = "c3M")]
    pub close_3m: Option<f64>,
    #[serde(rename = "c6M")]
    pub close_6m: Option<f64>,
    #[serde(rename = "c1Y")]
    pub close_1y: Option<f64>,

    #[serde(rename = "h1D")]
    pub high_1d: Option<f64>,
    #[serde(rename = "l1D")]
    pub low_1d: Option<f64>,
    #[serde(rename = "h3D")]
    pub high_3d: Option<f64>,
    #[serde(rename = "l3D")]
    pub low_3d: Option<f64>,
    #[serde(rename = "h1M")]
    pub high_1m: Option<f64>,
    #[serde(rename = "l1M")]
    pub low_1m: Option<f64>,
    #[serde(rename = "h2M")]
    pub high_2m: Option<f64>,
    #[serde(rename = "l2M")]
    pub low_2m: Option<f64>,
    #[serde(rename = "h3M")]
    pub high_3m: Option<f64>,
    #[serde(rename = "l3M")]
    pub low_3m: Option<f64>,
    #[serde(rename = "h6M")]
    pub high_6m: Option<f64>,
    #[serde(rename = "l6M")]
    pub low_6m: Option<f64>,
    #[serde(rename = "h1Y")]
    pub high_1y: Option<f64>,
    #[serde(rename = "l1Y")]
    pub low_1y: Option<f64>,

    #[serde(rename = "sud", default, deserialize_with = "super::whole_number::option")]
    pub sudden_drop: Option<i64>,
    #[serde(rename = "vo15M", default, deserialize_with = "super::whole_number::option")]
    pub volume_15m: Option<i64>,

    #[serde(rename = "av5B")]
    pub avg_volume_5d: Option<f64>,
    #[serde(rename = "av10B")]
    pub avg_volume_10d: Option<f64>,
    #[serde(rename = "av20B")]
    pub avg_volume_20d: Option<f64>,
    #[serde(rename = "av60B")]
    pub avg_volume_60d: Option<f64>,
    #[serde(rename = "a5B")]
    pub avg_price_5d: Option<f64>,
    #[serde(rename = "a10B")]
    pub avg_price_10d: Option<f64>,
    #[serde(rename = "a20B")]
    pub avg_price_20d: Option<f64>,
    #[serde(rename = "a60B")]
    pub avg_price_60d: Option<f64>,

    #[serde(rename = "gev", default, deserialize_with = "super::whole_number::option")]
    pub general_evaluation_volume: Option<i64>,
    #[serde(rename = "tp")]
    pub total_price: Option<f64>,
    #[serde(rename = "ev5D")]
    pub evaluation_5d: Option<f64>,
}

impl Quote {
    /// Best bid: the first level of the bid book.
    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.as_ref().and_then(|levels| levels.first().copied())
    }

    /// Best offer: the first level of the ask book.
    pub fn best_offer(&self) -> Option<PriceLevel> {
        self.offers.as_ref().and_then(|levels| levels.first().copied())
    }
}

// JSON numbers are never NaN.
impl Eq for Quote {}

impl Hash for Quote {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Exhaustive destructure: adding a field without hashing it fails to compile.
        let Self {
            symbol,
            open,
            high,
            low,
            close,
            change,
            change_rate,
            volume,
            normal_volume,
            traded_value,
            average_price,
            timestamp_ms,
            market_value,
            bids,
            offers,
            odd_lot_bids,
            odd_lot_offers,
            odd_lot_close,
            odd_lot_change,
            odd_lot_change_rate,
            odd_lot_market_value,
            odd_lot_volume,
            odd_lot_value,
            foreign_buy_volume,
            foreign_sell_volume,
            foreign_buy_value,
            foreign_sell_value,
            foreign_total_room,
            foreign_current_room,
            foreign_volume,
            foreign_value,
            session_status,
            total_bid_volume,
            total_offer_volume,
            additional_bid_volume,
            additional_offer_volume,
            additional_bid_count,
            additional_offer_count,
            domestic_bid_volume,
            expected_price,
            expected_change,
            expected_change_rate,
            expected_volume,
            bid_earnings,
            best_ask,
            open_interest,
            market_bid_volume,
            market_sell_volume,
            market_buy_sell_volume,
            reference_price,
            date_1d,
            date_3d,
            date_1w,
            date_1m,
            date_2m,
            date_3m,
            date_6m,
            date_1y,
            close_1d,
            close_3d,
            close_1w,
            close_1m,
            close_2m,
            close_3m,
            close_6m,
            close_1y,
            high_1d,
            low_1d,
            high_3d,
            low_3d,
            high_1m,
            low_1m,
            high_2m,
            low_2m,
            high_3m,
            low_3m,
            high_6m,
            low_6m,
            high_1y,
            low_1y,
            sudden_drop,
            volume_15m,
            avg_volume_5d,
            avg_volume_10d,
            avg_volume_20d,
            avg_volume_60d,
            avg_price_5d,
            avg_price_10d,
            avg_price_20d,
            avg_price_60d,
            general_evaluation_volume,
            total_price,
            evaluation_5d,
        } = self;

        hash_fields!(state;
            symbol, open, high, low, close, change, change_rate,
            volume, normal_volume, traded_value, average_price, timestamp_ms, market_value,
            bids, offers, odd_lot_bids, odd_lot_offers,
            odd_lot_close, odd_lot_change, odd_lot_change_rate, odd_lot_market_value,
            odd_lot_volume, odd_lot_value,
            foreign_buy_volume, foreign_sell_volume, foreign_buy_value, foreign_sell_value,
            foreign_total_room, foreign_current_room, foreign_volume, foreign_value,
            session_status,
            total_bid_volume, total_offer_volume, additional_bid_volume, additional_offer_volume,
            additional_bid_count, additional_offer_count, domestic_bid_volume,
            expected_price, expected_change, expected_change_rate, expected_volume,
            bid_earnings, best_ask,
            open_interest, market_bid_volume, market_sell_volume, market_buy_sell_volume,
            reference_price,
            date_1d, date_3d, date_1w, date_1m, date_2m, date_3m, date_6m, date_1y,
            close_1d, close_3d, close_1w, close_1m, close_2m, close_3m, close_6m, close_1y,
            high_1d, low_1d, high_3d, low_3d, high_1m, low_1m, high_2m, low_2m,
            high_3m, low_3m, high_6m, low_6m, high_1y, low_1y,
            sudden_drop, volume_15m,
            avg_volume_5d, avg_volume_10d, avg_volume_20d, avg_volume_60d,
            avg_price_5d, avg_price_10d, avg_price_20d, avg_price_60d,
            general_evaluation_volume, total_price, evaluation_5d,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const SAMPLE: &str = r#"{
        "s": "ACB", "o": 24.5, "h": 25.1, "l": 24.3, "c": 24.9,
        "ch": 0.4, "r": 1.63, "vo": 5123400, "va": 127456000000,
        "bb": [{"p": 24.85, "v": 12000}, {"p": 24.8, "v": 33100}],
        "bo": [{"p": 24.9, "v": 8000}],
        "ss": "INTERMISSION", "d1W": "2024-05-29", "c1W": 24, "vo15M": 8800
    }"#;

    #[test]
    fn decodes_wire_keys_into_named_fields() {
        let quote: Quote = serde_json::from_str(SAMPLE).expect("quote should decode");

        assert_eq!(quote.symbol.as_deref(), Some("ACB"));
        assert_eq!(quote.close, Some(24.9));
        assert_eq!(quote.volume, Some(5_123_400));
        assert_eq!(quote.session_status.as_deref(), Some("INTERMISSION"));
        assert_eq!(quote.close_1w, Some(24.0));
        assert_eq!(quote.volume_15m, Some(8800));
        assert_eq!(quote.best_bid(), Some(PriceLevel::new(24.85, 12000.0)));
        assert_eq!(quote.best_offer(), Some(PriceLevel::new(24.9, 8000.0)));
        assert!(quote.odd_lot_bids.is_none());
    }

    #[test]
    fn price_level_requires_both_fields() {
        let err = serde_json::from_str::<Quote>(r#"{"s":"ACB","bb":[{"p":24.85}]}"#)
            .expect_err("level without volume must fail");
        assert!(err.to_string().contains("missing field `v`"));
    }

    #[test]
    fn whole_number_fields_accept_integral_floats() {
        let quotes: Vec<Quote> =
            serde_json::from_str(r#"[{"s":"AAA","vo":1250300.0,"ti":1717372800000.0}]"#)
                .expect("integral floats decode");
        assert_eq!(quotes[0].volume, Some(1_250_300));
        assert_eq!(quotes[0].timestamp_ms, Some(1_717_372_800_000));

        let err = serde_json::from_str::<Vec<Quote>>(r#"[{"s":"AAA","vo":1.5}]"#)
            .expect_err("fractional volume must fail");
        assert!(err.to_string().contains("floating point `1.5`"));
    }

    #[test]
    fn equal_quotes_collapse_in_a_set() {
        let first: Quote = serde_json::from_str(SAMPLE).expect("decode");
        let second: Quote = serde_json::from_str(SAMPLE).expect("decode");
        let other = Quote {
            symbol: Some(String::from("TCB")),
            ..first.clone()
        };

        let set: HashSet<Quote> = [first, second, other].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
