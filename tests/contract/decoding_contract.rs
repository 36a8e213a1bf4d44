use finavi_core::{
    decode::{history_candidates, quote_candidates, symbol_candidates},
    decode_untagged, ChartRange, Decoded, ErrorPayload, ErrorResponse, HistoryErrorResponse,
    InstrumentType, Market, PriceLevel, Quote, Symbol,
};

const QUOTES: &str = r#"[
    {"s":"AAA","o":10.5,"h":10.9,"l":10.2,"c":10.8,"ch":0.3,"r":2.86,"vo":1250300,
     "bb":[{"p":10.7,"v":1200},{"p":10.6,"v":5400}],"bo":[{"p":10.8,"v":300}]},
    {"s":"ACB","c":24.15,"vo":3000000},
    {"s":"TCB","c":33.9,"re":33.0}
]"#;

#[test]
fn quote_array_keeps_length_and_order() {
    let decoded = decode_untagged(QUOTES.as_bytes(), &quote_candidates()).expect("quote list");

    let Decoded::Data(quotes) = decoded else {
        panic!("quote array must select the data branch");
    };
    let symbols: Vec<_> = quotes.iter().filter_map(|q| q.symbol.as_deref()).collect();
    assert_eq!(symbols, vec!["AAA", "ACB", "TCB"]);
    assert_eq!(quotes[0].best_bid(), Some(PriceLevel::new(10.7, 1200.0)));
    assert_eq!(quotes[0].best_offer(), Some(PriceLevel::new(10.8, 300.0)));
    assert_eq!(quotes[2].reference_price, Some(33.0));
}

#[test]
fn single_error_object_selects_error_branch_for_quotes() {
    let body = br#"{"code":"SYMBOL_NOT_FOUND","params":"XYZ","isSystemError":false}"#;
    let decoded = decode_untagged(body, &quote_candidates()).expect("error object");

    assert_eq!(
        decoded,
        Decoded::Error(ErrorPayload::Generic(ErrorResponse {
            code: Some(String::from("SYMBOL_NOT_FOUND")),
            params: Some(String::from("XYZ")),
            is_system_error: Some(false),
        }))
    );
}

#[test]
fn empty_quote_array_is_data() {
    let decoded = decode_untagged(b"[]", &quote_candidates()).expect("empty list");
    assert_eq!(decoded, Decoded::Data(Vec::<Quote>::new()));
}

#[test]
fn history_error_shape_is_second_candidate() {
    let body = br#"{"s":["no_data"],"nextTime":[1717372800]}"#;
    let decoded = decode_untagged(body, &history_candidates()).expect("history error");

    assert_eq!(
        decoded,
        Decoded::Error(ErrorPayload::History(HistoryErrorResponse {
            s: Some(vec![String::from("no_data")]),
            next_time: Some(vec![1_717_372_800.0]),
        }))
    );
}

#[test]
fn history_series_with_status_string_is_data() {
    let body = br#"{"s":"ok","t":[1717372800],"o":[1],"h":[1],"l":[1],"c":[1],"v":[10]}"#;
    let decoded = decode_untagged(body, &history_candidates()).expect("series");

    let Decoded::Data(series) = decoded else {
        panic!("series must select the data branch");
    };
    assert_eq!(series.check_aligned(), Ok(1));
}

#[test]
fn misaligned_history_still_decodes() {
    let body = br#"{"t":[1,2,3],"c":[1,2]}"#;
    let decoded = decode_untagged(body, &history_candidates()).expect("permissive decode");

    let Decoded::Data(series) = decoded else {
        panic!("series must select the data branch");
    };
    assert!(series.check_aligned().is_err());
}

#[test]
fn hose_stock_symbol_round_trips() {
    let raw = r#"{"s":"VNM","m":"HOSE","n1":"Vinamilk","n2":"Vietnam Dairy","t":"STOCK",
                  "re":66.5,"ce":71.1,"fl":61.9,"m_ex":"VN30"}"#;
    let symbol: Symbol = serde_json::from_str(raw).expect("symbol");

    assert_eq!(symbol.market, Some(Market::Hose));
    assert_eq!(symbol.instrument_type, Some(InstrumentType::Stock));
    assert!(!symbol.is_covered_warrant());

    let encoded = serde_json::to_string(&symbol).expect("encode");
    let decoded: Symbol = serde_json::from_str(&encoded).expect("decode again");
    assert_eq!(decoded, symbol);
}

#[test]
fn unknown_market_fails_symbol_decode() {
    let single = r#"{"s":"AAPL","m":"NASDAQ","t":"STOCK"}"#;
    let err = serde_json::from_str::<Symbol>(single).expect_err("NASDAQ is not listed");
    assert!(err.to_string().contains("unknown variant `NASDAQ`"));

    let list = format!("[{single}]");
    let failure =
        decode_untagged(list.as_bytes(), &symbol_candidates()).expect_err("unknown market");
    let causes: Vec<_> = failure.attempts().map(|(name, _)| name).collect();
    assert_eq!(causes, vec!["symbol list", "error response"]);
}

#[test]
fn quote_round_trips_through_wire_keys() {
    let raw = r#"{"s":"FPT","c":120.5,"vo":100,"bb":[{"p":120.4,"v":10}],"ti":1717372800000}"#;
    let quote: Quote = serde_json::from_str(raw).expect("quote");

    let value = serde_json::to_value(&quote).expect("encode");
    assert_eq!(value["s"], "FPT");
    assert_eq!(value["ti"], 1_717_372_800_000_i64);
    assert!(value["o"].is_null());

    let again: Quote = serde_json::from_value(value).expect("decode again");
    assert_eq!(again, quote);
}

#[test]
fn every_range_maps_to_a_known_resolution() {
    for range in ChartRange::ALL {
        let expected = match range {
            ChartRange::OneDay | ChartRange::FiveDays | ChartRange::OneMonth => "1",
            ChartRange::ThreeMonths => "1D",
            ChartRange::ThreeYears | ChartRange::FiveYears => "D",
        };
        assert_eq!(range.resolution(), expected, "range {range}");
    }
}
