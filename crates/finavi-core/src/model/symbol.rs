use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::hash::{hash_fields, stable_hash_via_hash};

/// Listing venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "HOSE")]
    Hose,
    #[serde(rename = "HNX")]
    Hnx,
    #[serde(rename = "UPCOM")]
    Upcom,
}

impl Market {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hose => "HOSE",
            Self::Hnx => "HNX",
            Self::Upcom => "UPCOM",
        }
    }
}

impl Display for Market {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    #[serde(rename = "STOCK")]
    Stock,
    #[serde(rename = "ETF")]
    Etf,
    #[serde(rename = "FUND")]
    Fund,
    #[serde(rename = "INDEX")]
    Index,
    #[serde(rename = "CW")]
    CoveredWarrant,
}

impl InstrumentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "STOCK",
            Self::Etf => "ETF",
            Self::Fund => "FUND",
            Self::Index => "INDEX",
            Self::CoveredWarrant => "CW",
        }
    }
}

impl Display for InstrumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index basket the instrument belongs to (wire key `m_ex`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexBasket {
    #[serde(rename = "VN30")]
    Vn30,
    #[serde(rename = "VN100")]
    Vn100,
    #[serde(rename = "HNX30")]
    Hnx30,
}

/// Covered-warrant kind. Only call warrants are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarrantKind {
    #[serde(rename = "C")]
    Call,
}

/// Brokerage that issued a covered warrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Issuer {
    #[serde(rename = "ACBS")]
    Acbs,
    #[serde(rename = "BSC")]
    Bsc,
    #[serde(rename = "HSC")]
    Hsc,
    #[serde(rename = "KIS")]
    Kis,
    #[serde(rename = "SSI")]
    Ssi,
    #[serde(rename = "VCSC")]
    Vcsc,
    #[serde(rename = "VND")]
    Vnd,
    #[serde(rename = "VPBANKS")]
    Vpbanks,
}

stable_hash_via_hash!(Market, InstrumentType, IndexBasket, WarrantKind, Issuer);

/// Static listing record from the symbol directory.
///
/// Enumerated fields accept only the values the venue publishes; anything
/// else fails decoding instead of falling back to a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(rename = "s")]
    pub ticker: Option<String>,
    #[serde(rename = "m")]
    pub market: Option<Market>,
    /// Vietnamese company name.
    #[serde(rename = "n1")]
    pub name_vi: Option<String>,
    /// English company name.
    #[serde(rename = "n2")]
    pub name_en: Option<String>,
    #[serde(rename = "t")]
    pub instrument_type: Option<InstrumentType>,
    #[serde(rename = "re")]
    pub reference_price: Option<f64>,
    #[serde(rename = "ce")]
    pub ceiling_price: Option<f64>,
    #[serde(rename = "fl")]
    pub floor_price: Option<f64>,
    #[serde(rename = "m_ex")]
    pub index_basket: Option<IndexBasket>,

    // Covered-warrant details; absent for ordinary listings.
    #[serde(rename = "md")]
    pub maturity_date: Option<String>,
    /// Underlying ticker.
    #[serde(rename = "b")]
    pub underlying: Option<String>,
    #[serde(rename = "cwt")]
    pub warrant_kind: Option<WarrantKind>,
    #[serde(rename = "exp")]
    pub exercise_price: Option<f64>,
    #[serde(rename = "fv")]
    pub face_value: Option<f64>,
    #[serde(rename = "exr")]
    pub exercise_ratio: Option<String>,
    #[serde(rename = "ltd")]
    pub last_trading_date: Option<String>,
    #[serde(rename = "is")]
    pub issuer: Option<Issuer>,
    #[serde(rename = "isd")]
    pub issue_date: Option<String>,

    /// Upstream flag `i`; published without documentation.
    #[serde(rename = "i")]
    pub flag_i: Option<bool>,
    /// Upstream flag `ie`; published without documentation.
    #[serde(rename = "ie")]
    pub flag_ie: Option<bool>,
}

impl Symbol {
    pub fn is_covered_warrant(&self) -> bool {
        self.instrument_type == Some(InstrumentType::CoveredWarrant)
    }
}

// JSON numbers are never NaN.
impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let Self {
            ticker,
            market,
            name_vi,
            name_en,
            instrument_type,
            reference_price,
            ceiling_price,
            floor_price,
            index_basket,
            maturity_date,
            underlying,
            warrant_kind,
            exercise_price,
            face_value,
            exercise_ratio,
            last_trading_date,
            issuer,
            issue_date,
            flag_i,
            flag_ie,
        } = self;

        hash_fields!(state;
            ticker, market, name_vi, name_en, instrument_type,
            reference_price, ceiling_price, floor_price, index_basket,
            maturity_date, underlying, warrant_kind, exercise_price, face_value,
            exercise_ratio, last_trading_date, issuer, issue_date,
            flag_i, flag_ie,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_covered_warrant_listing() {
        let raw = r#"{
            "s": "CACB2401", "m": "HOSE", "t": "CW", "b": "ACB", "cwt": "C",
            "is": "KIS", "exp": 26.0, "exr": "2:1", "ltd": "2024-09-12",
            "re": 1.2, "ce": 1.5, "fl": 0.9, "i": false
        }"#;
        let symbol: Symbol = serde_json::from_str(raw).expect("symbol should decode");

        assert!(symbol.is_covered_warrant());
        assert_eq!(symbol.market, Some(Market::Hose));
        assert_eq!(symbol.issuer, Some(Issuer::Kis));
        assert_eq!(symbol.warrant_kind, Some(WarrantKind::Call));
        assert_eq!(symbol.underlying.as_deref(), Some("ACB"));
        assert_eq!(symbol.flag_i, Some(false));
    }

    #[test]
    fn unknown_issuer_fails_decoding() {
        let err = serde_json::from_str::<Symbol>(r#"{"s":"CX","is":"MBS"}"#)
            .expect_err("unknown issuer must fail");
        assert!(err.to_string().contains("unknown variant `MBS`"));
    }

    #[test]
    fn index_basket_uses_m_ex_key() {
        let symbol: Symbol =
            serde_json::from_str(r#"{"s":"FPT","m_ex":"VN30"}"#).expect("decode");
        assert_eq!(symbol.index_basket, Some(IndexBasket::Vn30));
    }
}
