use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::hash::hash_fields;
use crate::HistoryError;

/// Chart history in TradingView UDF layout: one array per column, index `i`
/// across every array describing the same bar.
///
/// Decoding does not require the arrays to line up. Call
/// [`check_aligned`](Self::check_aligned) or [`bars`](Self::bars) to enforce it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    /// Bar open times in Unix seconds.
    #[serde(
        rename = "t",
        default,
        deserialize_with = "super::whole_number::option_vec"
    )]
    pub timestamps: Option<Vec<i64>>,
    #[serde(rename = "o")]
    pub open: Option<Vec<f64>>,
    #[serde(rename = "h")]
    pub high: Option<Vec<f64>>,
    #[serde(rename = "l")]
    pub low: Option<Vec<f64>>,
    #[serde(rename = "c")]
    pub close: Option<Vec<f64>>,
    #[serde(rename = "v")]
    pub volume: Option<Vec<f64>>,
    #[serde(rename = "ce")]
    pub ceiling: Option<Vec<f64>>,
    #[serde(rename = "fl")]
    pub floor: Option<Vec<f64>>,
    #[serde(rename = "re")]
    pub reference: Option<Vec<f64>>,
    /// UDF status string, `"ok"` or `"no_data"`.
    #[serde(rename = "s")]
    pub status: Option<String>,
    /// Continuation cursor; earlier data exists before this time.
    #[serde(rename = "nextTime")]
    pub next_time: Option<f64>,
}

/// One row of a [`HistorySeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryBar {
    pub time: OffsetDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

impl HistorySeries {
    /// True when the object carried none of the recognized keys.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_none()
            && self.open.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.close.is_none()
            && self.volume.is_none()
            && self.ceiling.is_none()
            && self.floor.is_none()
            && self.reference.is_none()
            && self.status.is_none()
            && self.next_time.is_none()
    }

    pub fn is_no_data(&self) -> bool {
        self.status.as_deref() == Some("no_data")
    }

    fn columns(&self) -> [(&'static str, Option<usize>); 9] {
        [
            ("t", self.timestamps.as_ref().map(Vec::len)),
            ("o", self.open.as_ref().map(Vec::len)),
            ("h", self.high.as_ref().map(Vec::len)),
            ("l", self.low.as_ref().map(Vec::len)),
            ("c", self.close.as_ref().map(Vec::len)),
            ("v", self.volume.as_ref().map(Vec::len)),
            ("ce", self.ceiling.as_ref().map(Vec::len)),
            ("fl", self.floor.as_ref().map(Vec::len)),
            ("re", self.reference.as_ref().map(Vec::len)),
        ]
    }

    /// Verify every present column has the same length and return it.
    ///
    /// A series with no columns has length zero.
    pub fn check_aligned(&self) -> Result<usize, HistoryError> {
        let mut expected: Option<(&'static str, usize)> = None;

        for (field, len) in self.columns() {
            let Some(len) = len else { continue };
            match expected {
                None => expected = Some((field, len)),
                Some((reference, want)) if want != len => {
                    return Err(HistoryError::LengthMismatch {
                        field,
                        len,
                        reference,
                        expected: want,
                    });
                }
                Some(_) => {}
            }
        }

        Ok(expected.map_or(0, |(_, len)| len))
    }

    /// Zip the columns into bars. Fails on misaligned columns, on a missing
    /// time/OHLC column in a non-empty series, and on out-of-range timestamps.
    pub fn bars(&self) -> Result<Vec<HistoryBar>, HistoryError> {
        let len = self.check_aligned()?;
        if len == 0 {
            return Ok(Vec::new());
        }

        let timestamps = required("t", &self.timestamps)?;
        let open = required("o", &self.open)?;
        let high = required("h", &self.high)?;
        let low = required("l", &self.low)?;
        let close = required("c", &self.close)?;

        (0..len)
            .map(|index| {
                let ts = timestamps[index];
                let time = OffsetDateTime::from_unix_timestamp(ts)
                    .map_err(|_| HistoryError::InvalidTimestamp { value: ts })?;
                Ok(HistoryBar {
                    time,
                    open: open[index],
                    high: high[index],
                    low: low[index],
                    close: close[index],
                    volume: self.volume.as_ref().map(|volume| volume[index]),
                })
            })
            .collect()
    }
}

fn required<'a, T>(
    field: &'static str,
    column: &'a Option<Vec<T>>,
) -> Result<&'a [T], HistoryError> {
    column.as_deref().ok_or(HistoryError::MissingColumn { field })
}

// JSON numbers are never NaN.
impl Eq for HistorySeries {}

impl Hash for HistorySeries {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let Self {
            timestamps,
            open,
            high,
            low,
            close,
            volume,
            ceiling,
            floor,
            reference,
            status,
            next_time,
        } = self;

        hash_fields!(state;
            timestamps, open, high, low, close, volume,
            ceiling, floor, reference, status, next_time,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(raw: &str) -> HistorySeries {
        serde_json::from_str(raw).expect("series should decode")
    }

    #[test]
    fn zips_columns_into_bars() {
        let history = series(
            r#"{"s":"ok","t":[1717372800,1717459200],"o":[24,24.5],"h":[25,25.2],
                "l":[23.8,24.1],"c":[24.6,25],"v":[1000,2000]}"#,
        );

        let bars = history.bars().expect("aligned series");
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].time.unix_timestamp(), 1_717_459_200);
        assert_eq!(bars[1].close, 25.0);
        assert_eq!(bars[0].volume, Some(1000.0));
    }

    #[test]
    fn decoding_accepts_misaligned_columns_but_bars_rejects_them() {
        let history = series(r#"{"t":[1,2,3],"o":[1,2,3],"h":[1,2],"l":[1,2,3],"c":[1,2,3]}"#);

        let err = history.bars().expect_err("misaligned");
        assert_eq!(
            err,
            HistoryError::LengthMismatch {
                field: "h",
                len: 2,
                reference: "t",
                expected: 3,
            }
        );
    }

    #[test]
    fn missing_close_column_is_reported() {
        let history = series(r#"{"t":[1],"o":[1],"h":[1],"l":[1]}"#);
        assert_eq!(
            history.bars().expect_err("no close"),
            HistoryError::MissingColumn { field: "c" }
        );
    }

    #[test]
    fn status_only_series_has_no_bars() {
        let history = series(r#"{"s":"no_data","nextTime":1717372800}"#);
        assert!(history.is_no_data());
        assert!(!history.is_empty());
        assert!(history.bars().expect("no columns").is_empty());
    }
}
