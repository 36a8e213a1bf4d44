use finavi_core::{FinaviClient, HistorySeries};
use log::info;
use serde::Serialize;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::cli::HistoryArgs;
use crate::error::CliError;

#[derive(Debug, Serialize, PartialEq)]
struct BarRecord {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: Option<f64>,
}

pub async fn run(args: &HistoryArgs, client: &FinaviClient) -> Result<Value, CliError> {
    let (from, to) = match (&args.from, &args.to) {
        (Some(from), Some(to)) => (from.clone(), to.clone()),
        _ => {
            let (from, to) = args.range.window_ending(OffsetDateTime::now_utc());
            (from.to_string(), to.to_string())
        }
    };

    let series = client
        .fetch_history(&args.symbol, args.range, &from, &to)
        .await?;

    let Some(series) = series else {
        info!("no history for {} between {from} and {to}", args.symbol);
        return Ok(Value::Null);
    };

    if args.bars {
        Ok(serde_json::to_value(bar_records(&series)?)?)
    } else {
        Ok(serde_json::to_value(series)?)
    }
}

fn bar_records(series: &HistorySeries) -> Result<Vec<BarRecord>, CliError> {
    series
        .bars()?
        .into_iter()
        .map(|bar| -> Result<BarRecord, CliError> {
            Ok(BarRecord {
                time: bar.time.format(&Rfc3339)?,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
            })
        })
        .collect()
}
