use finavi_core::{FinaviClient, SymbolList};
use log::info;
use serde_json::Value;

use crate::cli::QuotesArgs;
use crate::error::CliError;

pub async fn run(args: &QuotesArgs, client: &FinaviClient) -> Result<Value, CliError> {
    let symbols = SymbolList::from_symbols(&args.symbols)?;
    let quotes = client.fetch_quotes(symbols.as_str()).await?;
    info!("received {} quotes for {symbols}", quotes.len());

    Ok(serde_json::to_value(quotes)?)
}
