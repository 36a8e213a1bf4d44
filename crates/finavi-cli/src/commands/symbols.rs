use finavi_core::{FinaviClient, Symbol};
use log::info;
use serde_json::Value;

use crate::cli::SymbolsArgs;
use crate::error::CliError;

pub async fn run(args: &SymbolsArgs, client: &FinaviClient) -> Result<Value, CliError> {
    let catalog = client.fetch_all_symbols().await?;
    info!("catalog holds {} symbols", catalog.len());

    Ok(serde_json::to_value(select(catalog, args))?)
}

fn select(catalog: Vec<Symbol>, args: &SymbolsArgs) -> Vec<Symbol> {
    catalog
        .into_iter()
        .filter(|symbol| !args.warrants || symbol.is_covered_warrant())
        .take(args.limit.unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Symbol> {
        serde_json::from_str(
            r#"[{"s":"VNM","m":"HOSE","t":"STOCK"},
                {"s":"CVNM2401","m":"HOSE","t":"CW","b":"VNM","cwt":"C","is":"SSI"},
                {"s":"SHB","m":"HOSE","t":"STOCK"},
                {"s":"CFPT2402","m":"HOSE","t":"CW","b":"FPT","cwt":"C","is":"KIS"}]"#,
        )
        .expect("catalog")
    }

    fn tickers(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().filter_map(|s| s.ticker.as_deref()).collect()
    }

    #[test]
    fn limit_keeps_catalog_order() {
        let args = SymbolsArgs {
            limit: Some(2),
            warrants: false,
        };
        assert_eq!(tickers(&select(catalog(), &args)), vec!["VNM", "CVNM2401"]);
    }

    #[test]
    fn warrant_filter_applies_before_limit() {
        let args = SymbolsArgs {
            limit: Some(5),
            warrants: true,
        };
        assert_eq!(tickers(&select(catalog(), &args)), vec!["CVNM2401", "CFPT2402"]);
    }
}
