//! CLI argument definitions for finavi.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quotes` | Fetch market snapshots for one or more tickers |
//! | `symbols` | Dump the listed symbol catalog |
//! | `history` | Fetch chart history for one ticker |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--base-url` | `FINAVI_BASE_URL` or the public host | Service base URL |
//! | `--timeout-ms` | `FINAVI_TIMEOUT_MS` or `10000` | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! finavi quotes VNM FPT HPG --pretty
//! finavi symbols --limit 20 --format ndjson
//! finavi history VNM --range 3m --bars
//! RUST_LOG=finavi_core=debug finavi history VNM --range 1d --from 1717286400 --to 1717372800
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use finavi_core::ChartRange;

/// Typed client for the Finavi Vietnamese stock-market data service.
#[derive(Debug, Parser)]
#[command(name = "finavi", author, version, about)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Service base URL; overrides FINAVI_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds; overrides FINAVI_TIMEOUT_MS.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON document.
    Json,
    /// One JSON value per line for list results.
    Ndjson,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch market snapshots for one or more tickers.
    ///
    ///   finavi quotes VNM FPT
    ///   finavi quotes VNM,FPT,HPG
    Quotes(QuotesArgs),

    /// Dump the listed symbol catalog.
    ///
    ///   finavi symbols --limit 50
    Symbols(SymbolsArgs),

    /// Fetch chart history for one ticker.
    ///
    /// Without --from/--to the window ends now and spans the range.
    ///
    ///   finavi history VNM --range 5d
    ///   finavi history VNM --range 1m --bars
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct QuotesArgs {
    /// Tickers, separate or comma-joined.
    #[arg(required = true)]
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct SymbolsArgs {
    /// Keep only the first N entries.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Keep only covered warrants.
    #[arg(long, default_value_t = false)]
    pub warrants: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    pub symbol: String,

    /// Chart window: 1d, 5d, 1m, 3m, 3y or 5y.
    #[arg(long, default_value_t = ChartRange::OneMonth)]
    pub range: ChartRange,

    /// Window start, passed to the service unchanged.
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Window end, passed to the service unchanged.
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Emit one record per bar instead of the column arrays.
    #[arg(long, default_value_t = false)]
    pub bars: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_history_with_range_and_bounds() {
        let cli = Cli::try_parse_from([
            "finavi", "--pretty", "history", "VNM", "--range", "3M", "--from", "1", "--to", "2",
        ])
        .expect("valid arguments");

        assert!(cli.pretty);
        let Command::History(args) = cli.command else {
            panic!("expected history command");
        };
        assert_eq!(args.range, ChartRange::ThreeMonths);
        assert_eq!(args.from.as_deref(), Some("1"));
        assert_eq!(args.to.as_deref(), Some("2"));
    }

    #[test]
    fn from_without_to_is_rejected() {
        let result = Cli::try_parse_from(["finavi", "history", "VNM", "--from", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_range_is_rejected() {
        let result = Cli::try_parse_from(["finavi", "history", "VNM", "--range", "2w"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "finavi",
            "quotes",
            "VNM",
            "--timeout-ms",
            "2500",
            "--base-url",
            "http://localhost:8080",
        ])
        .expect("valid arguments");

        assert_eq!(cli.timeout_ms, Some(2_500));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
    }
}
