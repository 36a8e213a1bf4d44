mod history;
mod quotes;
mod symbols;

use finavi_core::{ClientConfig, FinaviClient};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let config = client_config(cli, ClientConfig::from_env()?);
    let client = FinaviClient::new(&config)?;

    match &cli.command {
        Command::Quotes(args) => quotes::run(args, &client).await,
        Command::Symbols(args) => symbols::run(args, &client).await,
        Command::History(args) => history::run(args, &client).await,
    }
}

/// Layer command-line flags over the environment-derived config.
fn client_config(cli: &Cli, mut config: ClientConfig) -> ClientConfig {
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn flags_override_environment_values() {
        let cli = Cli::try_parse_from([
            "finavi",
            "--base-url",
            "http://127.0.0.1:9000",
            "--timeout-ms",
            "750",
            "symbols",
        ])
        .expect("valid arguments");
        let from_env = ClientConfig::default().with_base_url("https://env.example.test");

        let config = client_config(&cli, from_env);
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_ms, 750);
    }

    #[test]
    fn environment_values_survive_without_flags() {
        let cli = Cli::try_parse_from(["finavi", "symbols"]).expect("valid arguments");
        let from_env = ClientConfig::default()
            .with_base_url("https://env.example.test")
            .with_timeout_ms(1_234);

        let config = client_config(&cli, from_env.clone());
        assert_eq!(config, from_env);
    }
}
