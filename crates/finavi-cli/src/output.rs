use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(data: &Value, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    for line in lines(data, format, pretty)? {
        println!("{line}");
    }
    Ok(())
}

fn lines(data: &Value, format: OutputFormat, pretty: bool) -> Result<Vec<String>, CliError> {
    match (format, data) {
        (OutputFormat::Ndjson, Value::Array(items)) => items
            .iter()
            .map(|item| serde_json::to_string(item).map_err(CliError::from))
            .collect(),
        (OutputFormat::Ndjson, other) => Ok(vec![serde_json::to_string(other)?]),
        (OutputFormat::Json, _) if pretty => Ok(vec![serde_json::to_string_pretty(data)?]),
        (OutputFormat::Json, _) => Ok(vec![serde_json::to_string(data)?]),
    }
}
