//! Parsing of command line input into a JSON array.
//!
//! Three layouts are accepted:
//! - a JSON array, e.g. `[1, 2, 3]` or `[{"x": 1}, {"x": 2}]`
//! - a stream of JSON objects, one record after another (JSON Lines)
//! - plain numbers separated by whitespace or commas

use serde_json::{Deserializer, Value};
use thiserror::Error;

/// Errors reading CLI input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("input is empty")]
    Empty,
}

/// Parse input text into a JSON value suitable for the moving sum.
///
/// Tokens in plain text that are not numbers are kept as strings; they
/// coerce to NaN when summed.
pub fn parse_input(text: &str) -> Result<Value, InputError> {
    let trimmed = text.trim_start();

    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    if trimmed.starts_with('{') {
        let records = Deserializer::from_str(trimmed)
            .into_iter::<Value>()
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Value::Array(records));
    }

    let values: Vec<Value> = trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(parse_token)
        .collect();

    if values.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(Value::Array(values))
}

/// Read and parse a file, or stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&std::path::Path>) -> Result<Value, InputError> {
    let text = match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)?,
        _ => std::io::read_to_string(std::io::stdin())?,
    };
    parse_input(&text)
}

fn parse_token(token: &str) -> Value {
    if let Ok(n) = token.parse::<i64>() {
        return Value::from(n);
    }
    // Non-finite tokens have no JSON number form; they stay strings and are
    // coerced by the numeric string rules when summed.
    token
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map_or_else(|| Value::String(token.to_string()), Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_array() {
        let value = parse_input("  [1, 2.5, {\"x\": 3}]\n").unwrap();
        assert_eq!(value, json!([1, 2.5, {"x": 3}]));
    }

    #[test]
    fn test_parse_json_lines() {
        let value = parse_input("{\"x\": 1}\n{\"x\": 2}\n{\"x\": 3}\n").unwrap();
        assert_eq!(value, json!([{"x": 1}, {"x": 2}, {"x": 3}]));
    }

    #[test]
    fn test_parse_plain_numbers() {
        let value = parse_input("2 4\n4,6, 2\t3").unwrap();
        assert_eq!(value, json!([2, 4, 4, 6, 2, 3]));

        let value = parse_input("1.5 abc").unwrap();
        assert_eq!(value, json!([1.5, "abc"]));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_input("   \n"), Err(InputError::Empty)));
        assert!(matches!(parse_input("[1, 2"), Err(InputError::Json(_))));
    }
}
