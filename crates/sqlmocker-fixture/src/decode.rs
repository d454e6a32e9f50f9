//! Exact decoding of fixture values
//!
//! `serde_json` is built with `arbitrary_precision`, so a number keeps the
//! literal token from the file. The token is classified only after parsing:
//! integral tokens that fit an `i64` become [`Value::Integer`], everything
//! else goes through `f64`. Large IDs therefore never lose precision.

use serde_json::Number;
use sqlmocker_core::Value;

/// Classify a JSON number token
pub fn decode_number(number: &Number) -> Result<Value, String> {
    let token = number.to_string();

    if let Ok(integer) = token.parse::<i64>() {
        return Ok(Value::Integer(integer));
    }

    token
        .parse::<f64>()
        .map(Value::Decimal)
        .map_err(|_| format!("number {} is neither an integer nor a decimal", token))
}

/// Decode one fixture cell or argument
///
/// Only numbers and strings are meaningful as arguments. Booleans, nulls,
/// arrays and objects are rejected. Returned cells may also be `null`, see
/// [`decode_cell`].
pub fn decode_value(json: &serde_json::Value) -> Result<Value, String> {
    match json {
        serde_json::Value::Number(number) => decode_number(number),
        serde_json::Value::String(text) => Ok(Value::Text(text.clone())),
        other => Err(format!("unsupported fixture value: {}", other)),
    }
}

/// Decode a sequence in order, failing on the first bad element
pub fn decode_values(values: &[serde_json::Value]) -> Result<Vec<Value>, String> {
    values.iter().map(decode_value).collect()
}

/// Decode one returned cell, where `null` stands for a NULL column
pub fn decode_cell(json: &serde_json::Value) -> Result<Option<Value>, String> {
    match json {
        serde_json::Value::Null => Ok(None),
        other => decode_value(other).map(Some),
    }
}

/// Decode one returned row
pub fn decode_cells(values: &[serde_json::Value]) -> Result<Vec<Option<Value>>, String> {
    values.iter().map(decode_cell).collect()
}
