//! Loosely typed front end over [`serde_json::Value`].
//!
//! Callers that only have untyped data (the CLI, JSON payloads) go through
//! this module. Every shape the typed API rules out at compile time is
//! checked here at runtime and reported as [`MsumError::InvalidArgument`]:
//! non-array input, non-integer or non-positive windows, options that are
//! not an object, an accessor that is not a field reference, and a `copy`
//! flag that is not a boolean.
//!
//! Elements are coerced to `f64` with [`to_number`]. Elements that do not
//! coerce become NaN and poison the running sum from that point on; they
//! are not rejected.

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::core::msum::{ReturnMode, WindowedSums};
use crate::core::validate::{check_window, output_len};
use crate::error::{MsumError, Result};

/// Largest integer an `f64` holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// How to pull a value out of each input element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Top-level field of an object element.
    Field(String),
    /// JSON pointer (RFC 6901) into the element, e.g. `/point/x`.
    Pointer(String),
}

impl Accessor {
    /// Parse an accessor string. A leading `/` selects a JSON pointer.
    pub fn parse(spec: &str) -> Self {
        if spec.starts_with('/') {
            Accessor::Pointer(spec.to_string())
        } else {
            Accessor::Field(spec.to_string())
        }
    }

    /// Look the accessor up in `element`.
    pub fn resolve<'v>(&self, element: &'v Value) -> Option<&'v Value> {
        match self {
            Accessor::Field(name) => element.get(name.as_str()),
            Accessor::Pointer(pointer) => element.pointer(pointer),
        }
    }
}

/// Options recognised by [`windowed_sum_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub accessor: Option<Accessor>,
    /// `false` writes the sums back into the input array.
    pub copy: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            accessor: None,
            copy: true,
        }
    }
}

impl Options {
    /// Validate an optional options object.
    ///
    /// Unknown keys are ignored.
    pub fn from_value(value: Option<&Value>) -> Result<Self> {
        let map = match value {
            None => return Ok(Self::default()),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(MsumError::invalid(format!(
                    "options must be an object, got {}",
                    type_name(other)
                )))
            }
        };
        Self::from_map(map)
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let accessor = match map.get("accessor") {
            None => None,
            Some(Value::String(spec)) => Some(Accessor::parse(spec)),
            Some(other) => {
                return Err(MsumError::invalid(format!(
                    "accessor must be a field name or JSON pointer, got {}",
                    type_name(other)
                )))
            }
        };

        let copy = match map.get("copy") {
            None => true,
            Some(Value::Bool(copy)) => *copy,
            Some(other) => {
                return Err(MsumError::invalid(format!(
                    "copy option must be a boolean, got {}",
                    type_name(other)
                )))
            }
        };

        Ok(Self { accessor, copy })
    }

    pub fn mode(&self) -> ReturnMode {
        ReturnMode::from_copy_flag(self.copy)
    }

    /// Numeric value of one input element.
    ///
    /// A missing accessor target yields NaN.
    pub fn extract(&self, element: &Value) -> f64 {
        match &self.accessor {
            Some(accessor) => accessor.resolve(element).map_or(f64::NAN, to_number),
            None => to_number(element),
        }
    }
}

/// Validate a loosely typed window size.
///
/// Accepts integral numbers `>= 1`, including floats such as `3.0`.
pub fn window_from_value(value: &Value) -> Result<usize> {
    let number = match value {
        Value::Number(n) => n,
        other => {
            return Err(MsumError::invalid(format!(
                "window must be numeric, got {}",
                type_name(other)
            )))
        }
    };

    if let Some(window) = number.as_u64() {
        if window == 0 {
            return Err(MsumError::invalid("window must be a positive integer, got 0"));
        }
        return Ok(usize::try_from(window).unwrap_or(usize::MAX));
    }

    let window = number.as_f64().unwrap_or(f64::NAN);
    if !window.is_finite() || window.fract() != 0.0 || window < 1.0 {
        return Err(MsumError::invalid(format!(
            "window must be a positive integer, got {number}"
        )));
    }
    // Saturates for windows beyond usize, which then fail the range check.
    Ok(window as usize)
}

/// Coerce a JSON value to a number.
///
/// Numbers pass through, booleans map to 1/0, `null` and blank strings to
/// 0, strings go through [`parse_numeric`], and everything else becomes NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        Value::String(s) => parse_numeric(s),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Parse a numeric string.
///
/// Accepts decimal and exponent notation (`12`, `-.5`, `1e3`), the exact
/// spellings `Infinity`, `+Infinity` and `-Infinity`, and unsigned
/// `0x`/`0o`/`0b` integer literals. Surrounding whitespace is ignored and a
/// blank string is 0. Anything else, including `inf` and `nan`, is NaN.
pub fn parse_numeric(s: &str) -> f64 {
    let s = s.trim();
    match s {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.starts_with('+') {
            return f64::NAN;
        }
        return u128::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
    }

    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// Moving sum over a JSON array.
///
/// All arguments are validated before `input` is touched. With
/// `copy: false` the sums replace the leading elements of `input`, the
/// array is truncated, and the returned value borrows it.
pub fn windowed_sum_value<'a>(
    input: &'a mut Value,
    window: &Value,
    options: Option<&Value>,
) -> Result<WindowedSums<'a, Value>> {
    let items = match input {
        Value::Array(items) => items,
        other => {
            return Err(MsumError::invalid(format!(
                "input must be an array, got {}",
                type_name(other)
            )))
        }
    };
    let options = Options::from_value(options)?;
    let window = window_from_value(window)?;
    check_window(window, items.len())?;

    debug!(
        len = items.len(),
        window,
        copy = options.copy,
        accessor = ?options.accessor,
        "computing moving sum"
    );

    match options.mode() {
        ReturnMode::Copy => {
            let mut out: Vec<Value> = items
                .iter()
                .map(|item| to_json(options.extract(item)))
                .collect();
            slide_values(&mut out, window);
            Ok(WindowedSums::Fresh(out))
        }
        ReturnMode::InPlace => {
            for item in items.iter_mut() {
                *item = to_json(options.extract(item));
            }
            slide_values(items, window);
            Ok(WindowedSums::Aliased(items))
        }
    }
}

/// Rewrite `slots`, which hold extracted values as produced by [`to_json`],
/// with their window sums and drop the trailing `window - 1` slots.
///
/// The running sum and the leaving value stay in `f64`. A `null` slot reads
/// back as NaN; it stands for a non-finite value, and once one has entered
/// the window the running sum stays non-finite, so every later sum is
/// `null` either way.
fn slide_values(slots: &mut Vec<Value>, window: usize) {
    let n_out = output_len(window, slots.len());

    let mut sum = slots[..window]
        .iter()
        .fold(0.0, |acc, slot| acc + from_slot(slot));

    let mut leaving = from_slot(&slots[0]);
    slots[0] = to_json(sum);

    for i in 1..n_out {
        sum = sum - leaving + from_slot(&slots[i + window - 1]);
        leaving = from_slot(&slots[i]);
        slots[i] = to_json(sum);
    }

    slots.truncate(n_out);
}

fn from_slot(slot: &Value) -> f64 {
    slot.as_f64().unwrap_or(f64::NAN)
}

/// Convert a sum back to JSON. Integral values become JSON integers;
/// NaN and infinities, which JSON cannot carry, become `null`.
pub fn to_json(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return Value::from(value as i64);
    }
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sum_numbers() {
        let mut input = json!([2, 4, 4, 6, 2, 3, 5, 1, 5, 3, 7, 5]);
        let sums = windowed_sum_value(&mut input, &json!(3), None).unwrap();
        assert_eq!(
            sums.into_vec(),
            json!([10, 14, 12, 11, 10, 9, 11, 9, 15, 15])
                .as_array()
                .unwrap()
                .clone()
        );
    }

    #[test]
    fn test_accessor_field_and_pointer() {
        let mut input = json!([{"x": 1}, {"x": 2}, {"x": 3}, {"x": 4}, {"x": 5}, {"x": 6}]);
        let sums = windowed_sum_value(&mut input, &json!(3), Some(&json!({"accessor": "x"})))
            .unwrap()
            .into_vec();
        assert_eq!(Value::Array(sums), json!([6, 9, 12, 15]));

        let mut input = json!([{"p": {"x": 1.5}}, {"p": {"x": 2.5}}]);
        let sums = windowed_sum_value(&mut input, &json!(2), Some(&json!({"accessor": "/p/x"})))
            .unwrap()
            .into_vec();
        assert_eq!(Value::Array(sums), json!([4]));
    }

    #[test]
    fn test_window_validation() {
        for bad in [json!("5"), json!(2.7), json!(-3), json!(0), json!(true), json!(null), json!({}), json!([])] {
            let err = window_from_value(&bad).unwrap_err();
            assert!(matches!(err, MsumError::InvalidArgument(_)), "{bad}");
        }
        assert_eq!(window_from_value(&json!(3)).unwrap(), 3);
        assert_eq!(window_from_value(&json!(3.0)).unwrap(), 3);
    }

    #[test]
    fn test_options_validation() {
        assert_eq!(Options::from_value(None).unwrap(), Options::default());
        assert!(Options::from_value(Some(&json!("opts"))).is_err());
        assert!(Options::from_value(Some(&json!({"accessor": 5}))).is_err());
        assert!(Options::from_value(Some(&json!({"copy": "no"}))).is_err());

        let options = Options::from_value(Some(&json!({"copy": false, "other": 1}))).unwrap();
        assert!(!options.copy);
        assert_eq!(options.mode(), ReturnMode::InPlace);
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(to_number(&json!(2.5)), 2.5);
        assert_eq!(to_number(&json!(true)), 1.0);
        assert_eq!(to_number(&json!(null)), 0.0);
        assert_eq!(to_number(&json!(" 4 ")), 4.0);
        assert_eq!(to_number(&json!("")), 0.0);
        assert!(to_number(&json!("abc")).is_nan());
        assert!(to_number(&json!({"x": 1})).is_nan());
    }

    #[test]
    fn test_numeric_string_forms() {
        assert_eq!(parse_numeric("1e3"), 1000.0);
        assert_eq!(parse_numeric("-.5"), -0.5);
        assert_eq!(parse_numeric("+7"), 7.0);
        assert_eq!(parse_numeric("0x10"), 16.0);
        assert_eq!(parse_numeric("0b101"), 5.0);
        assert_eq!(parse_numeric("0o17"), 15.0);
        assert_eq!(parse_numeric(" Infinity "), f64::INFINITY);
        assert_eq!(parse_numeric("-Infinity"), f64::NEG_INFINITY);
        for not_numeric in ["inf", "infinity", "INF", "nan", "NaN", "-0x10", "0x", "0x+1", "1_000", "e5", "."] {
            assert!(parse_numeric(not_numeric).is_nan(), "{not_numeric}");
        }
    }

    #[test]
    fn test_matches_typed_float_sums() {
        let floats = [0.1, 0.2, 0.3, 1e17, -1e17, 2.5, 0.7];
        let input = Value::Array(floats.iter().map(|&f| json!(f)).collect());
        for window in 1..=floats.len() {
            let expected: Vec<Value> = crate::core::msum::moving_sum(&floats, window)
                .unwrap()
                .into_iter()
                .map(to_json)
                .collect();

            let mut copy_input = input.clone();
            let sums = windowed_sum_value(&mut copy_input, &json!(window), None).unwrap();
            assert_eq!(sums.into_vec(), expected);

            let mut in_place_input = input.clone();
            let sums = windowed_sum_value(
                &mut in_place_input,
                &json!(window),
                Some(&json!({"copy": false})),
            )
            .unwrap()
            .into_vec();
            assert_eq!(sums, expected);
        }
    }

    #[test]
    fn test_infinite_values_stay_null() {
        let mut input = json!(["Infinity", 1, 2]);
        let sums = windowed_sum_value(&mut input, &json!(1), None).unwrap().into_vec();
        assert_eq!(Value::Array(sums), json!([null, null, null]));

        let mut input = json!([1, 2, "-Infinity", 3]);
        let sums = windowed_sum_value(&mut input, &json!(2), Some(&json!({"copy": false})))
            .unwrap()
            .into_vec();
        assert_eq!(Value::Array(sums), json!([3, null, null]));
    }

    #[test]
    fn test_non_numeric_propagates_as_null() {
        let mut input = json!([1, "abc", 2, 3]);
        let sums = windowed_sum_value(&mut input, &json!(2), None).unwrap().into_vec();
        assert_eq!(Value::Array(sums), json!([null, null, null]));
    }

    #[test]
    fn test_to_json() {
        assert_eq!(to_json(10.0), json!(10));
        assert_eq!(to_json(0.5), json!(0.5));
        assert_eq!(to_json(f64::NAN), Value::Null);
        assert_eq!(to_json(f64::INFINITY), Value::Null);
    }
}
