//! Typed conversion of raw profile rows.
//!
//! Coercion is lenient: a missing or unparsable value resolves to its
//! default and never produces an error, so hand-edited files keep loading.

use crate::constants::{
    DEFAULT_DATATYPE, DEFAULT_FUNCTION_CODE, DEFAULT_READ_WRITE, DEFAULT_REGISTER, DEFAULT_SCALE,
    columns,
};
use crate::models::{Parameter, RegisterType};
use std::collections::HashMap;

/// One data row keyed by header name
///
/// Columns missing from the line read as empty. When a header name repeats,
/// the rightmost column wins.
#[derive(Debug, Clone, Default)]
pub struct RawRow<'a> {
    fields: HashMap<&'a str, &'a str>,
}

impl<'a> RawRow<'a> {
    pub fn new(headers: &'a [String], values: &'a [String]) -> Self {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = values.get(i).map(String::as_str).unwrap_or("");
                (header.as_str(), value)
            })
            .collect();
        Self { fields }
    }

    /// Raw value for a column, empty when absent
    pub fn get(&self, column: &str) -> &'a str {
        self.fields.get(column).copied().unwrap_or("")
    }

    fn get_or(&self, column: &str, default: &str) -> String {
        match self.get(column) {
            "" => default.to_string(),
            value => value.to_string(),
        }
    }
}

impl Parameter {
    /// Build a parameter from a raw row, applying defaults and derived flags
    pub fn from_raw_row(row: &RawRow<'_>) -> Self {
        let register = parse_leading_int(row.get(columns::REGISTER))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_REGISTER);

        // A zero function code is treated as unset; other values are kept
        // as written, so out-of-range codes surface as `Unknown`
        let function_code = parse_leading_int(row.get(columns::FUNCTION_CODE))
            .and_then(|n| i32::try_from(n).ok())
            .filter(|&fc| fc != 0)
            .unwrap_or(DEFAULT_FUNCTION_CODE);

        // Zero scale is treated as unset too
        let scale = parse_leading_float(row.get(columns::SCALE))
            .filter(|s| *s != 0.0)
            .unwrap_or(DEFAULT_SCALE);

        let read_write = row.get_or(columns::READ_WRITE, DEFAULT_READ_WRITE);
        let is_boolean = row.get(columns::DATATYPE).eq_ignore_ascii_case("bool");

        Self {
            controller: row.get(columns::CONTROLLER).to_string(),
            param_name: row.get(columns::PARAM_NAME).to_string(),
            description: row.get(columns::DESCRIPTION).to_string(),
            register,
            function_code,
            datatype: row.get_or(columns::DATATYPE, DEFAULT_DATATYPE),
            scale,
            unit: row.get(columns::UNIT).to_string(),
            tag: row.get(columns::TAG).to_string(),
            is_writable: read_write.to_lowercase().contains('w'),
            read_write,
            is_boolean,
            register_type: RegisterType::from_function_code(function_code),
        }
    }
}

/// Parse the integer prefix of a value, ignoring trailing characters
///
/// `"40007"`, `" 40007 "`, `"40007abc"` and `"0x9C47"` all give 40007;
/// `"12.9"` gives 12. Values outside `i64` give `None`.
pub(crate) fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let (digits, radix) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (unsigned, 10),
    };

    let digits_len = digits
        .bytes()
        .take_while(|b| char::from(*b).is_digit(radix))
        .count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..digits_len], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse the longest floating-point prefix of a value
pub(crate) fn parse_leading_float(value: &str) -> Option<f64> {
    let value = value.trim();
    let candidate_len = value
        .bytes()
        .take_while(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        .count();

    (1..=candidate_len)
        .rev()
        .find_map(|len| value[..len].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
