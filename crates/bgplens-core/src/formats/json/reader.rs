use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::formats::common::reader::lenient_i64 as parse_i64;
use crate::parse_asn;

/// A container level that may be encoded as one object or an array of
/// objects. Always decodes to a list, possibly empty.
#[derive(Debug)]
pub struct Rows<T>(pub Vec<T>);

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Rows(Vec::new())
    }
}

impl<T> Rows<T> {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> IntoIterator for Rows<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Rows<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Rows(rows_from_value(value)))
    }
}

/// Normalize an object-or-array value to a list of decoded rows.
///
/// Arrays are tried first; a bare object becomes a one-element list.
/// `null` is empty. Any other shape is dropped with a warning, as are
/// array elements that are not objects.
pub fn rows_from_value<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(decode_row).collect(),
        Value::Object(_) => decode_row(value).into_iter().collect(),
        Value::Null => Vec::new(),
        other => {
            warn!(
                shape = shape_name(&other),
                "ignoring container that is neither an object nor an array"
            );
            Vec::new()
        }
    }
}

fn decode_row<T: DeserializeOwned>(value: Value) -> Option<T> {
    if !value.is_object() {
        debug!(shape = shape_name(&value), "skipping non-object row");
        return None;
    }
    match serde_json::from_value(value) {
        Ok(row) => Some(row),
        Err(err) => {
            warn!(%err, "skipping undecodable row");
            None
        }
    }
}

pub fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Counter field: string or number, `0` on anything else.
pub fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_i64(&value))
}

/// ASN field: asplain/asdot string or number, `0` on anything else.
pub fn lenient_asn<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_asn(&value))
}

/// Text field: strings verbatim, numbers rendered, `""` otherwise.
pub fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        other => {
            if !other.is_null() {
                debug!(shape = shape_name(&other), "defaulting text field");
            }
            String::new()
        }
    })
}

fn value_to_i64(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX)))
            .or_else(|| number.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
            .unwrap_or(0),
        Value::String(text) => parse_i64(text),
        Value::Null => 0,
        other => {
            debug!(shape = shape_name(other), "defaulting counter field");
            0
        }
    }
}

fn value_to_asn(value: &Value) -> u32 {
    let asn = match value {
        Value::Number(number) => number.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(text) => parse_asn(text),
        _ => None,
    };
    asn.unwrap_or_else(|| {
        if !value.is_null() {
            debug!(%value, "defaulting ASN field");
        }
        0
    })
}
