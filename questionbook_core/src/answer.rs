//! Answer shapes and their canonical transport encoding
//!
//! Every item carries one [`Answer`]. Table items carry [`Answer::Rows`], one
//! entry per row, which encodes to the `{"0": .., "1": ..}` map the grader
//! pattern-matches on. Fraction sub-answers encode as `{"num": "..", "den": ".."}`.

use crate::numeric::Fraction;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Number, signed integer, expression or categorical label, already in display-neutral form
    Scalar(String),
    /// Always reduced, denominator positive
    Fraction(Fraction),
    Coordinate { x: i64, y: i64 },
    /// Several named inputs on one row, e.g. perimeter and area
    Fields(BTreeMap<String, String>),
    /// Row-indexed batch for table items
    Rows(Vec<Answer>),
}

impl Answer {
    pub fn scalar(value: impl ToString) -> Self {
        Answer::Scalar(value.to_string())
    }

    pub fn fields<K: Into<String>, V: ToString>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Answer::Fields(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }

    /// JSON form used inside rows and row maps
    pub fn to_value(&self) -> Value {
        match self {
            Answer::Scalar(s) => Value::String(s.clone()),
            Answer::Fraction(f) => {
                let mut map = Map::new();
                map.insert("num".to_string(), Value::String(f.num().to_string()));
                map.insert("den".to_string(), Value::String(f.den().to_string()));
                Value::Object(map)
            }
            Answer::Coordinate { x, y } => {
                let mut map = Map::new();
                map.insert("x".to_string(), Value::String(x.to_string()));
                map.insert("y".to_string(), Value::String(y.to_string()));
                Value::Object(map)
            }
            Answer::Fields(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
            Answer::Rows(rows) => Value::Object(
                rows.iter()
                    .enumerate()
                    .map(|(i, row)| (i.to_string(), row.to_value()))
                    .collect(),
            ),
        }
    }

    /// Canonical transport string: scalars verbatim, everything else as compact JSON
    pub fn encode(&self) -> String {
        match self {
            Answer::Scalar(s) => s.clone(),
            other => other.to_value().to_string(),
        }
    }

    /// Inverse of [`Answer::encode`]
    pub fn decode(raw: &str) -> Self {
        if raw.trim_start().starts_with('{') {
            if let Ok(value) = serde_json::from_str::<Value>(raw) {
                if let Some(answer) = Self::from_value(&value) {
                    return answer;
                }
            }
        }
        Answer::Scalar(raw.to_string())
    }

    /// Recognise an answer shape in a JSON value
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Answer::Scalar(s.clone())),
            Value::Number(n) => Some(Answer::Scalar(n.to_string())),
            Value::Bool(b) => Some(Answer::Scalar(b.to_string())),
            Value::Object(map) => Self::from_object(map),
            _ => None,
        }
    }

    fn from_object(map: &Map<String, Value>) -> Option<Self> {
        if is_row_map(map) {
            let rows = (0..map.len())
                .map(|i| map.get(&i.to_string()).and_then(Self::from_value))
                .collect::<Option<Vec<_>>>()?;
            return Some(Answer::Rows(rows));
        }

        if map.len() == 2 && map.contains_key("num") && map.contains_key("den") {
            let num = value_as_i64(&map["num"])?;
            let den = value_as_i64(&map["den"])?;
            return Fraction::checked_new(num, den).map(Answer::Fraction);
        }

        if map.len() == 2 && map.contains_key("x") && map.contains_key("y") {
            return Some(Answer::Coordinate {
                x: value_as_i64(&map["x"])?,
                y: value_as_i64(&map["y"])?,
            });
        }

        map.iter()
            .map(|(k, v)| value_as_text(v).map(|text| (k.clone(), text)))
            .collect::<Option<BTreeMap<_, _>>>()
            .map(Answer::Fields)
    }
}

/// Keys are exactly `"0".."n-1"`
pub(crate) fn is_row_map(map: &Map<String, Value>) -> bool {
    !map.is_empty() && (0..map.len()).all(|i| map.contains_key(&i.to_string()))
}

pub(crate) fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Answer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Answer::from_value(&value).ok_or_else(|| de::Error::custom("unrecognised answer shape"))
    }
}

/// `serialize_with` hook writing the transport string
pub(crate) fn serialize_transport<S: Serializer>(answer: &Answer, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&answer.encode())
}

/// `deserialize_with` hook reading the transport string
pub(crate) fn deserialize_transport<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Answer, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(Answer::decode(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_encode_verbatim() {
        assert_eq!(Answer::scalar(24).encode(), "24");
        assert_eq!(Answer::scalar("Quadrant-2").encode(), "Quadrant-2");
        assert_eq!(Answer::decode("$x^2$"), Answer::scalar("$x^2$"));
    }

    #[test]
    fn rows_encode_as_index_map() {
        let rows = Answer::Rows(vec![
            Answer::scalar(7),
            Answer::Fraction(Fraction::new(10, 24)),
            Answer::Coordinate { x: -1, y: 3 },
        ]);
        let encoded = rows.encode();
        assert_eq!(
            encoded,
            r#"{"0":"7","1":{"den":"12","num":"5"},"2":{"x":"-1","y":"3"}}"#
        );
        assert_eq!(Answer::decode(&encoded), rows);
    }

    #[test]
    fn field_rows_survive_decoding() {
        let rows = Answer::Rows(vec![Answer::fields([("perimeter", 24), ("area", 35)])]);
        let decoded = Answer::decode(&rows.encode());
        assert_eq!(decoded, rows);
    }

    #[test]
    fn malformed_fraction_objects_are_rejected() {
        let value: Value = serde_json::from_str(r#"{"num": "1", "den": "0"}"#).unwrap();
        assert!(Answer::from_value(&value).is_none());

        for raw in [
            r#"{"num": "-9223372036854775808", "den": "1"}"#,
            r#"{"num": "1", "den": "-9223372036854775808"}"#,
        ] {
            let value: Value = serde_json::from_str(raw).unwrap();
            assert!(Answer::from_value(&value).is_none(), "{}", raw);
        }
    }
}
