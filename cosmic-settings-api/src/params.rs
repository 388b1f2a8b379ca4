//! Typed request parameters and the single query-string encoder.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single request parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Free-form text, sent percent-encoded.
    Text(String),
    /// Integral number.
    Number(i64),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u16> for ParamValue {
    fn from(value: u16) -> Self {
        Self::Number(i64::from(value))
    }
}

/// Ordered parameter map for one remote call.
///
/// Keys are kept sorted so the encoded query string is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestParams(BTreeMap<String, ParamValue>);

impl RequestParams {
    /// Empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style insert that skips `None` and blank text.
    #[must_use]
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.into();
            if !matches!(&value, ParamValue::Text(s) if s.trim().is_empty()) {
                self.0.insert(key.to_string(), value);
            }
        }
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Look a parameter up.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Text value of a parameter, numbers rendered in decimal.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.0.get(key).map(ToString::to_string)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as `k1=v1&k2=v2`, every key and value passed through [`encode_component`].
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(&v.to_string())))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// RFC 3986 percent-encoding of one query component.
///
/// This is the only place user input is escaped before it reaches a URL.
pub fn encode_component(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}
