//! 数值序列化/反序列化工具
//!
//! Some server versions send numeric fields as JSON strings (`"389"` instead of `389`).
//! These helpers accept both and always serialize back as a JSON number.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    String(String),
}

fn convert<T, E>(raw: NumberOrString) -> Result<T, E>
where
    T: TryFrom<i64> + FromStr,
    E: serde::de::Error,
{
    match raw {
        NumberOrString::Number(n) => {
            T::try_from(n).map_err(|_| E::custom(format!("number out of range: {n}")))
        }
        NumberOrString::String(s) => s
            .trim()
            .parse::<T>()
            .map_err(|_| E::custom(format!("not a number: {s:?}"))),
    }
}

/// Serialize a number as-is.
pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    value.serialize(serializer)
}

/// Deserialize a number given either as a JSON number or a numeric string.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
{
    convert(NumberOrString::deserialize(deserializer)?)
}

/// Same as the parent module, for optional fields.
pub mod option {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{NumberOrString, convert};

    /// Serialize `Some(n)` as a number and `None` as `null`.
    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.serialize(serializer)
    }

    /// Deserialize an optional number given as a JSON number, numeric string or `null`.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<i64> + FromStr,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
            Some(raw) => convert(raw).map(Some),
            None => Ok(None),
        }
    }
}
