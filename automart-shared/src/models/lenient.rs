//! Deserializers for numeric fields the API sends either as JSON numbers or
//! as numeric strings (database decimals arrive quoted).

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr<T> {
    Value(T),
    Text(String),
}

impl<T> Repr<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn resolve<E: de::Error>(self) -> Result<T, E> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Text(text) => text.trim().parse().map_err(E::custom),
        }
    }
}

pub(crate) fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    Repr::<T>::deserialize(deserializer)?.resolve()
}

pub(crate) fn optional_number_or_string<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    Option::<Repr<T>>::deserialize(deserializer)?
        .map(Repr::resolve)
        .transpose()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Priced {
        #[serde(deserialize_with = "super::number_or_string")]
        price: f64,
        #[serde(default, deserialize_with = "super::optional_number_or_string")]
        amount: Option<u32>,
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let from_number: Priced = serde_json::from_str(r#"{"price": 1500.5}"#).unwrap();
        assert!((from_number.price - 1500.5).abs() < f64::EPSILON);
        assert_eq!(from_number.amount, None);

        let from_text: Priced =
            serde_json::from_str(r#"{"price": " 2500000.00 ", "amount": "12"}"#).unwrap();
        assert!((from_text.price - 2_500_000.0).abs() < f64::EPSILON);
        assert_eq!(from_text.amount, Some(12));
    }

    #[test]
    fn rejects_non_numeric_text() {
        let result = serde_json::from_str::<Priced>(r#"{"price": "cheap"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn null_optional_is_none() {
        let parsed: Priced = serde_json::from_str(r#"{"price": 1, "amount": null}"#).unwrap();
        assert_eq!(parsed.amount, None);
    }
}
