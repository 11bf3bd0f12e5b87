//! Lenient deserialization helpers for sloppy wire data
//!
//! Several backend endpoints serialize numeric fields as strings (and
//! occasionally null). These helpers accept number, numeric string or null
//! and coerce anything unparsable to 0 instead of failing the whole payload.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Deserialize an `f64` from number, numeric string or null
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Int(i)) => i as f64,
        Some(RawNumber::Float(f)) => f,
        Some(RawNumber::Text(s)) => s.trim().parse().unwrap_or(0.0),
        None => 0.0,
    };
    // NaN/Infinity never enter the money pipeline
    Ok(if value.is_finite() { value } else { 0.0 })
}

/// Deserialize an `i64` from number, numeric string or null
///
/// Fractional input truncates toward zero.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Int(i)) => i,
        Some(RawNumber::Float(f)) if f.is_finite() => f as i64,
        Some(RawNumber::Float(_)) => 0,
        Some(RawNumber::Text(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0)
        }
        None => 0,
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::lenient_f64")]
        amount: f64,
        #[serde(default, deserialize_with = "super::lenient_i64")]
        count: i64,
    }

    fn parse(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_lenient_f64_accepts_number_and_string() {
        assert_eq!(parse(r#"{"amount": 12.5}"#).amount, 12.5);
        assert_eq!(parse(r#"{"amount": "12.5"}"#).amount, 12.5);
        assert_eq!(parse(r#"{"amount": " 12.5 "}"#).amount, 12.5);
        assert_eq!(parse(r#"{"amount": 12}"#).amount, 12.0);
    }

    #[test]
    fn test_lenient_f64_coerces_garbage_to_zero() {
        assert_eq!(parse(r#"{"amount": "n/a"}"#).amount, 0.0);
        assert_eq!(parse(r#"{"amount": ""}"#).amount, 0.0);
        assert_eq!(parse(r#"{"amount": null}"#).amount, 0.0);
        assert_eq!(parse(r#"{}"#).amount, 0.0);
    }

    #[test]
    fn test_lenient_i64_accepts_number_and_string() {
        assert_eq!(parse(r#"{"count": 3}"#).count, 3);
        assert_eq!(parse(r#"{"count": "3"}"#).count, 3);
        assert_eq!(parse(r#"{"count": 3.9}"#).count, 3);
    }

    #[test]
    fn test_lenient_i64_coerces_garbage_to_zero() {
        assert_eq!(parse(r#"{"count": "three"}"#).count, 0);
        assert_eq!(parse(r#"{"count": null}"#).count, 0);
        assert_eq!(parse(r#"{}"#).count, 0);
    }
}
