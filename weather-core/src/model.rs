use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One hourly forecast entry, as handed to the summarizer.
///
/// Numeric fields are optional: third-party data is tolerated, and a value
/// that cannot be read as a finite number is kept as `None` rather than
/// rejecting the whole record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRecord {
    pub time: String,

    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature_c: Option<f64>,

    #[serde(default, deserialize_with = "lenient_code")]
    pub condition_code: i64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_speed_kmh: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity_pct: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub precipitation_probability_pct: Option<f64>,
}

/// A single realtime observation for the current-weather path.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub time: String,
    pub temperature_c: f64,
    pub condition_code: i64,
}

/// Shared by [`HourlyRecord`] and the snapshot wire types.
///
/// Accepts a JSON number or a numeric string (`"12.5"`, `"12.5°C"`, `"40%"`).
/// Everything else becomes `None`.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(number_from_value))
}

/// Weather codes are integers; anything unreadable maps to `0` ("Unknown").
pub(crate) fn lenient_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(code_from_value).unwrap_or(0))
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => strip_unit(s).parse::<f64>().ok(),
        _ => None,
    };

    number.filter(|v| v.is_finite())
}

fn code_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn strip_unit(raw: &str) -> &str {
    let trimmed = raw.trim();
    ["°C", "%", "km/h"]
        .iter()
        .find_map(|unit| trimmed.strip_suffix(unit))
        .unwrap_or(trimmed)
        .trim_end()
}
