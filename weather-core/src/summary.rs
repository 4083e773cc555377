//! Plain-text narratives built from hourly forecast records and realtime
//! observations.

use chrono::NaiveDate;

use crate::{
    conditions::{classify_temperature, condition_label, is_wet_condition},
    model::{CurrentConditions, HourlyRecord},
};

pub const NO_FORECAST_DATA: &str = "No forecast data available for the specified date.";
pub const WET_WEATHER: &str = "Expect wet weather conditions.";
const HOURLY_HEADER: &str = "\nHourly breakdown:";

/// Records whose timestamp falls on `date` (exact `YYYY-MM-DD` prefix).
pub fn records_on(
    records: &[HourlyRecord],
    date: NaiveDate,
) -> impl Iterator<Item = &HourlyRecord> {
    let prefix = date.format("%Y-%m-%d").to_string();
    records
        .iter()
        .filter(move |record| record.time.starts_with(&prefix))
}

/// Summarize the forecast for `target`.
///
/// Never fails: malformed numbers are left out of the aggregates, and a day
/// without records yields [`NO_FORECAST_DATA`].
pub fn summarize(records: &[HourlyRecord], target: NaiveDate) -> String {
    let day: Vec<&HourlyRecord> = records_on(records, target).collect();
    if day.is_empty() {
        return NO_FORECAST_DATA.to_string();
    }

    let mut lines = Vec::with_capacity(day.len() + 4);

    if let Some(stats) = Stats::of(valid(day.iter().map(|r| r.temperature_c))) {
        lines.push(temperature_sentence(&stats));
    }

    if let Some(max) = valid(day.iter().map(|r| r.precipitation_probability_pct)).reduce(f64::max)
    {
        lines.push(precipitation_sentence(max).to_string());
    }

    if day
        .iter()
        .any(|r| is_wet_condition(condition_label(r.condition_code)))
    {
        lines.push(WET_WEATHER.to_string());
    }

    lines.push(HOURLY_HEADER.to_string());
    lines.extend(day.iter().map(|r| hourly_line(r)));

    lines.join("\n")
}

/// One-line description of a realtime observation.
pub fn describe_current(place: &str, current: &CurrentConditions) -> String {
    format!(
        "The current weather in {place} is {} with a temperature of {}°C and conditions are {}.",
        classify_temperature(current.temperature_c),
        current.temperature_c,
        condition_label(current.condition_code),
    )
}

/// [`describe_current`] for several places, one line each, in input order.
pub fn compare_current<S: AsRef<str>>(observations: &[(S, CurrentConditions)]) -> String {
    observations
        .iter()
        .map(|(place, current)| describe_current(place.as_ref(), current))
        .collect::<Vec<_>>()
        .join("\n")
}

fn valid(values: impl Iterator<Item = Option<f64>>) -> impl Iterator<Item = f64> {
    values.flatten().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Stats {
    min: f64,
    max: f64,
    mean: f64,
}

impl Stats {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        let (min, max, sum, count) = values.fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0usize),
            |(min, max, sum, count), v| (min.min(v), max.max(v), sum + v, count + 1),
        );

        (count > 0).then(|| Stats {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

fn temperature_sentence(stats: &Stats) -> String {
    let class = classify_temperature(stats.mean).as_str().to_lowercase();
    format!(
        "It will be {class} with temperatures ranging from {}°C to {}°C (average {:.1}°C).",
        stats.min, stats.max, stats.mean
    )
}

fn precipitation_sentence(max_probability: f64) -> &'static str {
    if max_probability > 70.0 {
        "Yes, it will likely rain with high probability of precipitation."
    } else if max_probability > 40.0 {
        "There's a moderate chance of rain."
    } else if max_probability > 20.0 {
        "There's a slight chance of rain."
    } else {
        "It's unlikely to rain."
    }
}

fn hourly_line(record: &HourlyRecord) -> String {
    format!(
        "• {}: {}°C with {}, {}% chance of rain",
        record.time,
        or_na(record.temperature_c),
        condition_label(record.condition_code),
        or_na(record.precipitation_probability_pct),
    )
}

fn or_na(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => "n/a".to_string(),
    }
}
