use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::model::{CurrentConditions, HourlyRecord, lenient_code, lenient_number};

use super::ForecastSource;

/// Reads saved tomorrow.io responses from disk instead of calling the API.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    forecast_file: PathBuf,
    realtime_file: Option<PathBuf>,
}

impl SnapshotSource {
    pub fn new(forecast_file: PathBuf, realtime_file: Option<PathBuf>) -> Self {
        Self {
            forecast_file,
            realtime_file,
        }
    }

    async fn read(path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))
    }
}

// Missing values stay `None`; they are not counted as zero.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TmValues {
    #[serde(default, deserialize_with = "lenient_number")]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_code")]
    weather_code: i64,
    #[serde(default, deserialize_with = "lenient_number")]
    wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    precipitation_probability: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmInterval {
    #[serde(default)]
    time: String,
    #[serde(default)]
    values: TmValues,
}

#[derive(Debug, Deserialize)]
struct TmTimelines {
    #[serde(default)]
    hourly: Vec<TmInterval>,
}

#[derive(Debug, Deserialize)]
struct TmForecastResponse {
    timelines: TmTimelines,
}

#[derive(Debug, Deserialize)]
struct TmRealtimeResponse {
    data: TmInterval,
}

impl From<TmInterval> for HourlyRecord {
    fn from(interval: TmInterval) -> Self {
        let values = interval.values;
        HourlyRecord {
            time: interval.time,
            temperature_c: values.temperature,
            condition_code: values.weather_code,
            wind_speed_kmh: values.wind_speed,
            humidity_pct: values.humidity,
            precipitation_probability_pct: values.precipitation_probability,
        }
    }
}

fn parse_forecast(body: &str, path: &Path) -> Result<Vec<HourlyRecord>> {
    let parsed: TmForecastResponse = serde_json::from_str(body)
        .with_context(|| format!("Failed to parse forecast snapshot JSON: {}", path.display()))?;

    Ok(parsed
        .timelines
        .hourly
        .into_iter()
        .map(HourlyRecord::from)
        .collect())
}

fn parse_realtime(body: &str, path: &Path) -> Result<CurrentConditions> {
    let parsed: TmRealtimeResponse = serde_json::from_str(body)
        .with_context(|| format!("Failed to parse realtime snapshot JSON: {}", path.display()))?;

    let temperature_c = parsed.data.values.temperature.ok_or_else(|| {
        anyhow!(
            "Realtime snapshot {} has no readable temperature",
            path.display()
        )
    })?;

    Ok(CurrentConditions {
        time: parsed.data.time,
        temperature_c,
        condition_code: parsed.data.values.weather_code,
    })
}

#[async_trait]
impl ForecastSource for SnapshotSource {
    async fn hourly(&self, location: &str) -> Result<Vec<HourlyRecord>> {
        debug!(%location, file = %self.forecast_file.display(), "reading forecast snapshot");

        let body = Self::read(&self.forecast_file).await?;
        let records = parse_forecast(&body, &self.forecast_file)?;

        if records.is_empty() {
            warn!(%location, "forecast snapshot contains no hourly entries");
        }
        debug!(%location, count = records.len(), "loaded hourly records");

        Ok(records)
    }

    async fn current(&self, location: &str) -> Result<CurrentConditions> {
        let path = self.realtime_file.as_ref().ok_or_else(|| {
            anyhow!(
                "No realtime snapshot configured for location {location}.\n\
                 Hint: run `forecast-brief configure <place>` and provide a realtime file."
            )
        })?;

        debug!(%location, file = %path.display(), "reading realtime snapshot");

        let body = Self::read(path).await?;
        parse_realtime(&body, path)
    }
}
