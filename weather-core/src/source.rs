use crate::{
    config::PlaceConfig,
    model::{CurrentConditions, HourlyRecord},
    source::snapshot::SnapshotSource,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod snapshot;

/// Where hourly forecasts and realtime observations come from.
///
/// `location` is an opaque `"latitude,longitude"` string.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn hourly(&self, location: &str) -> anyhow::Result<Vec<HourlyRecord>>;

    async fn current(&self, location: &str) -> anyhow::Result<CurrentConditions>;
}

/// Construct the source for a configured place.
pub fn source_for_place(place: &PlaceConfig) -> Box<dyn ForecastSource> {
    Box::new(SnapshotSource::new(
        place.forecast_file.clone(),
        place.realtime_file.clone(),
    ))
}
