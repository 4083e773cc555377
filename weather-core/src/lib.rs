//! Core library for the `forecast-brief` CLI.
//!
//! This crate defines:
//! - Date phrase normalization ("tomorrow", "3 days time", "friday")
//! - Temperature and condition classification
//! - Plain-text forecast and current-weather summaries
//! - The forecast source abstraction and an offline snapshot source
//! - Configuration of named places
//!
//! The normalization and summary functions are pure: they take the reference
//! date and the records as arguments and never touch the clock, disk or
//! environment.

pub mod conditions;
pub mod config;
pub mod date;
pub mod model;
pub mod source;
pub mod summary;

pub use conditions::{TemperatureClass, classify_temperature, condition_label};
pub use config::{Config, PlaceConfig};
pub use date::{DateError, FORECAST_HORIZON_DAYS, normalize};
pub use model::{CurrentConditions, HourlyRecord};
pub use source::{ForecastSource, source_for_place};
pub use summary::{compare_current, describe_current, summarize};
