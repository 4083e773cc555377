use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use forecast_brief_core::{
    Config, PlaceConfig, compare_current, describe_current, normalize, source_for_place,
    summarize,
};
use inquire::{Text, validator::Validation};
use std::path::PathBuf;
use tracing::{debug, info};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast-brief", version, about = "Plain-text weather briefings")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add or update a place interactively.
    Configure {
        /// Place name, e.g. "paris".
        place: String,
    },

    /// Make an already configured place the default.
    Default {
        place: String,
    },

    /// Summarize the hourly forecast for a day.
    Forecast {
        /// Configured place; the default place when absent.
        place: Option<String>,

        /// Day to summarize: "today", "tomorrow", "3 days time", "friday", "2024-05-01".
        #[arg(long, default_value = "today")]
        when: String,
    },

    /// Current weather for one place, or a comparison of several.
    Now {
        /// Configured places; the default place when none are given.
        places: Vec<String>,
    },

    /// Print the date a phrase resolves to.
    Resolve {
        phrase: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let today = Utc::now().date_naive();

        match self.command {
            Command::Configure { place } => {
                let mut config = Config::load()?;
                let entry = prompt_place(&place, config.place(&place).ok())?;
                config.upsert_place(&place, entry);
                config.save()?;
                info!(%place, "place saved");
                println!("Saved place '{place}' to {}", Config::config_file_path()?.display());
            }
            Command::Default { place } => {
                let mut config = Config::load()?;
                config.set_default_place(&place)?;
                config.save()?;
                println!("Default place is now '{place}'");
            }
            Command::Forecast { place, when } => {
                let config = Config::load()?;
                println!("{}", forecast(&config, place.as_deref(), &when, today).await?);
            }
            Command::Now { places } => {
                let config = Config::load()?;
                println!("{}", current(&config, &places).await?);
            }
            Command::Resolve { phrase } => {
                println!("{}", normalize(&phrase, today)?);
            }
        }

        Ok(())
    }
}

fn place_name<'a>(config: &'a Config, requested: Option<&'a str>) -> anyhow::Result<&'a str> {
    match requested {
        Some(name) => Ok(name),
        None => config.default_place_name(),
    }
}

async fn forecast(
    config: &Config,
    place: Option<&str>,
    when: &str,
    today: NaiveDate,
) -> anyhow::Result<String> {
    let name = place_name(config, place)?;
    let place = config.place(name)?;
    let date = normalize(when, today)?;

    debug!(place = name, %date, "summarizing forecast");

    let records = source_for_place(place)
        .hourly(&place.location)
        .await
        .with_context(|| format!("Failed to load forecast for '{name}'"))?;

    Ok(summarize(&records, date))
}

async fn current(config: &Config, places: &[String]) -> anyhow::Result<String> {
    let names: Vec<&str> = if places.is_empty() {
        vec![config.default_place_name()?]
    } else {
        places.iter().map(String::as_str).collect()
    };

    let mut observations = Vec::with_capacity(names.len());
    for name in names {
        let place = config.place(name)?;
        let conditions = source_for_place(place)
            .current(&place.location)
            .await
            .with_context(|| format!("Failed to load current weather for '{name}'"))?;
        observations.push((name, conditions));
    }

    Ok(match observations.as_slice() {
        [(name, conditions)] => describe_current(name, conditions),
        _ => compare_current(&observations),
    })
}

fn prompt_place(name: &str, existing: Option<&PlaceConfig>) -> anyhow::Result<PlaceConfig> {
    let location = Text::new(&format!("Coordinates for {name} (latitude,longitude):"))
        .with_default(existing.map(|p| p.location.as_str()).unwrap_or_default())
        .with_validator(|input: &str| {
            Ok(if is_coordinates(input) {
                Validation::Valid
            } else {
                Validation::Invalid("Expected \"latitude,longitude\", e.g. 48.8566,2.3522".into())
            })
        })
        .prompt()
        .context("Failed to read coordinates")?;

    let existing_forecast = existing
        .map(|p| p.forecast_file.display().to_string())
        .unwrap_or_default();
    let forecast_file = Text::new("Path to the hourly forecast snapshot (JSON):")
        .with_default(&existing_forecast)
        .prompt()
        .context("Failed to read forecast snapshot path")?;

    let existing_realtime = existing
        .and_then(|p| p.realtime_file.as_ref())
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let realtime_file = Text::new("Path to the realtime snapshot (JSON, optional):")
        .with_default(&existing_realtime)
        .prompt()
        .context("Failed to read realtime snapshot path")?;

    Ok(PlaceConfig {
        location: location.trim().to_string(),
        forecast_file: PathBuf::from(forecast_file.trim()),
        realtime_file: Some(realtime_file.trim())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from),
    })
}

fn is_coordinates(input: &str) -> bool {
    let Some((lat, lon)) = input.trim().split_once(',') else {
        return false;
    };

    match (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
        (Ok(lat), Ok(lon)) => (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon),
        _ => false,
    }
}
