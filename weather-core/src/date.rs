//! Resolution of loose date phrases ("tomorrow", "two days time", "friday",
//! "2024-03-01") into calendar dates.

use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use thiserror::Error;

/// Hourly forecast data only reaches this many days past the reference date.
pub const FORECAST_HORIZON_DAYS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Unsupported date format: {phrase}")]
    UnsupportedFormat { phrase: String },

    #[error("Forecast is limited to {} days ahead (got '{phrase}').", FORECAST_HORIZON_DAYS)]
    HorizonExceeded { phrase: String },
}

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

fn days_time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]+|an?|one|two|three|four|five|six|seven|eight|nine|ten)\s+days?\s*time")
            .expect("days-time pattern is valid")
    })
}

fn iso_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("ISO date pattern is valid")
    })
}

/// Resolve `phrase` against `reference`.
///
/// Relative phrases must land within [`FORECAST_HORIZON_DAYS`] of the
/// reference date; absolute `YYYY-MM-DD` dates are returned unchecked.
pub fn normalize(phrase: &str, reference: NaiveDate) -> Result<NaiveDate, DateError> {
    let text = phrase.trim().to_lowercase();

    match text.as_str() {
        "" | "today" => return Ok(reference),
        "tomorrow" => return days_ahead(phrase, reference, 1),
        "next tomorrow" | "the day after tomorrow" => return days_ahead(phrase, reference, 2),
        _ => {}
    }

    if let Some(caps) = days_time_pattern().captures(&text) {
        // An integer too large for u64 is certainly past the horizon.
        let days = day_count(&caps[1]).ok_or_else(|| horizon_exceeded(phrase))?;
        return days_ahead(phrase, reference, days);
    }

    if let Some(target) = WEEKDAYS.iter().position(|day| *day == text) {
        let today = reference.weekday().num_days_from_monday() as usize;
        let delta = (target + 7 - today) % 7;
        return days_ahead(phrase, reference, delta as u64);
    }

    if iso_date_pattern().is_match(&text) {
        return NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map_err(|_| unsupported(phrase));
    }

    Err(unsupported(phrase))
}

fn days_ahead(phrase: &str, reference: NaiveDate, days: u64) -> Result<NaiveDate, DateError> {
    if days > FORECAST_HORIZON_DAYS {
        return Err(horizon_exceeded(phrase));
    }

    reference
        .checked_add_days(Days::new(days))
        .ok_or_else(|| horizon_exceeded(phrase))
}

fn unsupported(phrase: &str) -> DateError {
    DateError::UnsupportedFormat {
        phrase: phrase.to_string(),
    }
}

fn horizon_exceeded(phrase: &str) -> DateError {
    DateError::HorizonExceeded {
        phrase: phrase.to_string(),
    }
}

fn day_count(token: &str) -> Option<u64> {
    let count = match token {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        digits => return digits.parse().ok(),
    };
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tuesday.
    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    fn plus(days: u64) -> NaiveDate {
        reference().checked_add_days(Days::new(days)).unwrap()
    }

    #[test]
    fn today_and_empty_resolve_to_reference() {
        assert_eq!(normalize("", reference()), Ok(reference()));
        assert_eq!(normalize("   ", reference()), Ok(reference()));
        assert_eq!(normalize("today", reference()), Ok(reference()));
        assert_eq!(normalize("  ToDay ", reference()), Ok(reference()));
    }

    #[test]
    fn tomorrow_and_day_after() {
        assert_eq!(normalize("tomorrow", reference()), Ok(plus(1)));
        assert_eq!(normalize("TOMORROW", reference()), Ok(plus(1)));
        assert_eq!(normalize("next tomorrow", reference()), Ok(plus(2)));
        assert_eq!(normalize("The day after tomorrow", reference()), Ok(plus(2)));
    }

    #[test]
    fn numeric_days_time() {
        assert_eq!(normalize("3 days time", reference()), Ok(plus(3)));
        assert_eq!(normalize("1 day time", reference()), Ok(plus(1)));
        assert_eq!(normalize("0 days time", reference()), Ok(reference()));
        assert_eq!(normalize("5 daystime", reference()), Ok(plus(5)));
        assert_eq!(normalize("2 days  time", reference()), Ok(plus(2)));
    }

    #[test]
    fn worded_days_time() {
        assert_eq!(normalize("a day time", reference()), Ok(plus(1)));
        assert_eq!(normalize("two days time", reference()), Ok(plus(2)));
        assert_eq!(normalize("Five days time", reference()), Ok(plus(5)));
    }

    #[test]
    fn days_time_beyond_horizon() {
        let err = normalize("6 days time", reference()).unwrap_err();
        assert_eq!(
            err,
            DateError::HorizonExceeded {
                phrase: "6 days time".to_string()
            }
        );

        assert!(matches!(
            normalize("seven days time", reference()),
            Err(DateError::HorizonExceeded { .. })
        ));
        assert!(matches!(
            normalize("99999999999999999999999 days time", reference()),
            Err(DateError::HorizonExceeded { .. })
        ));
    }

    #[test]
    fn non_ascii_digits_are_unsupported() {
        for phrase in ["٣ days time", "３ days time"] {
            assert_eq!(normalize(phrase, reference()), Err(unsupported(phrase)));
        }
    }

    #[test]
    fn horizon_message_names_the_limit() {
        let err = normalize("6 days time", reference()).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Forecast is limited to {FORECAST_HORIZON_DAYS} days ahead (got '6 days time').")
        );
    }

    #[test]
    fn weekday_same_day_is_offset_zero() {
        assert_eq!(normalize("tuesday", reference()), Ok(reference()));
    }

    #[test]
    fn weekday_ahead() {
        assert_eq!(normalize("wednesday", reference()), Ok(plus(1)));
        assert_eq!(normalize("Sunday", reference()), Ok(plus(5)));
    }

    #[test]
    fn weekday_beyond_horizon() {
        // Monday is six days after a Tuesday.
        let err = normalize("monday", reference()).unwrap_err();
        assert!(matches!(err, DateError::HorizonExceeded { phrase } if phrase == "monday"));
    }

    #[test]
    fn iso_date_passes_through_without_horizon_check() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(normalize("2024-01-01", reference()), Ok(expected));

        let far = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap();
        assert_eq!(normalize("2030-12-31", reference()), Ok(far));
    }

    #[test]
    fn loose_or_impossible_iso_dates_are_unsupported() {
        for phrase in ["2024-1-1", "2024-02-30", "2024/01/01"] {
            assert_eq!(
                normalize(phrase, reference()),
                Err(unsupported(phrase))
            );
        }
    }

    #[test]
    fn unknown_phrase_keeps_original_text() {
        let err = normalize("  Next Month ", reference()).unwrap_err();
        assert_eq!(
            err,
            DateError::UnsupportedFormat {
                phrase: "  Next Month ".to_string()
            }
        );
        assert_eq!(err.to_string(), "Unsupported date format:   Next Month ");
    }

    #[test]
    fn abbreviated_weekday_is_unsupported() {
        assert!(matches!(
            normalize("fri", reference()),
            Err(DateError::UnsupportedFormat { .. })
        ));
    }
}
