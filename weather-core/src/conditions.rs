use std::fmt;

/// Qualitative temperature band, derived from degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureClass {
    Freezing,
    Cold,
    Cool,
    Warm,
    Hot,
}

impl TemperatureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureClass::Freezing => "Freezing",
            TemperatureClass::Cold => "Cold",
            TemperatureClass::Cool => "Cool",
            TemperatureClass::Warm => "Warm",
            TemperatureClass::Hot => "Hot",
        }
    }
}

impl fmt::Display for TemperatureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bands: `< 0` freezing, `[0, 10)` cold, `[10, 20)` cool, `[20, 30)` warm,
/// `>= 30` hot.
pub fn classify_temperature(celsius: f64) -> TemperatureClass {
    if celsius < 0.0 {
        TemperatureClass::Freezing
    } else if celsius < 10.0 {
        TemperatureClass::Cold
    } else if celsius < 20.0 {
        TemperatureClass::Cool
    } else if celsius < 30.0 {
        TemperatureClass::Warm
    } else {
        TemperatureClass::Hot
    }
}

pub const UNKNOWN_CONDITION: &str = "Unknown";

/// tomorrow.io weather codes.
pub const CONDITION_LABELS: &[(i64, &str)] = &[
    (0, UNKNOWN_CONDITION),
    (1000, "Clear, Sunny"),
    (1100, "Mostly Clear"),
    (1101, "Partly Cloudy"),
    (1102, "Mostly Cloudy"),
    (1001, "Cloudy"),
    (2000, "Fog"),
    (2100, "Light Fog"),
    (4000, "Drizzle"),
    (4001, "Rain"),
    (4200, "Light Rain"),
    (4201, "Heavy Rain"),
    (5000, "Snow"),
    (5001, "Flurries"),
    (5100, "Light Snow"),
    (5101, "Heavy Snow"),
    (6000, "Freezing Drizzle"),
    (6001, "Freezing Rain"),
    (6200, "Light Freezing Rain"),
    (6201, "Heavy Freezing Rain"),
    (7000, "Ice Pellets"),
    (7101, "Heavy Ice Pellets"),
    (7102, "Light Ice Pellets"),
    (8000, "Thunderstorm"),
];

pub fn condition_label(code: i64) -> &'static str {
    CONDITION_LABELS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_CONDITION)
}

const WET_KEYWORDS: &[&str] = &["rain", "drizzle", "thunderstorm", "snow"];

/// True when a condition label describes precipitation of any kind.
pub fn is_wet_condition(label: &str) -> bool {
    let label = label.to_lowercase();
    WET_KEYWORDS.iter().any(|keyword| label.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_band_edges() {
        assert_eq!(classify_temperature(-0.1), TemperatureClass::Freezing);
        assert_eq!(classify_temperature(0.0), TemperatureClass::Cold);
        assert_eq!(classify_temperature(9.99), TemperatureClass::Cold);
        assert_eq!(classify_temperature(10.0), TemperatureClass::Cool);
        assert_eq!(classify_temperature(19.9), TemperatureClass::Cool);
        assert_eq!(classify_temperature(20.0), TemperatureClass::Warm);
        assert_eq!(classify_temperature(29.9), TemperatureClass::Warm);
        assert_eq!(classify_temperature(30.0), TemperatureClass::Hot);
        assert_eq!(classify_temperature(45.0), TemperatureClass::Hot);
    }

    #[test]
    fn class_display_is_capitalised() {
        assert_eq!(TemperatureClass::Cool.to_string(), "Cool");
        assert_eq!(TemperatureClass::Freezing.as_str(), "Freezing");
    }

    #[test]
    fn known_codes_have_labels() {
        assert_eq!(condition_label(1000), "Clear, Sunny");
        assert_eq!(condition_label(4201), "Heavy Rain");
        assert_eq!(condition_label(8000), "Thunderstorm");
    }

    #[test]
    fn unknown_code_maps_to_unknown() {
        assert_eq!(condition_label(0), "Unknown");
        assert_eq!(condition_label(1234), "Unknown");
        assert_eq!(condition_label(-1), "Unknown");
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<i64> = CONDITION_LABELS.iter().map(|(code, _)| *code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), CONDITION_LABELS.len());
    }

    #[test]
    fn wet_conditions() {
        assert!(is_wet_condition("Heavy Rain"));
        assert!(is_wet_condition("Freezing Drizzle"));
        assert!(is_wet_condition("Light Snow"));
        assert!(is_wet_condition("Thunderstorm"));
        assert!(!is_wet_condition("Ice Pellets"));
        assert!(!is_wet_condition("Flurries"));
        assert!(!is_wet_condition("Clear, Sunny"));
    }
}
