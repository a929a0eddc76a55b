use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown room configuration: {0}")]
    RoomConfig(String),
    #[error("unknown day of week: {0}")]
    DayOfWeek(String),
    #[error("unknown house type: {0}")]
    HouseType(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RoomConfig {
    #[default]
    #[serde(rename = "1BHK")]
    OneBhk,
    #[serde(rename = "2BHK")]
    TwoBhk,
    #[serde(rename = "3BHK")]
    ThreeBhk,
}

impl RoomConfig {
    pub const ALL: [RoomConfig; 3] = [Self::OneBhk, Self::TwoBhk, Self::ThreeBhk];

    /// Ceiling fans assumed for this configuration.
    pub fn fans(self) -> u32 {
        match self {
            Self::OneBhk => 2,
            Self::TwoBhk => 3,
            Self::ThreeBhk => 4,
        }
    }

    /// Light fixtures assumed for this configuration.
    pub fn lights(self) -> u32 {
        match self {
            Self::OneBhk => 2,
            Self::TwoBhk => 3,
            Self::ThreeBhk => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneBhk => "1BHK",
            Self::TwoBhk => "2BHK",
            Self::ThreeBhk => "3BHK",
        }
    }
}

impl fmt::Display for RoomConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomConfig {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|room| room.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::RoomConfig(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Monday first, matching the order of the weekly series.
    pub const ALL: [DayOfWeek; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Usage multiplier applied to every day-sensitive appliance.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Monday | Self::Tuesday | Self::Wednesday | Self::Thursday => 1.0,
            Self::Friday => 1.1,
            Self::Saturday => 1.3,
            Self::Sunday => 1.2,
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::DayOfWeek(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum HouseType {
    #[default]
    Flat,
    Tenament,
}

impl HouseType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::Tenament => "Tenament",
        }
    }
}

impl fmt::Display for HouseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HouseType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [Self::Flat, Self::Tenament]
            .into_iter()
            .find(|house| house.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::HouseType(s.to_string()))
    }
}

/// Appliance toggles as collected from the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplianceSelection {
    pub has_ac: bool,
    /// Only meaningful when `has_ac` is set.
    pub ac_count: u8,
    pub has_fridge: bool,
    pub has_washing_machine: bool,
}

impl ApplianceSelection {
    /// AC units that actually draw power.
    pub fn active_ac_units(&self) -> u8 {
        if self.has_ac { self.ac_count } else { 0 }
    }
}

impl Default for ApplianceSelection {
    fn default() -> Self {
        Self {
            has_ac: false,
            ac_count: 1,
            has_fridge: true,
            has_washing_machine: false,
        }
    }
}

/// Identity fields. Shown back to the user, never used in the formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdProfile {
    pub name: String,
    pub age: u8,
    pub area: String,
    pub city: String,
    pub house_type: HouseType,
}

impl HouseholdProfile {
    pub fn location(&self) -> String {
        format!("{}, {}", self.area, self.city)
    }
}

/// Candidate input handed over by the form collector. Required fields may
/// still be absent here; `estimation::validate` turns it into a
/// [`HouseholdInput`] or reports every missing field at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationRequest {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub house_type: HouseType,
    pub room_config: RoomConfig,
    pub day: Option<DayOfWeek>,
    pub appliances: ApplianceSelection,
}

/// Fully populated input accepted by the estimator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdInput {
    pub profile: HouseholdProfile,
    pub room_config: RoomConfig,
    pub day: DayOfWeek,
    pub appliances: ApplianceSelection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_config_resolves_fixture_counts() {
        assert_eq!((RoomConfig::OneBhk.fans(), RoomConfig::OneBhk.lights()), (2, 2));
        assert_eq!((RoomConfig::TwoBhk.fans(), RoomConfig::TwoBhk.lights()), (3, 3));
        assert_eq!(
            (RoomConfig::ThreeBhk.fans(), RoomConfig::ThreeBhk.lights()),
            (4, 4)
        );
    }

    #[test]
    fn room_config_parses_case_insensitively() {
        assert_eq!("2bhk".parse::<RoomConfig>(), Ok(RoomConfig::TwoBhk));
        assert_eq!(" 3BHK ".parse::<RoomConfig>(), Ok(RoomConfig::ThreeBhk));
        assert_eq!(
            "4BHK".parse::<RoomConfig>(),
            Err(ParseError::RoomConfig("4BHK".to_string()))
        );
    }

    #[test]
    fn day_multipliers_follow_weekly_usage_pattern() {
        let multipliers: Vec<f64> = DayOfWeek::ALL.iter().map(|d| d.multiplier()).collect();
        assert_eq!(multipliers, vec![1.0, 1.0, 1.0, 1.0, 1.1, 1.3, 1.2]);
    }

    #[test]
    fn only_saturday_and_sunday_are_weekend() {
        let weekend: Vec<DayOfWeek> = DayOfWeek::ALL
            .into_iter()
            .filter(|d| d.is_weekend())
            .collect();
        assert_eq!(weekend, vec![DayOfWeek::Saturday, DayOfWeek::Sunday]);
    }

    #[test]
    fn day_parse_rejects_unknown_names() {
        assert_eq!("friday".parse::<DayOfWeek>(), Ok(DayOfWeek::Friday));
        assert!(matches!(
            "Funday".parse::<DayOfWeek>(),
            Err(ParseError::DayOfWeek(_))
        ));
    }

    #[test]
    fn ac_units_ignored_when_ac_disabled() {
        let selection = ApplianceSelection {
            has_ac: false,
            ac_count: 4,
            ..ApplianceSelection::default()
        };
        assert_eq!(selection.active_ac_units(), 0);

        let selection = ApplianceSelection {
            has_ac: true,
            ..selection
        };
        assert_eq!(selection.active_ac_units(), 4);
    }

    #[test]
    fn room_config_serializes_with_display_name() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&RoomConfig::TwoBhk)?, "\"2BHK\"");
        Ok(())
    }
}
