//! Request bodies posted by the form collector.
//!
//! The collector owns primitive checks: enum names must parse and the
//! numeric fields must sit inside the ranges the form offers. Integers arrive
//! as `i64` so values too wide for the domain types still reach the range
//! checks. Presence of the required fields is left to `estimation::validate`.

use crate::household::{
    ApplianceSelection, CalculationRequest, DayOfWeek, HouseType, ParseError, RoomConfig,
};
use serde::Deserialize;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const AGE_RANGE: RangeInclusive<u8> = 18..=100;
pub const AC_COUNT_RANGE: RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("age {0} outside allowed range 18-100")]
    AgeOutOfRange(i64),
    #[error("ac_count {0} outside allowed range 1-5")]
    AcCountOutOfRange(i64),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimateRequest {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub area: Option<String>,
    pub city: Option<String>,
    pub house_type: Option<String>,
    pub room_config: Option<String>,
    pub day: Option<String>,
    #[serde(default)]
    pub has_ac: bool,
    pub ac_count: Option<i64>,
    pub has_fridge: Option<bool>,
    #[serde(default)]
    pub has_washing_machine: bool,
}

impl EstimateRequest {
    pub fn into_calculation_request(self) -> Result<CalculationRequest, InputError> {
        let defaults = ApplianceSelection::default();

        // Age zero counts as absent, not out of range.
        let age = match self.age {
            None => None,
            Some(0) => Some(0),
            Some(age) => Some(narrow(age, AGE_RANGE).ok_or(InputError::AgeOutOfRange(age))?),
        };

        let ac_count = if self.has_ac {
            let requested = self.ac_count.unwrap_or(i64::from(defaults.ac_count));
            narrow(requested, AC_COUNT_RANGE).ok_or(InputError::AcCountOutOfRange(requested))?
        } else {
            defaults.ac_count
        };

        Ok(CalculationRequest {
            name: self.name,
            age,
            area: self.area,
            city: self.city,
            house_type: parse_or_default::<HouseType>(self.house_type)?,
            room_config: parse_or_default::<RoomConfig>(self.room_config)?,
            day: parse_optional::<DayOfWeek>(self.day)?,
            appliances: ApplianceSelection {
                has_ac: self.has_ac,
                ac_count,
                has_fridge: self.has_fridge.unwrap_or(defaults.has_fridge),
                has_washing_machine: self.has_washing_machine,
            },
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TipsQuery {
    pub day: Option<String>,
}

fn narrow(value: i64, range: RangeInclusive<u8>) -> Option<u8> {
    u8::try_from(value).ok().filter(|value| range.contains(value))
}

/// Blank strings are treated like an absent field.
fn parse_optional<T>(value: Option<String>) -> Result<Option<T>, ParseError>
where
    T: std::str::FromStr<Err = ParseError>,
{
    match value {
        Some(text) if !text.trim().is_empty() => text.parse().map(Some),
        _ => Ok(None),
    }
}

fn parse_or_default<T>(value: Option<String>) -> Result<T, ParseError>
where
    T: std::str::FromStr<Err = ParseError> + Default,
{
    Ok(parse_optional(value)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_body() -> serde_json::Value {
        json!({
            "name": "Meera",
            "age": 29,
            "area": "Baner",
            "city": "Pune",
            "house_type": "Tenament",
            "room_config": "3bhk",
            "day": "Sunday",
            "has_ac": true,
            "ac_count": 2,
            "has_fridge": false,
            "has_washing_machine": true
        })
    }

    #[test]
    fn complete_body_maps_every_field() -> Result<(), Box<dyn std::error::Error>> {
        let body: EstimateRequest = serde_json::from_value(complete_body())?;

        let request = body.into_calculation_request()?;

        assert_eq!(request.name.as_deref(), Some("Meera"));
        assert_eq!(request.age, Some(29));
        assert_eq!(request.house_type, HouseType::Tenament);
        assert_eq!(request.room_config, RoomConfig::ThreeBhk);
        assert_eq!(request.day, Some(DayOfWeek::Sunday));
        assert_eq!(
            request.appliances,
            ApplianceSelection {
                has_ac: true,
                ac_count: 2,
                has_fridge: false,
                has_washing_machine: true,
            }
        );
        Ok(())
    }

    #[test]
    fn empty_body_uses_form_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let body: EstimateRequest = serde_json::from_value(json!({}))?;

        let request = body.into_calculation_request()?;

        assert_eq!(request.room_config, RoomConfig::OneBhk);
        assert_eq!(request.house_type, HouseType::Flat);
        assert_eq!(request.day, None);
        assert_eq!(request.appliances, ApplianceSelection::default());
        Ok(())
    }

    #[test]
    fn blank_day_is_treated_as_missing() -> Result<(), InputError> {
        let body = EstimateRequest {
            day: Some("  ".to_string()),
            ..EstimateRequest::default()
        };

        let request = body.into_calculation_request()?;

        assert_eq!(request.day, None);
        Ok(())
    }

    #[test]
    fn unknown_room_config_is_invalid() {
        let body = EstimateRequest {
            room_config: Some("5BHK".to_string()),
            ..EstimateRequest::default()
        };

        let result = body.into_calculation_request();

        assert_eq!(
            result,
            Err(InputError::Parse(ParseError::RoomConfig("5BHK".to_string())))
        );
    }

    #[test]
    fn age_outside_form_range_is_invalid() {
        let body = EstimateRequest {
            age: Some(12),
            ..EstimateRequest::default()
        };

        assert_eq!(
            body.into_calculation_request(),
            Err(InputError::AgeOutOfRange(12))
        );
    }

    #[test]
    fn age_wider_than_a_byte_is_invalid() -> Result<(), Box<dyn std::error::Error>> {
        for age in [300, -1] {
            let body: EstimateRequest = serde_json::from_value(json!({ "age": age }))?;

            assert_eq!(
                body.into_calculation_request(),
                Err(InputError::AgeOutOfRange(age))
            );
        }
        Ok(())
    }

    #[test]
    fn age_zero_is_left_for_validation() -> Result<(), InputError> {
        let body = EstimateRequest {
            age: Some(0),
            ..EstimateRequest::default()
        };

        assert_eq!(body.into_calculation_request()?.age, Some(0));
        Ok(())
    }

    #[test]
    fn ac_count_checked_only_when_ac_enabled() -> Result<(), InputError> {
        let disabled = EstimateRequest {
            has_ac: false,
            ac_count: Some(999),
            ..EstimateRequest::default()
        };
        assert_eq!(disabled.into_calculation_request()?.appliances.active_ac_units(), 0);

        let enabled = EstimateRequest {
            has_ac: true,
            ac_count: Some(9),
            ..EstimateRequest::default()
        };
        assert_eq!(
            enabled.into_calculation_request(),
            Err(InputError::AcCountOutOfRange(9))
        );
        Ok(())
    }
}
