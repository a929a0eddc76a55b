use crate::error::AppError;
use crate::household::{CalculationRequest, DayOfWeek, HouseholdInput, HouseholdProfile};
use crate::state::{AppState, LastCalculation};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{info, warn};

pub mod appliance;
pub mod tariff;

use appliance::{Appliance, BreakdownRow, DailyLoads, breakdown_rows};
use tariff::{DAYS_PER_MONTH, QuickStats, Tariff};

pub const DAYS_PER_WEEK: f64 = 7.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Age,
    Area,
    City,
    Day,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Area => "area",
            Self::City => "city",
            Self::Day => "day",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required input: {}", join_fields(.fields))]
    MissingRequiredInput { fields: Vec<RequiredField> },
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyEnergy {
    pub day: DayOfWeek,
    pub energy_kwh: f64,
}

/// One slice of the per-appliance distribution for the selected day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplianceShare {
    pub appliance: Appliance,
    pub today_kwh: f64,
    pub share_percent: f64,
}

/// Everything derived from one household input. Carries no timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyEstimate {
    pub day: DayOfWeek,
    pub day_multiplier: f64,
    pub daily_energy_kwh: f64,
    /// Extra energy attributed to the day multiplier; zero on plain weekdays.
    pub day_delta_kwh: f64,
    pub weekly_average_kwh: f64,
    pub monthly_average_kwh: f64,
    pub yearly_estimate_kwh: f64,
    pub breakdown: Vec<BreakdownRow>,
    /// Monday through Sunday, each day with its own multiplier.
    pub weekly_series: Vec<DailyEnergy>,
    pub quick_stats: QuickStats,
}

impl EnergyEstimate {
    pub fn distribution(&self) -> Vec<ApplianceShare> {
        let total: f64 = self.breakdown.iter().map(|row| row.today_kwh).sum();
        self.breakdown
            .iter()
            .map(|row| ApplianceShare {
                appliance: row.appliance,
                today_kwh: row.today_kwh,
                share_percent: if total > 0.0 {
                    row.today_kwh / total * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }
}

/// Check that every required field is present, reporting all missing ones
/// together.
pub fn validate(request: CalculationRequest) -> Result<HouseholdInput, ValidationError> {
    let mut missing = Vec::new();

    let name = present_text(request.name, RequiredField::Name, &mut missing);
    let age = request.age.filter(|age| *age > 0);
    if age.is_none() {
        missing.push(RequiredField::Age);
    }
    let area = present_text(request.area, RequiredField::Area, &mut missing);
    let city = present_text(request.city, RequiredField::City, &mut missing);
    if request.day.is_none() {
        missing.push(RequiredField::Day);
    }

    match (name, age, area, city, request.day) {
        (Some(name), Some(age), Some(area), Some(city), Some(day)) => Ok(HouseholdInput {
            profile: HouseholdProfile {
                name,
                age,
                area,
                city,
                house_type: request.house_type,
            },
            room_config: request.room_config,
            day,
            appliances: request.appliances,
        }),
        _ => Err(ValidationError::MissingRequiredInput { fields: missing }),
    }
}

fn present_text(
    value: Option<String>,
    field: RequiredField,
    missing: &mut Vec<RequiredField>,
) -> Option<String> {
    let value = value.filter(|text| !text.trim().is_empty());
    if value.is_none() {
        missing.push(field);
    }
    value
}

pub fn estimate(input: &HouseholdInput, tariff: &Tariff) -> EnergyEstimate {
    let day_multiplier = input.day.multiplier();
    let loads = DailyLoads::resolve(input.room_config, &input.appliances);
    let daily_energy_kwh = loads.energy_for(day_multiplier);

    let day_delta_kwh = if day_multiplier != 1.0 {
        daily_energy_kwh - daily_energy_kwh / day_multiplier
    } else {
        0.0
    };

    // The whole daily total, refrigerator included, is divided by the
    // selected day's multiplier before projecting. These figures do not add
    // up to `weekly_series`.
    let weekly_average_kwh = daily_energy_kwh * DAYS_PER_WEEK / day_multiplier;
    let monthly_average_kwh = daily_energy_kwh * DAYS_PER_MONTH / day_multiplier;
    let yearly_estimate_kwh = daily_energy_kwh * DAYS_PER_YEAR / day_multiplier;

    let weekly_series = DayOfWeek::ALL
        .into_iter()
        .map(|day| DailyEnergy {
            day,
            energy_kwh: loads.energy_for(day.multiplier()),
        })
        .collect();

    EnergyEstimate {
        day: input.day,
        day_multiplier,
        daily_energy_kwh,
        day_delta_kwh,
        weekly_average_kwh,
        monthly_average_kwh,
        yearly_estimate_kwh,
        breakdown: breakdown_rows(input.room_config, &input.appliances, day_multiplier),
        weekly_series,
        quick_stats: tariff.quick_stats(daily_energy_kwh),
    }
}

/// Validate and estimate in one step. No output is produced for an
/// incomplete request.
pub fn calculate(
    request: CalculationRequest,
    tariff: &Tariff,
) -> Result<EnergyEstimate, ValidationError> {
    let input = validate(request)?;
    Ok(estimate(&input, tariff))
}

pub fn run_calculation(
    state: &Arc<RwLock<AppState>>,
    request: CalculationRequest,
) -> Result<LastCalculation, AppError> {
    run_calculation_at(state, request, SystemTime::now())
}

/// Estimate with the session tariff and publish the result as the session's
/// last calculation. A rejected request leaves the state untouched.
pub fn run_calculation_at(
    state: &Arc<RwLock<AppState>>,
    request: CalculationRequest,
    timestamp: SystemTime,
) -> Result<LastCalculation, AppError> {
    let tariff = {
        let guard = state.read().map_err(|_| AppError::StateLock)?;
        guard.tariff().clone()
    };

    let input = match validate(request) {
        Ok(input) => input,
        Err(err) => {
            warn!(error = %err, "Calculation rejected");
            return Err(err.into());
        }
    };

    let estimate = estimate(&input, &tariff);
    info!(
        day = %input.day,
        room_config = %input.room_config,
        daily_kwh = estimate.daily_energy_kwh,
        "Energy estimate computed"
    );

    let calculation = LastCalculation {
        input,
        estimate,
        calculated_at: timestamp,
    };

    let mut guard = state.write().map_err(|_| AppError::StateLock)?;
    guard.set_last_calculation(calculation.clone());

    Ok(calculation)
}
