//! Appliance power table and per-appliance breakdown rows.
//!
//! Every appliance except the refrigerator scales with the day multiplier;
//! the refrigerator runs around the clock and contributes a flat amount.

use crate::household::{ApplianceSelection, RoomConfig};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Appliance {
    Fan,
    Light,
    AirConditioner,
    Refrigerator,
    WashingMachine,
}

impl Appliance {
    /// kWh-equivalent drawn per unit per day.
    pub fn unit_power_kw(self) -> f64 {
        match self {
            Self::Fan => 0.4,
            Self::Light => 0.8,
            Self::AirConditioner => 3.0,
            Self::Refrigerator => 4.0,
            Self::WashingMachine => 2.0,
        }
    }

    pub fn is_day_sensitive(self) -> bool {
        !matches!(self, Self::Refrigerator)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Fan => "Fans",
            Self::Light => "Lights",
            Self::AirConditioner => "Air Conditioner",
            Self::Refrigerator => "Refrigerator",
            Self::WashingMachine => "Washing Machine",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub appliance: Appliance,
    pub quantity: u32,
    pub unit_power_kw: f64,
    pub base_kwh: f64,
    pub today_kwh: f64,
}

impl BreakdownRow {
    fn new(appliance: Appliance, quantity: u32, day_multiplier: f64) -> Self {
        let unit_power_kw = appliance.unit_power_kw();
        let base_kwh = quantity as f64 * unit_power_kw;
        let today_kwh = if appliance.is_day_sensitive() {
            base_kwh * day_multiplier
        } else {
            base_kwh
        };
        Self {
            appliance,
            quantity,
            unit_power_kw,
            base_kwh,
            today_kwh,
        }
    }
}

/// Daily energy split into the parts the formula treats differently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyLoads {
    /// Fans plus lights.
    pub base_kwh: f64,
    pub ac_kwh: f64,
    pub washing_kwh: f64,
    pub fridge_kwh: f64,
}

impl DailyLoads {
    pub fn resolve(room_config: RoomConfig, appliances: &ApplianceSelection) -> Self {
        let base_kwh = room_config.fans() as f64 * Appliance::Fan.unit_power_kw()
            + room_config.lights() as f64 * Appliance::Light.unit_power_kw();
        let ac_kwh =
            f64::from(appliances.active_ac_units()) * Appliance::AirConditioner.unit_power_kw();
        let washing_kwh = if appliances.has_washing_machine {
            Appliance::WashingMachine.unit_power_kw()
        } else {
            0.0
        };
        let fridge_kwh = if appliances.has_fridge {
            Appliance::Refrigerator.unit_power_kw()
        } else {
            0.0
        };
        Self {
            base_kwh,
            ac_kwh,
            washing_kwh,
            fridge_kwh,
        }
    }

    /// Total for one day: day-sensitive loads scaled, refrigerator added flat.
    pub fn energy_for(&self, day_multiplier: f64) -> f64 {
        (self.base_kwh + self.ac_kwh + self.washing_kwh) * day_multiplier + self.fridge_kwh
    }
}

/// Rows for the appliances present in the household, fans and lights first.
pub fn breakdown_rows(
    room_config: RoomConfig,
    appliances: &ApplianceSelection,
    day_multiplier: f64,
) -> Vec<BreakdownRow> {
    let mut rows = vec![
        BreakdownRow::new(Appliance::Fan, room_config.fans(), day_multiplier),
        BreakdownRow::new(Appliance::Light, room_config.lights(), day_multiplier),
    ];
    if appliances.has_ac {
        rows.push(BreakdownRow::new(
            Appliance::AirConditioner,
            u32::from(appliances.ac_count),
            day_multiplier,
        ));
    }
    if appliances.has_fridge {
        rows.push(BreakdownRow::new(Appliance::Refrigerator, 1, day_multiplier));
    }
    if appliances.has_washing_machine {
        rows.push(BreakdownRow::new(Appliance::WashingMachine, 1, day_multiplier));
    }
    rows
}
