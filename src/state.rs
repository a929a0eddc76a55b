use crate::estimation::EnergyEstimate;
use crate::estimation::tariff::Tariff;
use crate::household::HouseholdInput;
use std::time::SystemTime;

/// The most recent successful calculation of this session.
#[derive(Debug, Clone, PartialEq)]
pub struct LastCalculation {
    pub input: HouseholdInput,
    pub estimate: EnergyEstimate,
    pub calculated_at: SystemTime,
}

#[derive(Debug)]
pub struct AppState {
    tariff: Tariff,
    last_calculation: Option<LastCalculation>,
}

impl AppState {
    pub fn new(tariff: Tariff) -> Self {
        Self {
            tariff,
            last_calculation: None,
        }
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// `None` until a calculation has succeeded.
    pub fn last_calculation(&self) -> Option<&LastCalculation> {
        self.last_calculation.as_ref()
    }

    pub fn set_last_calculation(&mut self, calculation: LastCalculation) {
        self.last_calculation = Some(calculation);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Tariff::default())
    }
}
