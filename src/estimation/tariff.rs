/// Default electricity price per kWh.
pub const DEFAULT_RATE_PER_KWH: f64 = 6.0;
/// Grid emission factor in kg CO2 per kWh.
pub const DEFAULT_CO2_KG_PER_KWH: f64 = 0.82;
pub const DEFAULT_CURRENCY: &str = "INR";
pub const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Tariff {
    pub rate_per_kwh: f64,
    pub co2_kg_per_kwh: f64,
    pub currency: String,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            rate_per_kwh: DEFAULT_RATE_PER_KWH,
            co2_kg_per_kwh: DEFAULT_CO2_KG_PER_KWH,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Cost and emission figures derived from a daily energy total.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickStats {
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub daily_co2_kg: f64,
}

impl Tariff {
    pub fn quick_stats(&self, daily_energy_kwh: f64) -> QuickStats {
        QuickStats {
            daily_cost: daily_energy_kwh * self.rate_per_kwh,
            monthly_cost: daily_energy_kwh * DAYS_PER_MONTH * self.rate_per_kwh,
            daily_co2_kg: daily_energy_kwh * self.co2_kg_per_kwh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tariff_prices_daily_and_monthly() {
        let stats = Tariff::default().quick_stats(10.0);

        assert_eq!(stats.daily_cost, 60.0);
        assert_eq!(stats.monthly_cost, 1800.0);
        assert!((stats.daily_co2_kg - 8.2).abs() < 1e-9);
    }

    #[test]
    fn zero_energy_costs_nothing() {
        let stats = Tariff::default().quick_stats(0.0);

        assert_eq!(stats.daily_cost, 0.0);
        assert_eq!(stats.monthly_cost, 0.0);
        assert_eq!(stats.daily_co2_kg, 0.0);
    }
}
