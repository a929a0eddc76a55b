use crate::estimation::appliance::Appliance;
use crate::household::{DayOfWeek, HouseType, RoomConfig};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EstimateSuccessResponse {
    pub profile: ProfileSummary,
    pub day: DayOfWeek,
    pub usage_factor: f64,
    pub energy: EnergySummary,
    pub breakdown: Vec<BreakdownRowResponse>,
    pub weekly_series: Vec<WeeklyPointResponse>,
    pub distribution: Vec<DistributionResponse>,
    pub quick_stats: QuickStatsResponse,
    pub tips: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfileSummary {
    pub name: String,
    pub age: u8,
    pub location: String,
    pub house_type: HouseType,
    pub room_config: RoomConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EnergySummary {
    pub daily_kwh: f64,
    pub day_delta_kwh: f64,
    pub weekly_average_kwh: f64,
    pub monthly_average_kwh: f64,
    pub yearly_estimate_kwh: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BreakdownRowResponse {
    pub appliance: Appliance,
    pub label: String,
    pub quantity: u32,
    pub unit_power_kw: f64,
    pub base_kwh: f64,
    pub today_kwh: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WeeklyPointResponse {
    pub day: DayOfWeek,
    pub energy_kwh: f64,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DistributionResponse {
    pub appliance: Appliance,
    pub today_kwh: f64,
    pub share_percent: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct QuickStatsResponse {
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub currency: String,
    pub daily_co2_kg: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StatsSuccessResponse {
    pub quick_stats: QuickStatsResponse,
    pub calculated_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TipsSuccessResponse {
    pub day: DayOfWeek,
    pub weekend: bool,
    pub tips: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ErrorResponse {
    pub error_code: ErrorCode,
    pub error_message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingRequiredInput,
    InvalidInput,
    NoData,
    InternalError,
}
