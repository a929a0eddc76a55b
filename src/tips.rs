use crate::household::DayOfWeek;

const WEEKEND_TIPS: [&str; 4] = [
    "Use natural light during daytime",
    "Plan energy-intensive activities during off-peak hours",
    "Unplug unused appliances",
    "Set AC to 24°C or higher for efficiency",
];

const WEEKDAY_TIPS: [&str; 4] = [
    "Turn off lights when leaving",
    "Use smart thermostats",
    "Run appliances during off-peak hours",
    "Consider energy-efficient appliances",
];

/// Energy saving advice for the selected day. Depends only on whether the
/// day falls on a weekend.
pub fn tips_for(day: DayOfWeek) -> &'static [&'static str] {
    if day.is_weekend() {
        &WEEKEND_TIPS
    } else {
        &WEEKDAY_TIPS
    }
}
