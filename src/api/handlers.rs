use crate::api::requests::{EstimateRequest, TipsQuery};
use crate::api::responses::{
    BreakdownRowResponse, DistributionResponse, EnergySummary, ErrorCode, ErrorResponse,
    EstimateSuccessResponse, ProfileSummary, QuickStatsResponse, StatsSuccessResponse,
    TipsSuccessResponse, WeeklyPointResponse,
};
use crate::error::AppError;
use crate::estimation::tariff::QuickStats;
use crate::estimation::{ValidationError, run_calculation_at};
use crate::household::{DayOfWeek, ParseError};
use crate::state::{AppState, LastCalculation};
use crate::tips::tips_for;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, warn};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const MISSING_INPUT_MESSAGE: &str = "Please fill in all required fields before calculating";

#[derive(Debug)]
enum TimestampError {
    Format(time::error::Format),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Format(err) => write!(f, "timestamp format error: {err}"),
        }
    }
}

pub enum EstimateResponse {
    Success(Box<EstimateSuccessResponse>),
    Error {
        status: StatusCode,
        body: ErrorResponse,
    },
}

impl IntoResponse for EstimateResponse {
    fn into_response(self) -> Response {
        match self {
            EstimateResponse::Success(body) => (StatusCode::OK, Json(*body)).into_response(),
            EstimateResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

pub async fn post_estimate(
    State(state): State<Arc<RwLock<AppState>>>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let now = SystemTime::now();
    match payload {
        Ok(Json(body)) => build_estimate_response(state, body, now),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected unreadable estimate body");
            invalid_estimate_response(rejection.body_text(), now)
        }
    }
}

pub enum StatsResponse {
    Success(StatsSuccessResponse),
    Error {
        status: StatusCode,
        body: ErrorResponse,
    },
}

impl IntoResponse for StatsResponse {
    fn into_response(self) -> Response {
        match self {
            StatsResponse::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            StatsResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

pub async fn get_stats(State(state): State<Arc<RwLock<AppState>>>) -> impl IntoResponse {
    build_stats_response(state, SystemTime::now())
}

pub enum TipsResponse {
    Success(TipsSuccessResponse),
    Error {
        status: StatusCode,
        body: ErrorResponse,
    },
}

impl IntoResponse for TipsResponse {
    fn into_response(self) -> Response {
        match self {
            TipsResponse::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            TipsResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

pub async fn get_tips(Query(query): Query<TipsQuery>) -> impl IntoResponse {
    build_tips_response(query, SystemTime::now())
}

fn build_estimate_response(
    state: Arc<RwLock<AppState>>,
    body: EstimateRequest,
    now: SystemTime,
) -> EstimateResponse {
    let request = match body.into_calculation_request() {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "Rejected malformed estimate request");
            return invalid_estimate_response(err.to_string(), now);
        }
    };

    let currency = match state.read() {
        Ok(guard) => guard.tariff().currency.clone(),
        Err(_) => return estimate_internal_error("state lock poisoned while reading tariff"),
    };

    let calculation = match run_calculation_at(&state, request, now) {
        Ok(calculation) => calculation,
        Err(AppError::Validation(ValidationError::MissingRequiredInput { fields })) => {
            let missing_fields = fields.iter().map(|f| f.as_str().to_string()).collect();
            return match error_body(
                ErrorCode::MissingRequiredInput,
                MISSING_INPUT_MESSAGE.to_string(),
                missing_fields,
                now,
            ) {
                Ok(body) => EstimateResponse::Error {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    body,
                },
                Err(_) => estimate_internal_error("timestamp formatting failure"),
            };
        }
        Err(AppError::StateLock) => {
            return estimate_internal_error("state lock poisoned while recording calculation");
        }
    };

    match format_timestamp(calculation.calculated_at) {
        Ok(timestamp) => EstimateResponse::Success(Box::new(map_calculation(
            &calculation,
            currency,
            timestamp,
        ))),
        Err(_) => estimate_internal_error("timestamp formatting failure"),
    }
}

fn map_calculation(
    calculation: &LastCalculation,
    currency: String,
    timestamp: String,
) -> EstimateSuccessResponse {
    let LastCalculation {
        input, estimate, ..
    } = calculation;

    EstimateSuccessResponse {
        profile: ProfileSummary {
            name: input.profile.name.clone(),
            age: input.profile.age,
            location: input.profile.location(),
            house_type: input.profile.house_type,
            room_config: input.room_config,
        },
        day: estimate.day,
        usage_factor: estimate.day_multiplier,
        energy: EnergySummary {
            daily_kwh: estimate.daily_energy_kwh,
            day_delta_kwh: estimate.day_delta_kwh,
            weekly_average_kwh: estimate.weekly_average_kwh,
            monthly_average_kwh: estimate.monthly_average_kwh,
            yearly_estimate_kwh: estimate.yearly_estimate_kwh,
        },
        breakdown: estimate
            .breakdown
            .iter()
            .map(|row| BreakdownRowResponse {
                appliance: row.appliance,
                label: row.appliance.label().to_string(),
                quantity: row.quantity,
                unit_power_kw: row.unit_power_kw,
                base_kwh: row.base_kwh,
                today_kwh: row.today_kwh,
            })
            .collect(),
        weekly_series: estimate
            .weekly_series
            .iter()
            .map(|point| WeeklyPointResponse {
                day: point.day,
                energy_kwh: point.energy_kwh,
                selected: point.day == estimate.day,
            })
            .collect(),
        distribution: estimate
            .distribution()
            .into_iter()
            .map(|share| DistributionResponse {
                appliance: share.appliance,
                today_kwh: share.today_kwh,
                share_percent: share.share_percent,
            })
            .collect(),
        quick_stats: map_quick_stats(&estimate.quick_stats, currency),
        tips: tips_for(estimate.day)
            .iter()
            .map(|tip| tip.to_string())
            .collect(),
        timestamp,
    }
}

fn map_quick_stats(stats: &QuickStats, currency: String) -> QuickStatsResponse {
    QuickStatsResponse {
        daily_cost: stats.daily_cost,
        monthly_cost: stats.monthly_cost,
        currency,
        daily_co2_kg: stats.daily_co2_kg,
    }
}

fn invalid_estimate_response(message: String, now: SystemTime) -> EstimateResponse {
    match error_body(ErrorCode::InvalidInput, message, Vec::new(), now) {
        Ok(body) => EstimateResponse::Error {
            status: StatusCode::BAD_REQUEST,
            body,
        },
        Err(_) => estimate_internal_error("timestamp formatting failure"),
    }
}

fn estimate_internal_error(message: &str) -> EstimateResponse {
    EstimateResponse::Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: internal_error_body("/api/estimate", message),
    }
}

fn build_stats_response(state: Arc<RwLock<AppState>>, now: SystemTime) -> StatsResponse {
    let guard = match state.read() {
        Ok(guard) => guard,
        Err(_) => {
            return stats_internal_error("state lock poisoned while reading last calculation");
        }
    };
    let currency = guard.tariff().currency.clone();
    let last = guard
        .last_calculation()
        .map(|calculation| (calculation.estimate.quick_stats.clone(), calculation.calculated_at));
    drop(guard);

    match last {
        Some((stats, calculated_at)) => match format_timestamp(calculated_at) {
            Ok(calculated_at) => StatsResponse::Success(StatsSuccessResponse {
                quick_stats: map_quick_stats(&stats, currency),
                calculated_at,
            }),
            Err(_) => stats_internal_error("timestamp formatting failure"),
        },
        None => match error_body(
            ErrorCode::NoData,
            "No calculation available yet".to_string(),
            Vec::new(),
            now,
        ) {
            Ok(body) => StatsResponse::Error {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body,
            },
            Err(_) => stats_internal_error("timestamp formatting failure"),
        },
    }
}

fn stats_internal_error(message: &str) -> StatsResponse {
    StatsResponse::Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: internal_error_body("/api/stats", message),
    }
}

fn build_tips_response(query: TipsQuery, now: SystemTime) -> TipsResponse {
    let day = match parse_tips_day(query.day.as_deref()) {
        Ok(day) => day,
        Err(err) => {
            return match error_body(ErrorCode::InvalidInput, err.to_string(), Vec::new(), now) {
                Ok(body) => TipsResponse::Error {
                    status: StatusCode::BAD_REQUEST,
                    body,
                },
                Err(_) => TipsResponse::Error {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: internal_error_body("/api/tips", "timestamp formatting failure"),
                },
            };
        }
    };

    TipsResponse::Success(TipsSuccessResponse {
        day,
        weekend: day.is_weekend(),
        tips: tips_for(day).iter().map(|tip| tip.to_string()).collect(),
    })
}

/// Monday is preselected in the form, so an absent day means Monday.
fn parse_tips_day(day: Option<&str>) -> Result<DayOfWeek, ParseError> {
    match day {
        Some(text) if !text.trim().is_empty() => text.parse(),
        _ => Ok(DayOfWeek::Monday),
    }
}

fn error_body(
    error_code: ErrorCode,
    error_message: String,
    missing_fields: Vec<String>,
    now: SystemTime,
) -> Result<ErrorResponse, TimestampError> {
    Ok(ErrorResponse {
        error_code,
        error_message,
        missing_fields,
        timestamp: format_timestamp(now)?,
    })
}

fn internal_error_body(endpoint: &str, message: &str) -> ErrorResponse {
    error!(
        endpoint = endpoint,
        message = message,
        "Internal error while handling request"
    );
    let formatted = format_timestamp(SystemTime::now()).unwrap_or_else(|err| {
        error!(error = %err, "Failed to format internal error timestamp");
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
    });
    ErrorResponse {
        error_code: ErrorCode::InternalError,
        error_message: INTERNAL_ERROR_MESSAGE.to_string(),
        missing_fields: Vec::new(),
        timestamp: formatted,
    }
}

fn format_timestamp(timestamp: SystemTime) -> Result<String, TimestampError> {
    let datetime = OffsetDateTime::from(timestamp);
    datetime.format(&Rfc3339).map_err(TimestampError::Format)
}
