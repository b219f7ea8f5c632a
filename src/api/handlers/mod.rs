use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use seatbook_core::models::{Outcome, SeatMap};
use seatbook_core::service::{ServiceError, SharedService};

// ============================================================
// Request / Response Types
// ============================================================

/// Seat number as sent by a client: either a JSON number or the raw text of a form field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSeat {
    Number(i64),
    Text(String),
}

impl RawSeat {
    fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveInput {
    pub seat_number: RawSeat,
    pub name: String,
    pub document: String,
    /// Defaults to today.
    pub day: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub day: Option<String>,
}

/// Result of a reserve or cancel call. `message` is always ready to show to a person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeResponse {
    /// Outcome code, absent when the input could not be parsed.
    pub outcome: Option<String>,
    pub seat: Option<i64>,
    pub success: bool,
    pub message: String,
}

/// Occupancy of one day, as data plus the rendered text map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapResponse {
    #[serde(flatten)]
    pub map: SeatMap,
    pub text: String,
}

// ============================================================
// Outcome Mapping
// ============================================================

fn outcome_status(outcome: &Outcome) -> StatusCode {
    match outcome {
        Outcome::Reserved { .. } => StatusCode::CREATED,
        Outcome::Cancelled { .. } => StatusCode::OK,
        Outcome::AlreadyReserved { .. } | Outcome::NotReserved { .. } => StatusCode::CONFLICT,
        Outcome::InvalidSeat { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn respond(result: Result<Outcome, ServiceError>) -> (StatusCode, Json<OutcomeResponse>) {
    match result {
        Ok(outcome) => (
            outcome_status(&outcome),
            Json(OutcomeResponse {
                outcome: Some(outcome.as_str().to_string()),
                seat: Some(outcome.seat()),
                success: outcome.is_success(),
                message: outcome.to_string(),
            }),
        ),
        Err(e) => {
            tracing::warn!("Rejected request: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(OutcomeResponse {
                    outcome: None,
                    seat: None,
                    success: false,
                    message: e.to_string(),
                }),
            )
        }
    }
}

fn day_or_today(day: Option<String>) -> String {
    day.filter(|d| !d.trim().is_empty())
        .unwrap_or_else(crate::today)
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Reservations
// ============================================================

pub async fn reserve(
    State(service): State<SharedService>,
    Json(input): Json<ReserveInput>,
) -> (StatusCode, Json<OutcomeResponse>) {
    let day = day_or_today(input.day);
    respond(service.reserve(
        &input.seat_number.as_text(),
        &input.name,
        &input.document,
        &day,
    ))
}

pub async fn cancel(
    State(service): State<SharedService>,
    Path(seat): Path<String>,
    Query(query): Query<DayQuery>,
) -> (StatusCode, Json<OutcomeResponse>) {
    let day = day_or_today(query.day);
    respond(service.cancel(&seat, &day))
}

// ============================================================
// Occupancy
// ============================================================

pub async fn map(
    State(service): State<SharedService>,
    Query(query): Query<DayQuery>,
) -> Json<MapResponse> {
    let day = day_or_today(query.day);
    let map = service.seat_map(&day);
    let text = map.render();
    Json(MapResponse { map, text })
}
