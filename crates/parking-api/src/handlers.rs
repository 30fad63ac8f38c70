//! API Handlers
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use crate::dto::{
    AvailableQuery, AvailableSpotsResponse, ErrorResponse, ParkRequest, ParkResponse, SearchQuery,
    SearchVehicleResponse, UnparkRequest, UnparkResponse,
};
use crate::AppState;

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

fn invalid_json(rejection: JsonRejection) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid JSON: {}", rejection.body_text()),
    )
}

fn invalid_query(rejection: QueryRejection) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid query: {}", rejection.body_text()),
    )
}

/// Treats an empty query value the same as an absent one.
fn required(value: Option<String>, name: &str) -> Result<String, Response> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("{} query parameter is required", name),
        )
    })
}

pub async fn post_only() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Only POST method is allowed")
}

pub async fn get_only() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Only GET method is allowed")
}

/// `POST /park`
pub async fn park(
    State(state): State<AppState>,
    payload: Result<Json<ParkRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_json(rejection),
    };

    let result = state.engine.park(&req.vehicle_type, &req.vehicle_number);
    state.metrics.observe("park", &result);

    match result {
        Ok(spot_id) => (
            StatusCode::OK,
            Json(ParkResponse {
                spot_id: Some(spot_id.to_string()),
                error: None,
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(ParkResponse {
                spot_id: None,
                error: Some(err.to_string()),
            }),
        )
            .into_response(),
    }
}

/// `POST /unpark`
pub async fn unpark(
    State(state): State<AppState>,
    payload: Result<Json<UnparkRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_json(rejection),
    };

    let result = state.engine.unpark(&req.spot_id, &req.vehicle_number);
    state.metrics.observe("unpark", &result);

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(UnparkResponse {
                success: true,
                error: None,
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(UnparkResponse {
                success: false,
                error: Some(err.to_string()),
            }),
        )
            .into_response(),
    }
}

/// `GET /available?vehicleType=`
pub async fn available(
    State(state): State<AppState>,
    query: Result<Query<AvailableQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return invalid_query(rejection),
    };
    let vehicle_type = match required(query.vehicle_type, "vehicleType") {
        Ok(value) => value,
        Err(response) => return response,
    };

    let result = state.engine.get_available_spots(&vehicle_type);
    state.metrics.observe("available", &result);

    match result {
        Ok(spots) => (
            StatusCode::OK,
            Json(AvailableSpotsResponse {
                spots: Some(spots.iter().map(ToString::to_string).collect()),
                error: None,
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(AvailableSpotsResponse {
                spots: None,
                error: Some(err.to_string()),
            }),
        )
            .into_response(),
    }
}

/// `GET /search?vehicleNumber=`
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return invalid_query(rejection),
    };
    let vehicle_number = match required(query.vehicle_number, "vehicleNumber") {
        Ok(value) => value,
        Err(response) => return response,
    };

    let result = state.engine.search_vehicle(&vehicle_number);
    state.metrics.observe("search", &result);

    match result {
        Ok(location) => (
            StatusCode::OK,
            Json(SearchVehicleResponse {
                spot_id: Some(location.spot_id().to_string()),
                is_parked: location.is_parked(),
                was_parked: true,
                error: None,
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(SearchVehicleResponse {
                error: Some(err.to_string()),
                ..SearchVehicleResponse::default()
            }),
        )
            .into_response(),
    }
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "dimensions": state.engine.dimensions(),
            "occupancy": state.engine.occupancy(),
        })),
    )
}

/// The occupied gauge is sampled at scrape time, so it always reflects the
/// latest committed state.
pub async fn metrics(State(state): State<AppState>) -> Response {
    state.metrics.set_occupied(state.engine.occupied_count());
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            warn!(error = %err, "failed to encode metrics");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
