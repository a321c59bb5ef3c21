//! HTTP handlers for the upload and analytics endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use shared::{csv, partition, query, Error, FetchRequest, Level, Symbol};
use tracing::error;

use crate::state::AppState;
use crate::{athena, binance, store};

/// Wraps the service error so it can carry an HTTP status. Validation
/// problems are the caller's fault; failures of the external seams map to
/// bad gateway.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) | Error::UnsupportedInterval(_) => StatusCode::BAD_REQUEST,
            Error::Fetch(_) | Error::Upload(_) | Error::Query(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
            error!("request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /data`: fetch klines, encode as CSV, upload under the derived
/// partition key, and return the object address.
pub async fn upload_data(
    State(state): State<AppState>,
    Json(request): Json<FetchRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;

    let candles = binance::fetch_klines(&state.http, &state.config.binance_base_url, &request).await?;
    let body = csv::to_csv(&candles)?;
    let key = partition::derive(request.interval, request.time).object_key(request.symbol);
    let location = store::upload_csv(&state.s3, &state.config.bucket, &key, body).await?;

    Ok(Json(json!({ "location": location })))
}

#[derive(Debug, Deserialize)]
pub struct SymbolQuery {
    pub symbol: Symbol,
}

pub async fn highest_price(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(params): Query<SymbolQuery>,
) -> Result<Json<Vec<Vec<String>>>, ApiError> {
    let level: Level = level.parse()?;
    let rows = athena::run_query(
        &state.athena,
        &state.config,
        query::highest_price(level, params.symbol),
    )
    .await?;
    Ok(Json(rows))
}

pub async fn top_volume(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(params): Query<SymbolQuery>,
) -> Result<Json<Vec<Vec<String>>>, ApiError> {
    let level: Level = level.parse()?;
    let rows = athena::run_query(
        &state.athena,
        &state.config,
        query::top_volume(level, params.symbol),
    )
    .await?;
    Ok(Json(rows))
}

pub async fn top_volatility(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(params): Query<SymbolQuery>,
) -> Result<Json<Vec<Vec<String>>>, ApiError> {
    let level: Level = level.parse()?;
    let rows = athena::run_query(
        &state.athena,
        &state.config,
        query::top_volatility(level, params.symbol),
    )
    .await?;
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        let response = ApiError(Error::Validation("limit".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            ApiError(Error::UnsupportedInterval("5m".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_external_failures_are_bad_gateway() {
        for err in [
            Error::Fetch("down".to_string()),
            Error::Upload("denied".to_string()),
            Error::Query("timeout".to_string()),
        ] {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        }
    }
}
