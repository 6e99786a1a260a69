//! HTTP surface for fund transfers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::error::TransferError;
use super::orchestrator::FundTransferOrchestrator;
use super::types::{ErrorResponse, FundTransferDto, FundTransferRequest, FundTransferResponse};

/// Shared handler state.
pub struct AppState {
    pub orchestrator: Arc<FundTransferOrchestrator>,
}

/// Build the service router.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/fund-transfers",
            post(create_fund_transfer).get(list_fund_transfers),
        )
        .route("/fund-transfers/{reference}", get(get_fund_transfer))
        .route("/health", get(health))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl IntoResponse for TransferError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error_code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// POST /fund-transfers - execute a fund transfer
#[utoipa::path(
    post,
    path = "/fund-transfers",
    request_body = FundTransferRequest,
    responses(
        (status = 201, description = "Transfer committed", body = FundTransferResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Source or destination account not found", body = ErrorResponse),
        (status = 422, description = "Business rule rejected the transfer", body = ErrorResponse),
        (status = 503, description = "A collaborator service is unavailable", body = ErrorResponse)
    ),
    tag = "fund-transfers"
)]
pub async fn create_fund_transfer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FundTransferRequest>,
) -> Result<(StatusCode, Json<FundTransferResponse>), TransferError> {
    let response = state.orchestrator.transfer(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /fund-transfers/{reference} - transfer details by reference
#[utoipa::path(
    get,
    path = "/fund-transfers/{reference}",
    params(("reference" = String, Path, description = "Transaction reference")),
    responses(
        (status = 200, description = "Transfer details", body = FundTransferDto),
        (status = 404, description = "No transfer with this reference", body = ErrorResponse)
    ),
    tag = "fund-transfers"
)]
pub async fn get_fund_transfer(
    State(state): State<Arc<AppState>>,
    Path(reference): Path<String>,
) -> Result<Json<FundTransferDto>, TransferError> {
    let record = state.orchestrator.get_by_reference(&reference).await?;
    Ok(Json(record.into()))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListTransfersParams {
    /// Source account number.
    pub account_id: String,
}

/// GET /fund-transfers?accountId= - transfers debiting an account
#[utoipa::path(
    get,
    path = "/fund-transfers",
    params(ListTransfersParams),
    responses(
        (status = 200, description = "Transfers debiting the account (possibly empty)", body = [FundTransferDto])
    ),
    tag = "fund-transfers"
)]
pub async fn list_fund_transfers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTransfersParams>,
) -> Result<Json<Vec<FundTransferDto>>, TransferError> {
    let records = state
        .orchestrator
        .list_by_source_account(&params.account_id)
        .await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// GET /health - liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "UP" }))
}
