//! OpenAPI document for the fund transfer surface.

use utoipa::OpenApi;

use crate::transfer::api;
use crate::transfer::types::{
    ErrorResponse, FundTransferDto, FundTransferRequest, FundTransferResponse,
};
use crate::transfer::{TransferStatus, TransferType};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fundflow Fund Transfer API",
        description = "Orchestrates fund movements between accounts and records the resulting ledger entries"
    ),
    paths(
        api::create_fund_transfer,
        api::get_fund_transfer,
        api::list_fund_transfers,
        api::health,
    ),
    components(schemas(
        FundTransferRequest,
        FundTransferResponse,
        FundTransferDto,
        ErrorResponse,
        TransferStatus,
        TransferType,
    )),
    tags(
        (name = "fund-transfers", description = "Fund transfer orchestration"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
