use axum::debug_handler;
use axum::extract::{Json as ExtractJson, Query as ExtractQuery, State as ExtractState};
use axum::http::StatusCode as HttpStatusCode;
use axum::response::IntoResponse;

use crate::api::web::dto::{
    InventoryAdjustReqDto, InventoryListQueryDto, InventoryLogReqDto, InventoryLogRespDto,
    InventoryRowDto, PagedRespDto, SimpleRespDto,
};
use crate::api::web::{json_content_type, render};
use crate::constant::{MovementOpType, MovementSourceType};
use crate::logging::{app_log_event, AppLogLevel};
use crate::model::{
    InventoryListFilter, InventoryLogModel, InventoryMovementDraft, InventoryTargetIdentity,
    PageWindow,
};
use crate::repository::app_repo_inventory;
use crate::usecase::{
    AdjustInventoryUseCase, InventoryAdjustUcOutput, InventoryListUcOutput, ListInventoryUseCase,
    RecordMovementUcOutput, RecordMovementUseCase,
};
use crate::{AppAuthedClaim, AppSharedState};

#[debug_handler(state = AppSharedState)]
pub(super) async fn adjust_handler(
    authed: AppAuthedClaim,
    ExtractState(_appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<InventoryAdjustReqDto>,
) -> impl IntoResponse {
    let log_ctx = _appstate.log_context().clone();
    let (usr_id, client_addr) = (authed.profile, authed.client_addr.clone());
    let (status, resp_body) = match app_repo_inventory(_appstate.datastore()) {
        Ok(repo) => {
            let uc = AdjustInventoryUseCase {
                repo,
                authed_claim: authed,
                logctx: log_ctx.clone(),
            };
            let target = InventoryTargetIdentity {
                warehouse_id: req_body.warehouse_id,
                product_id: req_body.product_id,
                shelf_id: req_body.shelf_id,
                batch_number: req_body.batch_number,
                expiry: req_body.expiry,
            };
            let movement = req_body.movement.map(|m| InventoryMovementDraft {
                op_type: MovementOpType::from(m.op_type),
                source_id: m.source_id,
                source_type: MovementSourceType::from(m.source_type),
                remark: m.remark,
            });
            match uc.execute(target, req_body.qty_delta, movement).await {
                Ok(output) => {
                    let (code, success, message) = match output {
                        InventoryAdjustUcOutput::Applied => {
                            (HttpStatusCode::OK, true, "inventory updated")
                        }
                        InventoryAdjustUcOutput::Insufficient => (
                            HttpStatusCode::CONFLICT,
                            false,
                            "insufficient stock, cannot decrease",
                        ),
                        InventoryAdjustUcOutput::InvalidWarehouseId => {
                            (HttpStatusCode::BAD_REQUEST, false, "invalid warehouse id")
                        }
                        InventoryAdjustUcOutput::InvalidProductId => {
                            (HttpStatusCode::BAD_REQUEST, false, "invalid product id")
                        }
                        InventoryAdjustUcOutput::InvalidShelfId => {
                            (HttpStatusCode::BAD_REQUEST, false, "invalid shelf id")
                        }
                    };
                    let resp = SimpleRespDto {
                        success,
                        message: message.to_string(),
                    };
                    render(code, &resp)
                }
                Err(e) => {
                    app_log_event!(
                        log_ctx,
                        AppLogLevel::ERROR,
                        "inventory adjust failure, user:{}, addr:{:?}, reason:{}",
                        usr_id,
                        client_addr,
                        e
                    );
                    let resp = SimpleRespDto {
                        success: false,
                        message: format!("failed to update inventory: {}", e),
                    };
                    render(HttpStatusCode::INTERNAL_SERVER_ERROR, &resp)
                }
            }
        }
        Err(e) => {
            app_log_event!(
                log_ctx,
                AppLogLevel::ERROR,
                "repository init failure, user:{}, reason:{}",
                usr_id,
                e
            );
            (
                HttpStatusCode::INTERNAL_SERVER_ERROR,
                r#"{"reason":"internal-error"}"#.to_string(),
            )
        }
    };
    (status, json_content_type(), resp_body)
} // end of fn adjust_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn record_movement_handler(
    authed: AppAuthedClaim,
    ExtractState(_appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<InventoryLogReqDto>,
) -> impl IntoResponse {
    let log_ctx = _appstate.log_context().clone();
    let (usr_id, client_addr) = (authed.profile, authed.client_addr.clone());
    let (status, resp_body) = match app_repo_inventory(_appstate.datastore()) {
        Ok(repo) => {
            let uc = RecordMovementUseCase {
                repo,
                authed_claim: authed,
                logctx: log_ctx.clone(),
            };
            let item = InventoryLogModel {
                log_id: 0,
                target: InventoryTargetIdentity {
                    warehouse_id: req_body.warehouse_id,
                    product_id: req_body.product_id,
                    shelf_id: req_body.shelf_id,
                    batch_number: req_body.batch_number,
                    expiry: req_body.expiry,
                },
                qty_delta: req_body.qty_delta,
                op_type: MovementOpType::from(req_body.op_type),
                source_id: req_body.source_id,
                source_type: MovementSourceType::from(req_body.source_type),
                remark: req_body.remark,
            };
            match uc.execute(item).await {
                Ok(output) => {
                    let (code, success, message, log_id) = match output {
                        RecordMovementUcOutput::Recorded { log_id } => (
                            HttpStatusCode::CREATED,
                            true,
                            "inventory movement recorded",
                            log_id,
                        ),
                        RecordMovementUcOutput::InvalidWarehouseId => (
                            HttpStatusCode::BAD_REQUEST,
                            false,
                            "invalid warehouse id",
                            0,
                        ),
                        RecordMovementUcOutput::InvalidProductId => {
                            (HttpStatusCode::BAD_REQUEST, false, "invalid product id", 0)
                        }
                        RecordMovementUcOutput::InvalidShelfId => {
                            (HttpStatusCode::BAD_REQUEST, false, "invalid shelf id", 0)
                        }
                    };
                    let resp = InventoryLogRespDto {
                        success,
                        message: message.to_string(),
                        log_id,
                    };
                    render(code, &resp)
                }
                Err(e) => {
                    app_log_event!(
                        log_ctx,
                        AppLogLevel::ERROR,
                        "record inventory movement failure, user:{}, addr:{:?}, reason:{}",
                        usr_id,
                        client_addr,
                        e
                    );
                    let resp = InventoryLogRespDto {
                        success: false,
                        message: format!("failed to record inventory movement: {}", e),
                        log_id: 0,
                    };
                    render(HttpStatusCode::INTERNAL_SERVER_ERROR, &resp)
                }
            }
        }
        Err(e) => {
            app_log_event!(
                log_ctx,
                AppLogLevel::ERROR,
                "repository init failure, user:{}, reason:{}",
                usr_id,
                e
            );
            (
                HttpStatusCode::INTERNAL_SERVER_ERROR,
                r#"{"reason":"internal-error"}"#.to_string(),
            )
        }
    };
    (status, json_content_type(), resp_body)
} // end of fn record_movement_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn list_handler(
    ExtractQuery(list_req): ExtractQuery<InventoryListQueryDto>,
    authed: AppAuthedClaim,
    ExtractState(_appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = _appstate.log_context().clone();
    let usr_id = authed.profile;
    let (status, resp_body) = match app_repo_inventory(_appstate.datastore()) {
        Ok(repo) => {
            let uc = ListInventoryUseCase {
                repo,
                logctx: log_ctx.clone(),
            };
            // zero means the filter is not applied, same convention as the
            // legacy clients of this API
            let filter = InventoryListFilter {
                warehouse_id: list_req.warehouse_id.filter(|v| *v > 0),
                product_id: list_req.product_id.filter(|v| *v > 0),
                shelf_id: list_req.shelf_id.filter(|v| *v > 0),
                batch_number: list_req.batch_number.filter(|v| !v.is_empty()),
            };
            let page = PageWindow::new(list_req.page_index, list_req.page_size);
            match uc.execute(filter, page).await {
                Ok(InventoryListUcOutput::Listed { total, items }) => {
                    let resp = PagedRespDto::<InventoryRowDto> {
                        success: true,
                        message: "query succeeded".to_string(),
                        total,
                        data: items.into_iter().map(InventoryRowDto::from).collect(),
                    };
                    render(HttpStatusCode::OK, &resp)
                }
                Err(e) => {
                    app_log_event!(
                        log_ctx,
                        AppLogLevel::ERROR,
                        "list inventory failure, user:{}, reason:{}",
                        usr_id,
                        e
                    );
                    let resp = PagedRespDto::<InventoryRowDto> {
                        success: false,
                        message: format!("failed to query inventory: {}", e),
                        total: 0,
                        data: Vec::new(),
                    };
                    render(HttpStatusCode::INTERNAL_SERVER_ERROR, &resp)
                }
            }
        }
        Err(e) => {
            app_log_event!(
                log_ctx,
                AppLogLevel::ERROR,
                "repository init failure, user:{}, reason:{}",
                usr_id,
                e
            );
            (
                HttpStatusCode::INTERNAL_SERVER_ERROR,
                r#"{"reason":"internal-error"}"#.to_string(),
            )
        }
    };
    (status, json_content_type(), resp_body)
} // end of fn list_handler
