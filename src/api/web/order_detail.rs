use axum::debug_handler;
use axum::extract::{
    Json as ExtractJson, Path as ExtractPath, Query as ExtractQuery, State as ExtractState,
};
use axum::http::StatusCode as HttpStatusCode;
use axum::response::IntoResponse;

use crate::api::web::dto::{
    OrderDetailRowDto, OrderDetailSaveReqDto, OrderDetailSaveRespDto, PageQueryDto, PagedRespDto,
    SimpleRespDto,
};
use crate::api::web::{json_content_type, render};
use crate::logging::{app_log_event, AppLogLevel};
use crate::model::{OrderDetailModel, PageWindow};
use crate::repository::app_repo_order_detail;
use crate::usecase::{
    DeleteOrderDetailUseCase, ListOrderDetailUseCase, OrderDetailDeleteUcOutput,
    OrderDetailListUcOutput, OrderDetailSaveUcOutput, SaveOrderDetailUseCase,
};
use crate::{AppAuthedClaim, AppSharedState};

// always to specify state type explicitly to the debug macro
#[debug_handler(state = AppSharedState)]
pub(super) async fn save_handler(
    authed: AppAuthedClaim,
    ExtractState(_appstate): ExtractState<AppSharedState>,
    ExtractJson(req_body): ExtractJson<OrderDetailSaveReqDto>,
) -> impl IntoResponse {
    let log_ctx = _appstate.log_context().clone();
    let (usr_id, client_addr) = (authed.profile, authed.client_addr.clone());
    let (status, resp_body) = match app_repo_order_detail(_appstate.datastore()) {
        Ok(repo) => {
            let uc = SaveOrderDetailUseCase {
                repo,
                authed_claim: authed,
                logctx: log_ctx.clone(),
            };
            let data = OrderDetailModel {
                detail_id: req_body.detail_id.unwrap_or(0),
                order_id: req_body.order_id,
                product_id: req_body.product_id,
                quantity: req_body.quantity,
                unit_price: req_body.unit_price,
                batch_number: req_body.batch_number,
                expiry: req_body.expiry,
                remark: req_body.remark,
            };
            match uc.execute(data).await {
                Ok(output) => {
                    let (code, success, message, detail_id) = match output {
                        OrderDetailSaveUcOutput::Saved { detail_id } => (
                            HttpStatusCode::OK,
                            true,
                            "saved outbound order detail",
                            detail_id,
                        ),
                        OrderDetailSaveUcOutput::InvalidOrderId => (
                            HttpStatusCode::BAD_REQUEST,
                            false,
                            "invalid outbound-order id",
                            0,
                        ),
                        OrderDetailSaveUcOutput::InvalidProductId => {
                            (HttpStatusCode::BAD_REQUEST, false, "invalid product id", 0)
                        }
                        OrderDetailSaveUcOutput::NonPositiveQuantity => (
                            HttpStatusCode::BAD_REQUEST,
                            false,
                            "quantity must be greater than zero",
                            0,
                        ),
                        OrderDetailSaveUcOutput::OrderApproved => (
                            HttpStatusCode::CONFLICT,
                            false,
                            "order already approved, detail cannot be modified",
                            0,
                        ),
                    };
                    let resp = OrderDetailSaveRespDto {
                        success,
                        message: message.to_string(),
                        detail_id,
                    };
                    render(code, &resp)
                }
                Err(e) => {
                    app_log_event!(
                        log_ctx,
                        AppLogLevel::ERROR,
                        "save outbound detail failure, user:{}, addr:{:?}, reason:{}",
                        usr_id,
                        client_addr,
                        e
                    );
                    let resp = OrderDetailSaveRespDto {
                        success: false,
                        message: format!("failed to save outbound order detail: {}", e),
                        detail_id: 0,
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
} // end of fn save_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn delete_handler(
    ExtractPath(detail_id): ExtractPath<u64>,
    authed: AppAuthedClaim,
    ExtractState(_appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = _appstate.log_context().clone();
    let (usr_id, client_addr) = (authed.profile, authed.client_addr.clone());
    let (status, resp_body) = match app_repo_order_detail(_appstate.datastore()) {
        Ok(repo) => {
            let uc = DeleteOrderDetailUseCase {
                repo,
                authed_claim: authed,
                logctx: log_ctx.clone(),
            };
            match uc.execute(detail_id).await {
                Ok(output) => {
                    let (code, success, message) = match output {
                        OrderDetailDeleteUcOutput::Deleted => {
                            (HttpStatusCode::OK, true, "deleted")
                        }
                        OrderDetailDeleteUcOutput::InvalidDetailId => {
                            (HttpStatusCode::BAD_REQUEST, false, "invalid detail id")
                        }
                        OrderDetailDeleteUcOutput::DetailNotFound => (
                            HttpStatusCode::NOT_FOUND,
                            false,
                            "detail record not found",
                        ),
                        OrderDetailDeleteUcOutput::OrderApproved => (
                            HttpStatusCode::CONFLICT,
                            false,
                            "order already approved, detail cannot be deleted",
                        ),
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
                        "delete outbound detail failure, detail:{}, user:{}, addr:{:?}, reason:{}",
                        detail_id,
                        usr_id,
                        client_addr,
                        e
                    );
                    let resp = SimpleRespDto {
                        success: false,
                        message: format!("failed to delete outbound order detail: {}", e),
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
} // end of fn delete_handler

#[debug_handler(state = AppSharedState)]
pub(super) async fn list_handler(
    ExtractPath(order_id): ExtractPath<u64>,
    ExtractQuery(page_req): ExtractQuery<PageQueryDto>,
    authed: AppAuthedClaim,
    ExtractState(_appstate): ExtractState<AppSharedState>,
) -> impl IntoResponse {
    let log_ctx = _appstate.log_context().clone();
    let usr_id = authed.profile;
    let (status, resp_body) = match app_repo_order_detail(_appstate.datastore()) {
        Ok(repo) => {
            let uc = ListOrderDetailUseCase {
                repo,
                logctx: log_ctx.clone(),
            };
            let page = PageWindow::new(page_req.page_index, page_req.page_size);
            match uc.execute(order_id, page).await {
                Ok(OrderDetailListUcOutput::Listed { total, items }) => {
                    let resp = PagedRespDto::<OrderDetailRowDto> {
                        success: true,
                        message: "query succeeded".to_string(),
                        total,
                        data: items.into_iter().map(OrderDetailRowDto::from).collect(),
                    };
                    render(HttpStatusCode::OK, &resp)
                }
                Ok(OrderDetailListUcOutput::InvalidOrderId) => {
                    let resp = PagedRespDto::<OrderDetailRowDto> {
                        success: false,
                        message: "invalid outbound-order id".to_string(),
                        total: 0,
                        data: Vec::new(),
                    };
                    render(HttpStatusCode::BAD_REQUEST, &resp)
                }
                Err(e) => {
                    app_log_event!(
                        log_ctx,
                        AppLogLevel::ERROR,
                        "list outbound details failure, order:{}, user:{}, reason:{}",
                        order_id,
                        usr_id,
                        e
                    );
                    let resp = PagedRespDto::<OrderDetailRowDto> {
                        success: false,
                        message: format!("failed to query outbound order details: {}", e),
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
