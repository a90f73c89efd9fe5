use std::result::Result as DefaultResult;
use std::sync::Arc;

use crate::constant::OrderStatus;
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{OrderDetailModel, OrderDetailReadModel, PageWindow};
use crate::repository::AbsOrderDetailRepo;
use crate::AppAuthedClaim;

#[derive(Debug, PartialEq, Eq)]
pub enum OrderDetailSaveUcOutput {
    Saved { detail_id: u64 },
    InvalidOrderId,
    InvalidProductId,
    NonPositiveQuantity,
    OrderApproved,
}

#[derive(Debug, PartialEq, Eq)]
pub enum OrderDetailDeleteUcOutput {
    Deleted,
    InvalidDetailId,
    DetailNotFound,
    OrderApproved,
}

pub enum OrderDetailListUcOutput {
    Listed {
        total: i64,
        items: Vec<OrderDetailReadModel>,
    },
    InvalidOrderId,
}

pub struct SaveOrderDetailUseCase {
    pub repo: Box<dyn AbsOrderDetailRepo>,
    pub authed_claim: AppAuthedClaim,
    pub logctx: Arc<AppLogContext>,
}

impl SaveOrderDetailUseCase {
    pub async fn execute(
        self,
        data: OrderDetailModel,
    ) -> DefaultResult<OrderDetailSaveUcOutput, AppError> {
        if data.order_id == 0 {
            return Ok(OrderDetailSaveUcOutput::InvalidOrderId);
        }
        if data.product_id == 0 {
            return Ok(OrderDetailSaveUcOutput::InvalidProductId);
        }
        if !data.quantity_positive() {
            return Ok(OrderDetailSaveUcOutput::NonPositiveQuantity);
        }
        // an order without the status row is treated as not approved yet,
        // the write path reports remaining integrity errors on its own
        let status = self.repo.fetch_order_status(data.order_id).await?;
        if matches!(status, Some(OrderStatus::Approved)) {
            return Ok(OrderDetailSaveUcOutput::OrderApproved);
        }
        let (order_id, is_create) = (data.order_id, data.is_create());
        let detail_id = self.repo.save(data).await?;
        let logctx = &self.logctx;
        app_log_event!(
            logctx,
            AppLogLevel::INFO,
            "op:save-outbound-detail, create:{}, order:{}, detail:{}, user:{}",
            is_create,
            order_id,
            detail_id,
            self.authed_claim.profile
        );
        Ok(OrderDetailSaveUcOutput::Saved { detail_id })
    } // end of fn execute
} // end of impl SaveOrderDetailUseCase

pub struct DeleteOrderDetailUseCase {
    pub repo: Box<dyn AbsOrderDetailRepo>,
    pub authed_claim: AppAuthedClaim,
    pub logctx: Arc<AppLogContext>,
}

impl DeleteOrderDetailUseCase {
    pub async fn execute(
        self,
        detail_id: u64,
    ) -> DefaultResult<OrderDetailDeleteUcOutput, AppError> {
        if detail_id == 0 {
            return Ok(OrderDetailDeleteUcOutput::InvalidDetailId);
        }
        let maybe_order_id = self.repo.fetch_order_id_of_detail(detail_id).await?;
        let order_id = match maybe_order_id {
            Some(v) => v,
            None => {
                return Ok(OrderDetailDeleteUcOutput::DetailNotFound);
            }
        };
        let status = self.repo.fetch_order_status(order_id).await?;
        if matches!(status, Some(OrderStatus::Approved)) {
            return Ok(OrderDetailDeleteUcOutput::OrderApproved);
        }
        let num_deleted = self.repo.delete(detail_id).await?;
        if num_deleted == 0 {
            // the row disappeared between the lookup and the delete
            Ok(OrderDetailDeleteUcOutput::DetailNotFound)
        } else {
            let logctx = &self.logctx;
            app_log_event!(
                logctx,
                AppLogLevel::INFO,
                "op:delete-outbound-detail, order:{}, detail:{}, user:{}",
                order_id,
                detail_id,
                self.authed_claim.profile
            );
            Ok(OrderDetailDeleteUcOutput::Deleted)
        }
    } // end of fn execute
} // end of impl DeleteOrderDetailUseCase

pub struct ListOrderDetailUseCase {
    pub repo: Box<dyn AbsOrderDetailRepo>,
    pub logctx: Arc<AppLogContext>,
}

impl ListOrderDetailUseCase {
    pub async fn execute(
        self,
        order_id: u64,
        page: PageWindow,
    ) -> DefaultResult<OrderDetailListUcOutput, AppError> {
        if order_id == 0 {
            return Ok(OrderDetailListUcOutput::InvalidOrderId);
        }
        let (items, total) = self.repo.fetch_paged(order_id, page).await?;
        Ok(OrderDetailListUcOutput::Listed { total, items })
    }
}
