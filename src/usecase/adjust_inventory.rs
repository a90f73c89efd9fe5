use std::result::Result as DefaultResult;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{
    InventoryListFilter, InventoryLogModel, InventoryMovementDraft, InventoryRecordModel,
    InventoryTargetIdentity, PageWindow,
};
use crate::repository::{AbsInventoryRepo, InventoryAdjustOutcome};
use crate::AppAuthedClaim;

#[derive(Debug, PartialEq, Eq)]
pub enum InventoryAdjustUcOutput {
    Applied,
    Insufficient,
    InvalidWarehouseId,
    InvalidProductId,
    InvalidShelfId,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RecordMovementUcOutput {
    Recorded { log_id: u64 },
    InvalidWarehouseId,
    InvalidProductId,
    InvalidShelfId,
}

pub enum InventoryListUcOutput {
    Listed {
        total: i64,
        items: Vec<InventoryRecordModel>,
    },
}

enum BadLocationField {
    Warehouse,
    Product,
    Shelf,
}

fn check_location(target: &InventoryTargetIdentity) -> Option<BadLocationField> {
    if target.warehouse_id == 0 {
        Some(BadLocationField::Warehouse)
    } else if target.product_id == 0 {
        Some(BadLocationField::Product)
    } else if target.shelf_id == 0 {
        Some(BadLocationField::Shelf)
    } else {
        None
    }
}

pub struct AdjustInventoryUseCase {
    pub repo: Box<dyn AbsInventoryRepo>,
    pub authed_claim: AppAuthedClaim,
    pub logctx: Arc<AppLogContext>,
}

impl AdjustInventoryUseCase {
    pub async fn execute(
        self,
        target: InventoryTargetIdentity,
        qty_delta: Decimal,
        movement: Option<InventoryMovementDraft>,
    ) -> DefaultResult<InventoryAdjustUcOutput, AppError> {
        match check_location(&target) {
            Some(BadLocationField::Warehouse) => {
                return Ok(InventoryAdjustUcOutput::InvalidWarehouseId);
            }
            Some(BadLocationField::Product) => {
                return Ok(InventoryAdjustUcOutput::InvalidProductId);
            }
            Some(BadLocationField::Shelf) => {
                return Ok(InventoryAdjustUcOutput::InvalidShelfId);
            }
            None => {}
        }
        let (w_id, p_id, s_id) = (target.warehouse_id, target.product_id, target.shelf_id);
        let outcome = self.repo.adjust(target, qty_delta, movement).await?;
        let logctx = &self.logctx;
        match outcome {
            InventoryAdjustOutcome::Applied => {
                app_log_event!(
                    logctx,
                    AppLogLevel::INFO,
                    "op:adjust-inventory, warehouse:{}, product:{}, shelf:{}, delta:{}, user:{}",
                    w_id,
                    p_id,
                    s_id,
                    qty_delta,
                    self.authed_claim.profile
                );
                Ok(InventoryAdjustUcOutput::Applied)
            }
            InventoryAdjustOutcome::Insufficient => {
                app_log_event!(
                    logctx,
                    AppLogLevel::WARNING,
                    "op:adjust-inventory, insufficient stock, warehouse:{}, product:{}, \
                     shelf:{}, delta:{}, user:{}",
                    w_id,
                    p_id,
                    s_id,
                    qty_delta,
                    self.authed_claim.profile
                );
                Ok(InventoryAdjustUcOutput::Insufficient)
            }
        }
    } // end of fn execute
} // end of impl AdjustInventoryUseCase

pub struct RecordMovementUseCase {
    pub repo: Box<dyn AbsInventoryRepo>,
    pub authed_claim: AppAuthedClaim,
    pub logctx: Arc<AppLogContext>,
}

impl RecordMovementUseCase {
    pub async fn execute(
        self,
        item: InventoryLogModel,
    ) -> DefaultResult<RecordMovementUcOutput, AppError> {
        match check_location(&item.target) {
            Some(BadLocationField::Warehouse) => {
                return Ok(RecordMovementUcOutput::InvalidWarehouseId);
            }
            Some(BadLocationField::Product) => {
                return Ok(RecordMovementUcOutput::InvalidProductId);
            }
            Some(BadLocationField::Shelf) => {
                return Ok(RecordMovementUcOutput::InvalidShelfId);
            }
            None => {}
        }
        let op_typ: u8 = item.op_type.clone().into();
        let log_id = self.repo.insert_log(item).await?;
        let logctx = &self.logctx;
        app_log_event!(
            logctx,
            AppLogLevel::INFO,
            "op:record-inventory-movement, log:{}, type:{}, user:{}",
            log_id,
            op_typ,
            self.authed_claim.profile
        );
        Ok(RecordMovementUcOutput::Recorded { log_id })
    } // end of fn execute
} // end of impl RecordMovementUseCase

pub struct ListInventoryUseCase {
    pub repo: Box<dyn AbsInventoryRepo>,
    pub logctx: Arc<AppLogContext>,
}

impl ListInventoryUseCase {
    pub async fn execute(
        self,
        filter: InventoryListFilter,
        page: PageWindow,
    ) -> DefaultResult<InventoryListUcOutput, AppError> {
        let (items, total) = self.repo.fetch_paged(filter, page).await?;
        Ok(InventoryListUcOutput::Listed { total, items })
    }
}
