mod adjust_inventory;
mod edit_order_detail;

use std::result::Result as DefaultResult;

use async_trait::async_trait;
use rust_decimal::Decimal;

use warehouse::constant::OrderStatus;
use warehouse::error::AppError;
use warehouse::model::{
    InventoryListFilter, InventoryLogModel, InventoryMovementDraft, InventoryRecordModel,
    InventoryTargetIdentity, OrderDetailModel, OrderDetailReadModel, PageWindow,
};
use warehouse::repository::{AbsInventoryRepo, AbsOrderDetailRepo, InventoryAdjustOutcome};
use warehouse::AppAuthedClaim;

pub(crate) fn ut_authed_claim() -> AppAuthedClaim {
    AppAuthedClaim {
        profile: 188,
        login_name: Some("shelf-keeper-01".to_string()),
        client_addr: Some("203.0.113.7".to_string()),
    }
}

pub(crate) struct MockOrderDetailRepo {
    pub order_status_res: DefaultResult<Option<OrderStatus>, AppError>,
    pub parent_order_res: DefaultResult<Option<u64>, AppError>,
    pub save_res: DefaultResult<u64, AppError>,
    pub delete_res: DefaultResult<u64, AppError>,
    pub paged_res: DefaultResult<(Vec<OrderDetailReadModel>, i64), AppError>,
}

impl MockOrderDetailRepo {
    pub(crate) fn build_default() -> Self {
        Self {
            order_status_res: Ok(Some(OrderStatus::Draft)),
            parent_order_res: Ok(Some(29)),
            save_res: Ok(94),
            delete_res: Ok(1),
            paged_res: Ok((Vec::new(), 0)),
        }
    }
}

#[async_trait]
impl AbsOrderDetailRepo for MockOrderDetailRepo {
    async fn fetch_order_status(
        &self,
        _order_id: u64,
    ) -> DefaultResult<Option<OrderStatus>, AppError> {
        self.order_status_res.clone()
    }
    async fn fetch_order_id_of_detail(
        &self,
        _detail_id: u64,
    ) -> DefaultResult<Option<u64>, AppError> {
        self.parent_order_res.clone()
    }
    async fn save(&self, _detail: OrderDetailModel) -> DefaultResult<u64, AppError> {
        self.save_res.clone()
    }
    async fn delete(&self, _detail_id: u64) -> DefaultResult<u64, AppError> {
        self.delete_res.clone()
    }
    async fn fetch_paged(
        &self,
        _order_id: u64,
        _page: PageWindow,
    ) -> DefaultResult<(Vec<OrderDetailReadModel>, i64), AppError> {
        self.paged_res.clone()
    }
} // end of impl AbsOrderDetailRepo for MockOrderDetailRepo

pub(crate) struct MockInventoryRepo {
    pub adjust_res: DefaultResult<InventoryAdjustOutcome, AppError>,
    pub insert_log_res: DefaultResult<u64, AppError>,
    pub paged_res: DefaultResult<(Vec<InventoryRecordModel>, i64), AppError>,
}

impl MockInventoryRepo {
    pub(crate) fn build_default() -> Self {
        Self {
            adjust_res: Ok(InventoryAdjustOutcome::Applied),
            insert_log_res: Ok(501),
            paged_res: Ok((Vec::new(), 0)),
        }
    }
}

#[async_trait]
impl AbsInventoryRepo for MockInventoryRepo {
    async fn adjust(
        &self,
        _target: InventoryTargetIdentity,
        _qty_delta: Decimal,
        _movement: Option<InventoryMovementDraft>,
    ) -> DefaultResult<InventoryAdjustOutcome, AppError> {
        self.adjust_res.clone()
    }
    async fn insert_log(&self, _item: InventoryLogModel) -> DefaultResult<u64, AppError> {
        self.insert_log_res.clone()
    }
    async fn fetch_paged(
        &self,
        _filter: InventoryListFilter,
        _page: PageWindow,
    ) -> DefaultResult<(Vec<InventoryRecordModel>, i64), AppError> {
        self.paged_res.clone()
    }
} // end of impl AbsInventoryRepo for MockInventoryRepo
