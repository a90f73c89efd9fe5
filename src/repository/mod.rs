use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::constant::OrderStatus;
use crate::error::{AppError, AppErrorCode};
use crate::model::{
    InventoryListFilter, InventoryLogModel, InventoryMovementDraft, InventoryRecordModel,
    InventoryTargetIdentity, OrderDetailModel, OrderDetailReadModel, PageWindow,
};
use crate::AppDataStoreContext;

mod mariadb;

use mariadb::inventory::InventoryMariaDbRepo;
use mariadb::order_detail::OrderDetailMariaDbRepo;

/// outcome of an atomic quantity adjustment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryAdjustOutcome {
    Applied,
    /// the record is missing or holds less than the requested decrement
    Insufficient,
}

// the repository instance may be used across an await,
// the future created by app callers has to be able to pass to different threads
// , it is the reason to add `Send` and `Sync` as super-traits
#[async_trait]
pub trait AbsOrderDetailRepo: Sync + Send {
    async fn fetch_order_status(&self, order_id: u64)
        -> DefaultResult<Option<OrderStatus>, AppError>;

    /// resolve the parent order of one detail row, `None` when the detail
    /// does not exist
    async fn fetch_order_id_of_detail(
        &self,
        detail_id: u64,
    ) -> DefaultResult<Option<u64>, AppError>;

    /// insert or update one detail row, return its id
    async fn save(&self, detail: OrderDetailModel) -> DefaultResult<u64, AppError>;

    /// return number of rows deleted
    async fn delete(&self, detail_id: u64) -> DefaultResult<u64, AppError>;

    async fn fetch_paged(
        &self,
        order_id: u64,
        page: PageWindow,
    ) -> DefaultResult<(Vec<OrderDetailReadModel>, i64), AppError>;
} // end of trait AbsOrderDetailRepo

#[async_trait]
pub trait AbsInventoryRepo: Sync + Send {
    /// apply the quantity delta, optionally writing the movement row in
    /// the same transaction
    async fn adjust(
        &self,
        target: InventoryTargetIdentity,
        qty_delta: Decimal,
        movement: Option<InventoryMovementDraft>,
    ) -> DefaultResult<InventoryAdjustOutcome, AppError>;

    /// append one movement row, return its id
    async fn insert_log(&self, item: InventoryLogModel) -> DefaultResult<u64, AppError>;

    async fn fetch_paged(
        &self,
        filter: InventoryListFilter,
        page: PageWindow,
    ) -> DefaultResult<(Vec<InventoryRecordModel>, i64), AppError>;
} // end of trait AbsInventoryRepo

pub fn app_repo_order_detail(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsOrderDetailRepo>, AppError> {
    if let Some(dbs) = ds.sql_dbs.as_ref() {
        let obj = OrderDetailMariaDbRepo::try_build(dbs)?;
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("mariadb".to_string()),
        })
    }
}

pub fn app_repo_inventory(
    ds: Arc<AppDataStoreContext>,
) -> DefaultResult<Box<dyn AbsInventoryRepo>, AppError> {
    if let Some(dbs) = ds.sql_dbs.as_ref() {
        let obj = InventoryMariaDbRepo::try_build(dbs)?;
        Ok(Box::new(obj))
    } else {
        Err(AppError {
            code: AppErrorCode::MissingDataStore,
            detail: Some("mariadb".to_string()),
        })
    }
}
