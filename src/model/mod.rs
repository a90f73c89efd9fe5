mod inventory;
mod order_detail;

pub use inventory::{
    InventoryListFilter, InventoryLogModel, InventoryMovementDraft, InventoryRecordModel,
    InventoryTargetIdentity,
};
pub use order_detail::{OrderDetailModel, OrderDetailReadModel};

use crate::constant::limit;

/// 1-based page window requested by a web client, out-of-range values
/// fall back to sane defaults instead of erroring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub index: u32,
    pub size: u32,
}

impl PageWindow {
    pub fn new(index: Option<u32>, size: Option<u32>) -> Self {
        let index = index.unwrap_or(1).max(1);
        let size = size
            .unwrap_or(limit::DEFAULT_PAGE_SIZE)
            .clamp(1, limit::MAX_PAGE_SIZE);
        Self { index, size }
    }
    pub fn limit(&self) -> u64 {
        self.size as u64
    }
    pub fn offset(&self) -> u64 {
        (self.index as u64 - 1) * (self.size as u64)
    }
}
