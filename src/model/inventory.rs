use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::constant::{MovementOpType, MovementSourceType};

/// quantity of one product on one shelf of one warehouse, optionally
/// batch / expiry tracked
#[derive(Debug, Clone)]
pub struct InventoryTargetIdentity {
    pub warehouse_id: u64,
    pub product_id: u64,
    pub shelf_id: u64,
    pub batch_number: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

/// movement fields recorded along with a quantity adjustment, the caller
/// provides them when the audit row must not diverge from the stock level
#[derive(Debug, Clone)]
pub struct InventoryMovementDraft {
    pub op_type: MovementOpType,
    pub source_id: u64,
    pub source_type: MovementSourceType,
    pub remark: Option<String>,
}

/// append-only movement record, `log_id` of zero marks a row which has
/// not been persisted yet
#[derive(Debug, Clone)]
pub struct InventoryLogModel {
    pub log_id: u64,
    pub target: InventoryTargetIdentity,
    pub qty_delta: Decimal,
    pub op_type: MovementOpType,
    pub source_id: u64,
    pub source_type: MovementSourceType,
    pub remark: Option<String>,
}

impl InventoryLogModel {
    pub fn from_draft(
        target: InventoryTargetIdentity,
        qty_delta: Decimal,
        draft: InventoryMovementDraft,
    ) -> Self {
        Self {
            log_id: 0,
            target,
            qty_delta,
            op_type: draft.op_type,
            source_id: draft.source_id,
            source_type: draft.source_type,
            remark: draft.remark,
        }
    }
}

/// inventory row joined with warehouse / product / shelf catalogs, the
/// shape returned to listing clients
#[derive(Debug, Clone)]
pub struct InventoryRecordModel {
    pub inventory_id: u64,
    pub warehouse_id: u64,
    pub warehouse_name: String,
    pub product_id: u64,
    pub product_name: String,
    pub product_code: String,
    pub shelf_id: u64,
    pub shelf_name: String,
    pub quantity: Decimal,
    pub batch_number: String,
    pub expiry: Option<DateTime<Utc>>,
}

/// optional conjunctive filters of the inventory listing
#[derive(Debug, Clone, Default)]
pub struct InventoryListFilter {
    pub warehouse_id: Option<u64>,
    pub product_id: Option<u64>,
    pub shelf_id: Option<u64>,
    pub batch_number: Option<String>,
}
