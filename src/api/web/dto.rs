use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{InventoryRecordModel, OrderDetailReadModel};

#[derive(Deserialize)]
pub struct OrderDetailSaveReqDto {
    /// absent or zero means a new line item
    pub detail_id: Option<u64>,
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub batch_number: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub remark: Option<String>,
}

#[derive(Serialize)]
pub struct OrderDetailSaveRespDto {
    pub success: bool,
    pub message: String,
    pub detail_id: u64,
}

/// envelope of operations which only report success or failure
#[derive(Serialize)]
pub struct SimpleRespDto {
    pub success: bool,
    pub message: String,
}

#[derive(Deserialize)]
pub struct PageQueryDto {
    pub page_index: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Serialize)]
pub struct PagedRespDto<T> {
    pub success: bool,
    pub message: String,
    pub total: i64,
    pub data: Vec<T>,
}

#[derive(Serialize)]
pub struct OrderDetailRowDto {
    pub detail_id: u64,
    pub order_id: u64,
    pub product_id: u64,
    pub product_name: String,
    pub product_code: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub batch_number: String,
    pub expiry: Option<DateTime<Utc>>,
    pub remark: String,
}

impl From<OrderDetailReadModel> for OrderDetailRowDto {
    fn from(value: OrderDetailReadModel) -> Self {
        Self {
            detail_id: value.detail_id,
            order_id: value.order_id,
            product_id: value.product_id,
            product_name: value.product_name,
            product_code: value.product_code,
            quantity: value.quantity,
            unit_price: value.unit_price,
            batch_number: value.batch_number,
            expiry: value.expiry,
            remark: value.remark,
        }
    }
}

#[derive(Deserialize)]
pub struct MovementRefDto {
    pub op_type: u8,
    pub source_id: u64,
    pub source_type: u8,
    pub remark: Option<String>,
}

#[derive(Deserialize)]
pub struct InventoryAdjustReqDto {
    pub warehouse_id: u64,
    pub product_id: u64,
    pub shelf_id: u64,
    pub qty_delta: Decimal,
    pub batch_number: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    /// when present, the movement row is written atomically with the
    /// quantity change
    pub movement: Option<MovementRefDto>,
}

#[derive(Deserialize)]
pub struct InventoryLogReqDto {
    pub warehouse_id: u64,
    pub product_id: u64,
    pub shelf_id: u64,
    pub qty_delta: Decimal,
    pub op_type: u8,
    pub source_id: u64,
    pub source_type: u8,
    pub batch_number: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub remark: Option<String>,
}

#[derive(Serialize)]
pub struct InventoryLogRespDto {
    pub success: bool,
    pub message: String,
    pub log_id: u64,
}

#[derive(Deserialize)]
pub struct InventoryListQueryDto {
    pub warehouse_id: Option<u64>,
    pub product_id: Option<u64>,
    pub shelf_id: Option<u64>,
    pub batch_number: Option<String>,
    pub page_index: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Serialize)]
pub struct InventoryRowDto {
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

impl From<InventoryRecordModel> for InventoryRowDto {
    fn from(value: InventoryRecordModel) -> Self {
        Self {
            inventory_id: value.inventory_id,
            warehouse_id: value.warehouse_id,
            warehouse_name: value.warehouse_name,
            product_id: value.product_id,
            product_name: value.product_name,
            product_code: value.product_code,
            shelf_id: value.shelf_id,
            shelf_name: value.shelf_name,
            quantity: value.quantity,
            batch_number: value.batch_number,
            expiry: value.expiry,
        }
    }
}
