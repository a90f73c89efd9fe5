use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// one line item of an outbound order, `detail_id` of zero marks a row
/// which has not been persisted yet
#[derive(Debug, Clone)]
pub struct OrderDetailModel {
    pub detail_id: u64,
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub batch_number: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub remark: Option<String>,
}

impl OrderDetailModel {
    pub fn is_create(&self) -> bool {
        self.detail_id == 0
    }
    pub fn quantity_positive(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}

/// line item joined with the product catalog, the shape returned to
/// listing clients
#[derive(Debug, Clone)]
pub struct OrderDetailReadModel {
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
