use rust_decimal::Decimal;

use warehouse::constant::OrderStatus;
use warehouse::model::OrderDetailModel;

fn ut_saved_detail() -> OrderDetailModel {
    OrderDetailModel {
        detail_id: 94,
        order_id: 29,
        product_id: 180094,
        quantity: Decimal::new(35, 1),
        unit_price: Decimal::new(1250, 2),
        batch_number: None,
        expiry: None,
        remark: None,
    }
}

#[test]
fn detail_create_flag() {
    let mut m = ut_saved_detail();
    assert!(!m.is_create());
    m.detail_id = 0;
    assert!(m.is_create());
}

#[test]
fn detail_quantity_guard() {
    let mut m = ut_saved_detail();
    assert!(m.quantity_positive());
    m.quantity = Decimal::ZERO;
    assert!(!m.quantity_positive());
    m.quantity = Decimal::new(-15, 1);
    assert!(!m.quantity_positive());
}

#[test]
fn order_status_convert() {
    assert_eq!(OrderStatus::from(2u32), OrderStatus::Approved);
    assert_eq!(OrderStatus::from(1u32), OrderStatus::Draft);
    assert_eq!(OrderStatus::from(3u32), OrderStatus::Shipped);
    let unknown = OrderStatus::from(9u32);
    assert_eq!(u32::from(unknown), 9u32);
    assert_ne!(OrderStatus::from(9u32), OrderStatus::Approved);
}
