use rust_decimal::Decimal;
use serde_json::json;

use warehouse::api::web::dto::{
    InventoryAdjustReqDto, OrderDetailSaveReqDto, PagedRespDto, SimpleRespDto,
};

#[test]
fn simple_resp_shape() {
    let resp = SimpleRespDto {
        success: true,
        message: "deleted".to_string(),
    };
    let serial = serde_json::to_string(&resp).unwrap();
    assert!(serial.contains("\"success\":true"));
    assert!(serial.contains("\"message\":\"deleted\""));
}

#[test]
fn paged_resp_shape() {
    let resp = PagedRespDto::<u32> {
        success: true,
        message: "query succeeded".to_string(),
        total: 35,
        data: vec![1, 2, 3],
    };
    let serial = serde_json::to_string(&resp).unwrap();
    assert!(serial.contains("\"total\":35"));
    assert!(serial.contains("\"data\":[1,2,3]"));
}

#[test]
fn save_detail_req_decode() {
    let raw = json!({
        "order_id": 29,
        "product_id": 180094,
        "quantity": 3,
        "unit_price": 12.5,
        "batch_number": "B-20260805",
        "remark": null
    });
    let req = serde_json::from_value::<OrderDetailSaveReqDto>(raw).unwrap();
    assert_eq!(req.detail_id, None);
    assert_eq!(req.order_id, 29);
    assert_eq!(req.quantity, Decimal::from(3));
    assert!(req.expiry.is_none());
    assert_eq!(req.batch_number.as_deref(), Some("B-20260805"));
}

#[test]
fn adjust_inventory_req_decode() {
    let raw = json!({
        "warehouse_id": 2,
        "product_id": 180094,
        "shelf_id": 18,
        "qty_delta": -4,
        "movement": {
            "op_type": 2,
            "source_id": 29,
            "source_type": 2,
            "remark": "picked for outbound order"
        }
    });
    let req = serde_json::from_value::<InventoryAdjustReqDto>(raw).unwrap();
    assert_eq!(req.qty_delta, Decimal::from(-4));
    let movement = req.movement.unwrap();
    assert_eq!(movement.op_type, 2u8);
    assert_eq!(movement.source_type, 2u8);
}
