use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use warehouse::constant::OrderStatus;
use warehouse::error::{AppError, AppErrorCode};
use warehouse::model::{OrderDetailModel, OrderDetailReadModel, PageWindow};
use warehouse::usecase::{
    DeleteOrderDetailUseCase, ListOrderDetailUseCase, OrderDetailDeleteUcOutput,
    OrderDetailListUcOutput, OrderDetailSaveUcOutput, SaveOrderDetailUseCase,
};

use super::{ut_authed_claim, MockOrderDetailRepo};
use crate::ut_setup_share_state;

fn ut_setup_detail_req() -> OrderDetailModel {
    OrderDetailModel {
        detail_id: 0,
        order_id: 29,
        product_id: 180094,
        quantity: Decimal::from(3),
        unit_price: Decimal::new(1250, 2),
        batch_number: Some("B-20260805".to_string()),
        expiry: Some(
            DateTime::parse_from_rfc3339("2027-01-19T06:05:39+00:00")
                .unwrap()
                .with_timezone(&Utc),
        ),
        remark: None,
    }
}

#[tokio::test]
async fn save_detail_ok() {
    let app_state = ut_setup_share_state("config_ok.json");
    let repo = MockOrderDetailRepo::build_default();
    let uc = SaveOrderDetailUseCase {
        repo: Box::new(repo),
        authed_claim: ut_authed_claim(),
        logctx: app_state.log_context().clone(),
    };
    let result = uc.execute(ut_setup_detail_req()).await;
    assert!(result.is_ok());
    assert_eq!(
        result.unwrap(),
        OrderDetailSaveUcOutput::Saved { detail_id: 94 }
    );
}

#[tokio::test]
async fn save_detail_invalid_scalar_inputs() {
    let app_state = ut_setup_share_state("config_ok.json");
    let combos = [
        (0u64, 180094u64, Decimal::from(3), OrderDetailSaveUcOutput::InvalidOrderId),
        (29u64, 0u64, Decimal::from(3), OrderDetailSaveUcOutput::InvalidProductId),
        (29u64, 180094u64, Decimal::ZERO, OrderDetailSaveUcOutput::NonPositiveQuantity),
        (
            29u64,
            180094u64,
            Decimal::from(-2),
            OrderDetailSaveUcOutput::NonPositiveQuantity,
        ),
    ];
    for (order_id, product_id, quantity, expect) in combos {
        let repo = MockOrderDetailRepo::build_default();
        let uc = SaveOrderDetailUseCase {
            repo: Box::new(repo),
            authed_claim: ut_authed_claim(),
            logctx: app_state.log_context().clone(),
        };
        let mut data = ut_setup_detail_req();
        data.order_id = order_id;
        data.product_id = product_id;
        data.quantity = quantity;
        let result = uc.execute(data).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), expect);
    }
}

#[tokio::test]
async fn save_detail_order_approved() {
    let app_state = ut_setup_share_state("config_ok.json");
    let mut repo = MockOrderDetailRepo::build_default();
    repo.order_status_res = Ok(Some(OrderStatus::Approved));
    let uc = SaveOrderDetailUseCase {
        repo: Box::new(repo),
        authed_claim: ut_authed_claim(),
        logctx: app_state.log_context().clone(),
    };
    let result = uc.execute(ut_setup_detail_req()).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), OrderDetailSaveUcOutput::OrderApproved);
}

#[tokio::test]
async fn save_detail_storage_error() {
    let app_state = ut_setup_share_state("config_ok.json");
    let mut repo = MockOrderDetailRepo::build_default();
    repo.save_res = Err(AppError {
        code: AppErrorCode::RemoteDbServerFailure,
        detail: Some("unit-test".to_string()),
    });
    let uc = SaveOrderDetailUseCase {
        repo: Box::new(repo),
        authed_claim: ut_authed_claim(),
        logctx: app_state.log_context().clone(),
    };
    let result = uc.execute(ut_setup_detail_req()).await;
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.code, AppErrorCode::RemoteDbServerFailure);
    }
}

#[tokio::test]
async fn delete_detail_ok() {
    let app_state = ut_setup_share_state("config_ok.json");
    let repo = MockOrderDetailRepo::build_default();
    let uc = DeleteOrderDetailUseCase {
        repo: Box::new(repo),
        authed_claim: ut_authed_claim(),
        logctx: app_state.log_context().clone(),
    };
    let result = uc.execute(94).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), OrderDetailDeleteUcOutput::Deleted);
}

#[tokio::test]
async fn delete_detail_guard_paths() {
    let app_state = ut_setup_share_state("config_ok.json");
    {
        // zero id refused before touching the repository
        let uc = DeleteOrderDetailUseCase {
            repo: Box::new(MockOrderDetailRepo::build_default()),
            authed_claim: ut_authed_claim(),
            logctx: app_state.log_context().clone(),
        };
        let result = uc.execute(0).await;
        assert_eq!(result.unwrap(), OrderDetailDeleteUcOutput::InvalidDetailId);
    }
    {
        // parent order cannot be resolved
        let mut repo = MockOrderDetailRepo::build_default();
        repo.parent_order_res = Ok(None);
        let uc = DeleteOrderDetailUseCase {
            repo: Box::new(repo),
            authed_claim: ut_authed_claim(),
            logctx: app_state.log_context().clone(),
        };
        let result = uc.execute(94).await;
        assert_eq!(result.unwrap(), OrderDetailDeleteUcOutput::DetailNotFound);
    }
    {
        let mut repo = MockOrderDetailRepo::build_default();
        repo.order_status_res = Ok(Some(OrderStatus::Approved));
        let uc = DeleteOrderDetailUseCase {
            repo: Box::new(repo),
            authed_claim: ut_authed_claim(),
            logctx: app_state.log_context().clone(),
        };
        let result = uc.execute(94).await;
        assert_eq!(result.unwrap(), OrderDetailDeleteUcOutput::OrderApproved);
    }
    {
        // the row disappeared between lookup and delete
        let mut repo = MockOrderDetailRepo::build_default();
        repo.delete_res = Ok(0);
        let uc = DeleteOrderDetailUseCase {
            repo: Box::new(repo),
            authed_claim: ut_authed_claim(),
            logctx: app_state.log_context().clone(),
        };
        let result = uc.execute(94).await;
        assert_eq!(result.unwrap(), OrderDetailDeleteUcOutput::DetailNotFound);
    }
}

fn ut_setup_read_items() -> Vec<OrderDetailReadModel> {
    vec![
        OrderDetailReadModel {
            detail_id: 94,
            order_id: 29,
            product_id: 180094,
            product_name: "ceramic mug 350ml".to_string(),
            product_code: "CM-350".to_string(),
            quantity: Decimal::from(3),
            unit_price: Decimal::new(1250, 2),
            batch_number: "B-20260805".to_string(),
            expiry: None,
            remark: String::new(),
        },
        OrderDetailReadModel {
            detail_id: 95,
            order_id: 29,
            product_id: 180095,
            product_name: "ceramic mug 500ml".to_string(),
            product_code: "CM-500".to_string(),
            quantity: Decimal::from(1),
            unit_price: Decimal::new(1680, 2),
            batch_number: String::new(),
            expiry: None,
            remark: "fragile".to_string(),
        },
    ]
}

#[tokio::test]
async fn list_details_ok() {
    let app_state = ut_setup_share_state("config_ok.json");
    let mut repo = MockOrderDetailRepo::build_default();
    repo.paged_res = Ok((ut_setup_read_items(), 12));
    let uc = ListOrderDetailUseCase {
        repo: Box::new(repo),
        logctx: app_state.log_context().clone(),
    };
    let result = uc.execute(29, PageWindow::new(Some(1), Some(2))).await;
    assert!(result.is_ok());
    if let Ok(OrderDetailListUcOutput::Listed { total, items }) = result {
        assert_eq!(total, 12);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_code.as_str(), "CM-350");
    } else {
        panic!("unexpected use-case output");
    }
}

#[tokio::test]
async fn list_details_invalid_order_id() {
    let app_state = ut_setup_share_state("config_ok.json");
    let uc = ListOrderDetailUseCase {
        repo: Box::new(MockOrderDetailRepo::build_default()),
        logctx: app_state.log_context().clone(),
    };
    let result = uc.execute(0, PageWindow::new(None, None)).await;
    assert!(result.is_ok());
    assert!(matches!(
        result.unwrap(),
        OrderDetailListUcOutput::InvalidOrderId
    ));
}
