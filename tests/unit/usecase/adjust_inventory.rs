use rust_decimal::Decimal;

use warehouse::constant::{MovementOpType, MovementSourceType};
use warehouse::error::{AppError, AppErrorCode};
use warehouse::model::{
    InventoryListFilter, InventoryLogModel, InventoryMovementDraft, InventoryRecordModel,
    InventoryTargetIdentity, PageWindow,
};
use warehouse::repository::InventoryAdjustOutcome;
use warehouse::usecase::{
    AdjustInventoryUseCase, InventoryAdjustUcOutput, InventoryListUcOutput, ListInventoryUseCase,
    RecordMovementUcOutput, RecordMovementUseCase,
};

use super::{ut_authed_claim, MockInventoryRepo};
use crate::ut_setup_share_state;

fn ut_setup_target() -> InventoryTargetIdentity {
    InventoryTargetIdentity {
        warehouse_id: 2,
        product_id: 180094,
        shelf_id: 18,
        batch_number: Some("B-20260805".to_string()),
        expiry: None,
    }
}

fn ut_setup_movement() -> InventoryMovementDraft {
    InventoryMovementDraft {
        op_type: MovementOpType::Outbound,
        source_id: 29,
        source_type: MovementSourceType::OutboundOrder,
        remark: None,
    }
}

#[tokio::test]
async fn adjust_applied_ok() {
    let app_state = ut_setup_share_state("config_ok.json");
    let uc = AdjustInventoryUseCase {
        repo: Box::new(MockInventoryRepo::build_default()),
        authed_claim: ut_authed_claim(),
        logctx: app_state.log_context().clone(),
    };
    let result = uc
        .execute(ut_setup_target(), Decimal::from(-4), Some(ut_setup_movement()))
        .await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), InventoryAdjustUcOutput::Applied);
}

#[tokio::test]
async fn adjust_insufficient_stock() {
    let app_state = ut_setup_share_state("config_ok.json");
    let mut repo = MockInventoryRepo::build_default();
    repo.adjust_res = Ok(InventoryAdjustOutcome::Insufficient);
    let uc = AdjustInventoryUseCase {
        repo: Box::new(repo),
        authed_claim: ut_authed_claim(),
        logctx: app_state.log_context().clone(),
    };
    let result = uc.execute(ut_setup_target(), Decimal::from(-500), None).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), InventoryAdjustUcOutput::Insufficient);
}

#[tokio::test]
async fn adjust_invalid_location() {
    let app_state = ut_setup_share_state("config_ok.json");
    let combos = [
        (0u64, 180094u64, 18u64, InventoryAdjustUcOutput::InvalidWarehouseId),
        (2u64, 0u64, 18u64, InventoryAdjustUcOutput::InvalidProductId),
        (2u64, 180094u64, 0u64, InventoryAdjustUcOutput::InvalidShelfId),
    ];
    for (warehouse_id, product_id, shelf_id, expect) in combos {
        let uc = AdjustInventoryUseCase {
            repo: Box::new(MockInventoryRepo::build_default()),
            authed_claim: ut_authed_claim(),
            logctx: app_state.log_context().clone(),
        };
        let mut target = ut_setup_target();
        target.warehouse_id = warehouse_id;
        target.product_id = product_id;
        target.shelf_id = shelf_id;
        let result = uc.execute(target, Decimal::from(1), None).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), expect);
    }
}

#[tokio::test]
async fn adjust_storage_error() {
    let app_state = ut_setup_share_state("config_ok.json");
    let mut repo = MockInventoryRepo::build_default();
    repo.adjust_res = Err(AppError {
        code: AppErrorCode::DatabaseServerBusy,
        detail: Some("unit-test".to_string()),
    });
    let uc = AdjustInventoryUseCase {
        repo: Box::new(repo),
        authed_claim: ut_authed_claim(),
        logctx: app_state.log_context().clone(),
    };
    let result = uc.execute(ut_setup_target(), Decimal::from(2), None).await;
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.code, AppErrorCode::DatabaseServerBusy);
    }
}

#[tokio::test]
async fn record_movement_ok() {
    let app_state = ut_setup_share_state("config_ok.json");
    let uc = RecordMovementUseCase {
        repo: Box::new(MockInventoryRepo::build_default()),
        authed_claim: ut_authed_claim(),
        logctx: app_state.log_context().clone(),
    };
    let item = InventoryLogModel::from_draft(
        ut_setup_target(),
        Decimal::from(-4),
        ut_setup_movement(),
    );
    let result = uc.execute(item).await;
    assert!(result.is_ok());
    assert_eq!(
        result.unwrap(),
        RecordMovementUcOutput::Recorded { log_id: 501 }
    );
}

#[tokio::test]
async fn record_movement_invalid_location() {
    let app_state = ut_setup_share_state("config_ok.json");
    let uc = RecordMovementUseCase {
        repo: Box::new(MockInventoryRepo::build_default()),
        authed_claim: ut_authed_claim(),
        logctx: app_state.log_context().clone(),
    };
    let mut target = ut_setup_target();
    target.product_id = 0;
    let item = InventoryLogModel::from_draft(target, Decimal::from(-4), ut_setup_movement());
    let result = uc.execute(item).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), RecordMovementUcOutput::InvalidProductId);
}

#[tokio::test]
async fn list_inventory_passthrough() {
    let app_state = ut_setup_share_state("config_ok.json");
    let saved_rows = vec![InventoryRecordModel {
        inventory_id: 77,
        warehouse_id: 2,
        warehouse_name: "north dock".to_string(),
        product_id: 180094,
        product_name: "ceramic mug 350ml".to_string(),
        product_code: "CM-350".to_string(),
        shelf_id: 18,
        shelf_name: "A-03-2".to_string(),
        quantity: Decimal::from(120),
        batch_number: "B-20260805".to_string(),
        expiry: None,
    }];
    let mut repo = MockInventoryRepo::build_default();
    repo.paged_res = Ok((saved_rows, 41));
    let uc = ListInventoryUseCase {
        repo: Box::new(repo),
        logctx: app_state.log_context().clone(),
    };
    let filter = InventoryListFilter {
        warehouse_id: Some(2),
        product_id: None,
        shelf_id: None,
        batch_number: None,
    };
    let result = uc.execute(filter, PageWindow::new(Some(2), Some(20))).await;
    assert!(result.is_ok());
    let InventoryListUcOutput::Listed { total, items } = result.unwrap();
    assert_eq!(total, 41);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].shelf_name.as_str(), "A-03-2");
}
