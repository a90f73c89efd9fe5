mod adjust_inventory;
mod edit_order_detail;

pub use adjust_inventory::{
    AdjustInventoryUseCase, InventoryAdjustUcOutput, InventoryListUcOutput, ListInventoryUseCase,
    RecordMovementUcOutput, RecordMovementUseCase,
};
pub use edit_order_detail::{
    DeleteOrderDetailUseCase, ListOrderDetailUseCase, OrderDetailDeleteUcOutput,
    OrderDetailListUcOutput, OrderDetailSaveUcOutput, SaveOrderDetailUseCase,
};
