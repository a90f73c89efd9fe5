use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::{Arguments, IntoArguments, MySql, Row};

use crate::datastore::{AppMariaDbStore, AppPagedQuery, AppSqlBatchCmd};
use crate::error::{AppError, AppErrorCode};
use crate::model::{
    InventoryListFilter, InventoryLogModel, InventoryMovementDraft, InventoryRecordModel,
    InventoryTargetIdentity, PageWindow,
};
use crate::repository::{AbsInventoryRepo, InventoryAdjustOutcome};

const LIST_TABLE_EXPR: &str = "`inventory` AS `i` INNER JOIN `product` AS `p` ON \
    `i`.`product_id`=`p`.`product_id` INNER JOIN `warehouse` AS `w` ON \
    `i`.`warehouse_id`=`w`.`warehouse_id` INNER JOIN `shelf` AS `s` ON \
    `i`.`shelf_id`=`s`.`shelf_id`";

const LIST_COL_SEQ: &str = "`i`.`inventory_id`,`i`.`warehouse_id`,`w`.`warehouse_name`,\
    `i`.`product_id`,`p`.`product_name`,`p`.`product_code`,`i`.`shelf_id`,`s`.`shelf_name`,\
    `i`.`quantity`,`i`.`batch_number`,`i`.`expiry`";

struct DecrementQtyArg(InventoryTargetIdentity, Decimal);
struct UpsertQtyArg(InventoryTargetIdentity, Decimal);
struct InsertMovementArg(InventoryLogModel);

impl DecrementQtyArg {
    // the null-safe comparison keeps rows without batch / expiry tracking
    // addressable
    fn sql_pattern() -> String {
        "UPDATE `inventory` SET `quantity` = `quantity` + ? WHERE `warehouse_id`=? AND \
         `product_id`=? AND `shelf_id`=? AND `batch_number` <=> ? AND `expiry` <=> ? AND \
         `quantity` + ? >= 0"
            .to_string()
    }
}
impl<'q> IntoArguments<'q, MySql> for DecrementQtyArg {
    fn into_arguments(self) -> <MySql as sqlx::Database>::Arguments<'q> {
        let mut out = MySqlArguments::default();
        let (t, delta) = (self.0, self.1);
        let _ = out.add(delta);
        let _ = out.add(t.warehouse_id);
        let _ = out.add(t.product_id);
        let _ = out.add(t.shelf_id);
        let _ = out.add(t.batch_number);
        let _ = out.add(t.expiry);
        let _ = out.add(delta);
        out
    }
}
impl Into<(String, MySqlArguments)> for DecrementQtyArg {
    fn into(self) -> (String, MySqlArguments) {
        (Self::sql_pattern(), self.into_arguments())
    }
}

impl UpsertQtyArg {
    fn sql_pattern() -> String {
        let col_seq = "`warehouse_id`,`product_id`,`shelf_id`,`batch_number`,`expiry`,`quantity`";
        format!(
            "INSERT INTO `inventory`({col_seq}) VALUES (?,?,?,?,?,?) ON DUPLICATE KEY \
             UPDATE `quantity` = `quantity` + ?"
        )
    }
}
impl<'q> IntoArguments<'q, MySql> for UpsertQtyArg {
    fn into_arguments(self) -> <MySql as sqlx::Database>::Arguments<'q> {
        let mut out = MySqlArguments::default();
        let (t, delta) = (self.0, self.1);
        let _ = out.add(t.warehouse_id);
        let _ = out.add(t.product_id);
        let _ = out.add(t.shelf_id);
        let _ = out.add(t.batch_number);
        let _ = out.add(t.expiry);
        let _ = out.add(delta);
        let _ = out.add(delta);
        out
    }
}
impl Into<(String, MySqlArguments)> for UpsertQtyArg {
    fn into(self) -> (String, MySqlArguments) {
        (Self::sql_pattern(), self.into_arguments())
    }
}

impl InsertMovementArg {
    fn sql_pattern() -> String {
        let col_seq = "`warehouse_id`,`product_id`,`shelf_id`,`qty_delta`,`op_type`,\
                       `source_id`,`source_type`,`batch_number`,`expiry`,`remark`";
        format!("INSERT INTO `inventory_movement`({col_seq}) VALUES (?,?,?,?,?,?,?,?,?,?)")
    }
}
impl<'q> IntoArguments<'q, MySql> for InsertMovementArg {
    fn into_arguments(self) -> <MySql as sqlx::Database>::Arguments<'q> {
        let mut out = MySqlArguments::default();
        let m = self.0;
        let op_typ_num: u8 = m.op_type.into();
        let src_typ_num: u8 = m.source_type.into();
        let _ = out.add(m.target.warehouse_id);
        let _ = out.add(m.target.product_id);
        let _ = out.add(m.target.shelf_id);
        let _ = out.add(m.qty_delta);
        let _ = out.add(op_typ_num);
        let _ = out.add(m.source_id);
        let _ = out.add(src_typ_num);
        let _ = out.add(m.target.batch_number);
        let _ = out.add(m.target.expiry);
        let _ = out.add(m.remark);
        out
    }
}
impl Into<(String, MySqlArguments)> for InsertMovementArg {
    fn into(self) -> (String, MySqlArguments) {
        (Self::sql_pattern(), self.into_arguments())
    }
}

impl TryFrom<MySqlRow> for InventoryRecordModel {
    type Error = AppError;
    fn try_from(row: MySqlRow) -> DefaultResult<Self, Self::Error> {
        let inventory_id = row.try_get::<u64, usize>(0)?;
        let warehouse_id = row.try_get::<u64, usize>(1)?;
        let warehouse_name = row.try_get::<String, usize>(2)?;
        let product_id = row.try_get::<u64, usize>(3)?;
        let product_name = row.try_get::<String, usize>(4)?;
        let product_code = row.try_get::<String, usize>(5)?;
        let shelf_id = row.try_get::<u64, usize>(6)?;
        let shelf_name = row.try_get::<String, usize>(7)?;
        let quantity = row.try_get::<Decimal, usize>(8)?;
        let batch_number = row.try_get::<Option<String>, usize>(9)?.unwrap_or_default();
        let expiry = row.try_get::<Option<DateTime<Utc>>, usize>(10)?;
        Ok(Self {
            inventory_id,
            warehouse_id,
            warehouse_name,
            product_id,
            product_name,
            product_code,
            shelf_id,
            shelf_name,
            quantity,
            batch_number,
            expiry,
        })
    }
} // end of impl TryFrom for InventoryRecordModel

fn filter_condition(filter: &InventoryListFilter) -> Option<String> {
    let mut terms: Vec<&str> = Vec::new();
    if filter.warehouse_id.is_some() {
        terms.push("`i`.`warehouse_id` = ?");
    }
    if filter.product_id.is_some() {
        terms.push("`i`.`product_id` = ?");
    }
    if filter.shelf_id.is_some() {
        terms.push("`i`.`shelf_id` = ?");
    }
    if filter.batch_number.is_some() {
        terms.push("`i`.`batch_number` = ?");
    }
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" AND "))
    }
}

fn filter_arguments(filter: &InventoryListFilter) -> MySqlArguments {
    let mut out = MySqlArguments::default();
    if let Some(v) = filter.warehouse_id {
        let _ = out.add(v);
    }
    if let Some(v) = filter.product_id {
        let _ = out.add(v);
    }
    if let Some(v) = filter.shelf_id {
        let _ = out.add(v);
    }
    if let Some(v) = filter.batch_number.as_ref() {
        let _ = out.add(v.clone());
    }
    out
}

pub(crate) struct InventoryMariaDbRepo {
    _db: Arc<AppMariaDbStore>,
}

impl InventoryMariaDbRepo {
    pub(crate) fn try_build(dbs: &Vec<Arc<AppMariaDbStore>>) -> DefaultResult<Self, AppError> {
        if let Some(db) = dbs.first() {
            Ok(Self { _db: db.clone() })
        } else {
            Err(AppError {
                code: AppErrorCode::MissingDataStore,
                detail: Some("mariadb".to_string()),
            })
        }
    }
}

#[async_trait]
impl AbsInventoryRepo for InventoryMariaDbRepo {
    async fn adjust(
        &self,
        target: InventoryTargetIdentity,
        qty_delta: Decimal,
        movement: Option<InventoryMovementDraft>,
    ) -> DefaultResult<InventoryAdjustOutcome, AppError> {
        let movement_cmd = movement.map(|draft| {
            let logitem = InventoryLogModel::from_draft(target.clone(), qty_delta, draft);
            let (sql, args): (String, MySqlArguments) = InsertMovementArg(logitem).into();
            AppSqlBatchCmd {
                sql,
                args,
                expect_num_affected: None,
            }
        });
        let mut cmds = Vec::new();
        if qty_delta < Decimal::ZERO {
            let (sql, args) = DecrementQtyArg(target, qty_delta).into();
            // the guarded decrement is the only statement carrying an
            // affected-rows expectation in this batch, a mismatch means the
            // stock row cannot cover the decrement
            cmds.push(AppSqlBatchCmd {
                sql,
                args,
                expect_num_affected: Some(1),
            });
        } else {
            let (sql, args) = UpsertQtyArg(target, qty_delta).into();
            cmds.push(AppSqlBatchCmd {
                sql,
                args,
                expect_num_affected: None,
            });
        }
        if let Some(c) = movement_cmd {
            cmds.push(c);
        }
        match self._db.execute_batch(cmds).await {
            Ok(_resultsets) => Ok(InventoryAdjustOutcome::Applied),
            Err(e) if e.code == AppErrorCode::DataCorruption => {
                Ok(InventoryAdjustOutcome::Insufficient)
            }
            Err(e) => Err(e),
        }
    } // end of fn adjust

    async fn insert_log(&self, item: InventoryLogModel) -> DefaultResult<u64, AppError> {
        let (sql, args) = InsertMovementArg(item).into();
        let resultset = self._db.execute(sql, args).await?;
        Ok(resultset.last_insert_id())
    }

    async fn fetch_paged(
        &self,
        filter: InventoryListFilter,
        page: PageWindow,
    ) -> DefaultResult<(Vec<InventoryRecordModel>, i64), AppError> {
        let query = AppPagedQuery {
            table: LIST_TABLE_EXPR.to_string(),
            fields: LIST_COL_SEQ.to_string(),
            filter: filter_condition(&filter),
            order_by: Some("`i`.`inventory_id` ASC".to_string()),
            page_index: page.index,
            page_size: page.size,
        };
        let (rows, total) = self._db.paginate(query, || filter_arguments(&filter)).await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(InventoryRecordModel::try_from(row)?);
        }
        Ok((items, total))
    } // end of fn fetch_paged
} // end of impl AbsInventoryRepo for InventoryMariaDbRepo
