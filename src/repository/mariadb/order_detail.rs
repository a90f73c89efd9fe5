use std::result::Result as DefaultResult;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::{Arguments, IntoArguments, MySql, Row};

use crate::constant::OrderStatus;
use crate::datastore::AppMariaDbStore;
use crate::error::{AppError, AppErrorCode};
use crate::model::{OrderDetailModel, OrderDetailReadModel, PageWindow};
use crate::repository::AbsOrderDetailRepo;

const LIST_COL_SEQ: &str = "`d`.`detail_id`,`d`.`order_id`,`d`.`product_id`,`p`.`product_name`,\
    `p`.`product_code`,`d`.`quantity`,`d`.`unit_price`,`d`.`batch_number`,`d`.`expiry`,`d`.`remark`";

struct InsertDetailArg(OrderDetailModel);
struct UpdateDetailArg(OrderDetailModel);
struct FetchDetailPageArg(u64, PageWindow);

impl InsertDetailArg {
    fn sql_pattern() -> String {
        let col_seq =
            "`order_id`,`product_id`,`quantity`,`unit_price`,`batch_number`,`expiry`,`remark`";
        format!("INSERT INTO `outbound_order_detail`({col_seq}) VALUES (?,?,?,?,?,?,?)")
    }
}
impl<'q> IntoArguments<'q, MySql> for InsertDetailArg {
    fn into_arguments(self) -> <MySql as sqlx::Database>::Arguments<'q> {
        let mut out = MySqlArguments::default();
        let m = self.0;
        let _ = out.add(m.order_id);
        let _ = out.add(m.product_id);
        let _ = out.add(m.quantity);
        let _ = out.add(m.unit_price);
        let _ = out.add(m.batch_number);
        let _ = out.add(m.expiry);
        let _ = out.add(m.remark);
        out
    }
}
impl Into<(String, MySqlArguments)> for InsertDetailArg {
    fn into(self) -> (String, MySqlArguments) {
        (Self::sql_pattern(), self.into_arguments())
    }
}

impl UpdateDetailArg {
    fn sql_pattern() -> String {
        "UPDATE `outbound_order_detail` SET `product_id`=?,`quantity`=?,`unit_price`=?,\
         `batch_number`=?,`expiry`=?,`remark`=? WHERE `detail_id`=? AND `order_id`=?"
            .to_string()
    }
}
impl<'q> IntoArguments<'q, MySql> for UpdateDetailArg {
    fn into_arguments(self) -> <MySql as sqlx::Database>::Arguments<'q> {
        let mut out = MySqlArguments::default();
        let m = self.0;
        let _ = out.add(m.product_id);
        let _ = out.add(m.quantity);
        let _ = out.add(m.unit_price);
        let _ = out.add(m.batch_number);
        let _ = out.add(m.expiry);
        let _ = out.add(m.remark);
        let _ = out.add(m.detail_id);
        let _ = out.add(m.order_id);
        out
    }
}
impl Into<(String, MySqlArguments)> for UpdateDetailArg {
    fn into(self) -> (String, MySqlArguments) {
        (Self::sql_pattern(), self.into_arguments())
    }
}

impl FetchDetailPageArg {
    fn sql_pattern() -> String {
        format!(
            "SELECT {LIST_COL_SEQ} FROM `outbound_order_detail` AS `d` INNER JOIN `product` \
             AS `p` ON `d`.`product_id`=`p`.`product_id` WHERE `d`.`order_id`=? ORDER BY \
             `d`.`detail_id` ASC LIMIT ? OFFSET ?"
        )
    }
}
impl<'q> IntoArguments<'q, MySql> for FetchDetailPageArg {
    fn into_arguments(self) -> <MySql as sqlx::Database>::Arguments<'q> {
        let mut out = MySqlArguments::default();
        let _ = out.add(self.0);
        let _ = out.add(self.1.limit());
        let _ = out.add(self.1.offset());
        out
    }
}
impl Into<(String, MySqlArguments)> for FetchDetailPageArg {
    fn into(self) -> (String, MySqlArguments) {
        (Self::sql_pattern(), self.into_arguments())
    }
}

impl TryFrom<MySqlRow> for OrderDetailReadModel {
    type Error = AppError;
    fn try_from(row: MySqlRow) -> DefaultResult<Self, Self::Error> {
        let detail_id = row.try_get::<u64, usize>(0)?;
        let order_id = row.try_get::<u64, usize>(1)?;
        let product_id = row.try_get::<u64, usize>(2)?;
        let product_name = row.try_get::<String, usize>(3)?;
        let product_code = row.try_get::<String, usize>(4)?;
        let quantity = row.try_get::<Decimal, usize>(5)?;
        let unit_price = row.try_get::<Decimal, usize>(6)?;
        let batch_number = row.try_get::<Option<String>, usize>(7)?.unwrap_or_default();
        let expiry = row.try_get::<Option<DateTime<Utc>>, usize>(8)?;
        let remark = row.try_get::<Option<String>, usize>(9)?.unwrap_or_default();
        Ok(Self {
            detail_id,
            order_id,
            product_id,
            product_name,
            product_code,
            quantity,
            unit_price,
            batch_number,
            expiry,
            remark,
        })
    }
} // end of impl TryFrom for OrderDetailReadModel

pub(crate) struct OrderDetailMariaDbRepo {
    _db: Arc<AppMariaDbStore>,
}

impl OrderDetailMariaDbRepo {
    pub(crate) fn try_build(dbs: &Vec<Arc<AppMariaDbStore>>) -> DefaultResult<Self, AppError> {
        // TODO, balance the load in case the app data grows over
        // several database replicas
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
impl AbsOrderDetailRepo for OrderDetailMariaDbRepo {
    async fn fetch_order_status(
        &self,
        order_id: u64,
    ) -> DefaultResult<Option<OrderStatus>, AppError> {
        let sql = "SELECT `status` FROM `outbound_order` WHERE `order_id`=?".to_string();
        let mut args = MySqlArguments::default();
        let _ = args.add(order_id);
        let raw = self._db.fetch_scalar::<u32>(sql, args).await?;
        Ok(raw.map(OrderStatus::from))
    }

    async fn fetch_order_id_of_detail(
        &self,
        detail_id: u64,
    ) -> DefaultResult<Option<u64>, AppError> {
        let sql = "SELECT `order_id` FROM `outbound_order_detail` WHERE `detail_id`=?".to_string();
        let mut args = MySqlArguments::default();
        let _ = args.add(detail_id);
        self._db.fetch_scalar::<u64>(sql, args).await
    }

    async fn save(&self, detail: OrderDetailModel) -> DefaultResult<u64, AppError> {
        if detail.is_create() {
            let (sql, args) = InsertDetailArg(detail).into();
            let resultset = self._db.execute(sql, args).await?;
            Ok(resultset.last_insert_id())
        } else {
            let detail_id = detail.detail_id;
            let (sql, args) = UpdateDetailArg(detail).into();
            // zero affected rows is fine at here, the client may submit
            // the same values twice
            let _resultset = self._db.execute(sql, args).await?;
            Ok(detail_id)
        }
    }

    async fn delete(&self, detail_id: u64) -> DefaultResult<u64, AppError> {
        let sql = "DELETE FROM `outbound_order_detail` WHERE `detail_id`=?".to_string();
        let mut args = MySqlArguments::default();
        let _ = args.add(detail_id);
        let resultset = self._db.execute(sql, args).await?;
        Ok(resultset.rows_affected())
    }

    async fn fetch_paged(
        &self,
        order_id: u64,
        page: PageWindow,
    ) -> DefaultResult<(Vec<OrderDetailReadModel>, i64), AppError> {
        let count_sql =
            "SELECT COUNT(*) FROM `outbound_order_detail` WHERE `order_id`=?".to_string();
        let mut count_args = MySqlArguments::default();
        let _ = count_args.add(order_id);
        let total = self
            ._db
            .fetch_scalar::<i64>(count_sql, count_args)
            .await?
            .unwrap_or(0);
        let mut items = Vec::new();
        let (sql, args) = FetchDetailPageArg(order_id, page).into();
        let _num_rows = self
            ._db
            .fetch_rows_each(sql, args, |row| {
                let m = OrderDetailReadModel::try_from(row)?;
                items.push(m);
                Ok(())
            })
            .await?;
        Ok((items, total))
    } // end of fn fetch_paged
} // end of impl AbsOrderDetailRepo for OrderDetailMariaDbRepo

#[test]
fn verify_detail_sql_patterns() {
    let patt = InsertDetailArg::sql_pattern();
    assert_eq!(
        patt.as_str(),
        "INSERT INTO `outbound_order_detail`(`order_id`,`product_id`,`quantity`,`unit_price`,\
         `batch_number`,`expiry`,`remark`) VALUES (?,?,?,?,?,?,?)"
    );
    let patt = UpdateDetailArg::sql_pattern();
    assert!(patt.starts_with("UPDATE `outbound_order_detail` SET "));
    assert!(patt.ends_with("WHERE `detail_id`=? AND `order_id`=?"));
    let patt = FetchDetailPageArg::sql_pattern();
    assert!(patt.contains("INNER JOIN `product`"));
    assert!(patt.ends_with("LIMIT ? OFFSET ?"));
}
