use std::fs::File;
use std::io::BufReader;
use std::ops::DerefMut;
use std::result::Result as DefaultResult;
use std::time::Duration;

use futures_util::TryStreamExt;
use serde::Deserialize;
use sqlx::mysql::{MySqlArguments, MySqlConnectOptions, MySqlQueryResult, MySqlRow};
use sqlx::pool::{PoolConnection, PoolOptions};
use sqlx::{Arguments, Connection, Executor, MySql, Pool, Row, Statement, Transaction};

use crate::config::{AppDbServerCfg, AppDbServerType};
use crate::constant::limit;
use crate::error::{AppError, AppErrorCode};

#[allow(non_snake_case)]
#[derive(Deserialize)]
struct DbSecret {
    HOST: String,
    PORT: u16,
    USER: String,
    PASSWORD: String,
}

/// one statement of a transactional batch, when `expect_num_affected` is
/// given and the statement touches a different number of rows, the whole
/// batch rolls back
pub struct AppSqlBatchCmd {
    pub sql: String,
    pub args: MySqlArguments,
    pub expect_num_affected: Option<usize>,
}

/// offset / limit window over an arbitrary table expression, the page
/// index starts from 1
pub struct AppPagedQuery {
    pub table: String,
    pub fields: String,
    pub filter: Option<String>,
    pub order_by: Option<String>,
    pub page_index: u32,
    pub page_size: u32,
}

impl AppPagedQuery {
    fn fields_or_all(&self) -> &str {
        if self.fields.is_empty() {
            "*"
        } else {
            self.fields.as_str()
        }
    }
    fn filter_or_all(&self) -> &str {
        match self.filter.as_deref() {
            Some(f) if !f.is_empty() => f,
            _others => "1=1",
        }
    }
    pub(crate) fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            self.table,
            self.filter_or_all()
        )
    }
    pub(crate) fn rows_sql(&self) -> String {
        let ordering = match self.order_by.as_deref() {
            Some(o) if !o.is_empty() => format!(" ORDER BY {}", o),
            _others => String::new(),
        };
        format!(
            "SELECT {} FROM {} WHERE {}{} LIMIT ? OFFSET ?",
            self.fields_or_all(),
            self.table,
            self.filter_or_all(),
            ordering
        )
    }
    pub(crate) fn window(&self) -> (u64, u64) {
        let idx = self.page_index.max(1);
        let size = self
            .page_size
            .clamp(1, limit::MAX_PAGE_SIZE);
        let offset = (idx as u64 - 1) * (size as u64);
        (size as u64, offset)
    }
} // end of impl AppPagedQuery

pub struct AppMariaDbStore {
    pub alias: String,
    pool: Pool<MySql>,
}

impl AppMariaDbStore {
    pub fn try_build(cfg: &AppDbServerCfg) -> DefaultResult<Self, AppError> {
        if !matches!(cfg.srv_type, AppDbServerType::MariaDB) {
            let detail = format!("db-cfg-server-type: {:?}", cfg.srv_type);
            return Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some(detail),
            });
        }
        let secret = Self::load_secret(cfg.secret_path.as_str())?;
        let conn_opts = MySqlConnectOptions::new()
            .host(secret.HOST.as_str())
            .port(secret.PORT)
            .username(secret.USER.as_str())
            .password(secret.PASSWORD.as_str())
            .database(cfg.db_name.as_str());
        let pol_opts = PoolOptions::<MySql>::new()
            .max_connections(cfg.max_conns)
            .idle_timeout(Some(Duration::new(cfg.idle_timeout_secs as u64, 0)))
            .acquire_timeout(Duration::new(cfg.acquire_timeout_secs as u64, 0))
            .min_connections(0);
        let pool = pol_opts.connect_lazy_with(conn_opts);
        Ok(Self {
            pool,
            alias: cfg.alias.clone(),
        })
    } // end of fn try_build

    fn load_secret(path: &str) -> DefaultResult<DbSecret, AppError> {
        let fileobj = File::open(path).map_err(|e| AppError {
            code: AppErrorCode::MissingSecretPath,
            detail: Some(e.to_string() + ", secret-path:" + path),
        })?;
        let reader = BufReader::new(fileobj);
        serde_json::from_reader::<BufReader<File>, DbSecret>(reader).map_err(|e| AppError {
            code: AppErrorCode::InvalidJsonFormat,
            detail: Some(e.to_string() + ", secret-parsing-error, source: AppMariaDbStore"),
        })
    }

    pub async fn acquire(&self) -> DefaultResult<PoolConnection<MySql>, AppError> {
        let pl = &self.pool;
        match pl.acquire().await {
            Ok(conn) => Ok(conn),
            Err(e) => Err(e.into()),
        }
    }

    /// run one parameterized statement, return the low-level result which
    /// carries number of affected rows and last-insert id
    pub async fn execute(
        &self,
        sql: String,
        args: MySqlArguments,
    ) -> DefaultResult<MySqlQueryResult, AppError> {
        let mut conn = self.acquire().await?;
        let stmt = conn.deref_mut().prepare(sql.as_str()).await?;
        let query = stmt.query_with(args);
        let resultset = query.execute(conn.deref_mut()).await?;
        Ok(resultset)
    }

    /// first column of the first row, `None` when the statement matches
    /// no row at all
    pub async fn fetch_scalar<T>(
        &self,
        sql: String,
        args: MySqlArguments,
    ) -> DefaultResult<Option<T>, AppError>
    where
        T: Send + Unpin + sqlx::Type<MySql>,
        for<'r> T: sqlx::Decode<'r, MySql>,
    {
        let mut conn = self.acquire().await?;
        let stmt = conn.deref_mut().prepare(sql.as_str()).await?;
        let query = stmt.query_with(args);
        let maybe_row = query.fetch_optional(conn.deref_mut()).await?;
        if let Some(row) = maybe_row {
            let value = row.try_get::<T, usize>(0)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    pub async fn fetch_rows(
        &self,
        sql: String,
        args: MySqlArguments,
    ) -> DefaultResult<Vec<MySqlRow>, AppError> {
        let mut conn = self.acquire().await?;
        let rows = Self::fetch_rows_common(&mut conn, sql, args).await?;
        Ok(rows)
    }

    /// visit rows one by one as the database server streams them back,
    /// return number of rows visited
    pub async fn fetch_rows_each<F>(
        &self,
        sql: String,
        args: MySqlArguments,
        mut visitor: F,
    ) -> DefaultResult<u64, AppError>
    where
        F: FnMut(MySqlRow) -> DefaultResult<(), AppError> + Send,
    {
        let mut conn = self.acquire().await?;
        let stmt = conn.deref_mut().prepare(sql.as_str()).await?;
        let query = stmt.query_with(args);
        let mut num_visited = 0u64;
        let mut row_stream = query.fetch(conn.deref_mut());
        while let Some(row) = row_stream.try_next().await? {
            visitor(row)?;
            num_visited += 1;
        }
        Ok(num_visited)
    } // end of fn fetch_rows_each

    /// several statements on the same connection, one row set returned
    /// for each of them
    pub async fn fetch_multi(
        &self,
        cmds: Vec<(String, MySqlArguments)>,
    ) -> DefaultResult<Vec<Vec<MySqlRow>>, AppError> {
        let mut conn = self.acquire().await?;
        let mut out = Vec::with_capacity(cmds.len());
        for (sql, args) in cmds {
            let rows = Self::fetch_rows_common(&mut conn, sql, args).await?;
            out.push(rows);
        }
        Ok(out)
    }

    async fn fetch_rows_common(
        conn: &mut PoolConnection<MySql>,
        sql: String,
        args: MySqlArguments,
    ) -> DefaultResult<Vec<MySqlRow>, AppError> {
        let stmt = conn.deref_mut().prepare(sql.as_str()).await?;
        let query = stmt.query_with(args);
        let rows = query.fetch_all(conn.deref_mut()).await?;
        Ok(rows)
    }

    /// all statements succeed within one transaction or none of them
    /// take effect
    pub async fn execute_batch(
        &self,
        cmds: Vec<AppSqlBatchCmd>,
    ) -> DefaultResult<Vec<MySqlQueryResult>, AppError> {
        let mut conn = self.acquire().await?;
        let mut tx = conn.deref_mut().begin().await?;
        let mut out = Vec::with_capacity(cmds.len());
        for cmd in cmds {
            let resultset =
                run_query_once(&mut tx, cmd.sql, cmd.args, cmd.expect_num_affected).await?;
            out.push(resultset);
        } // dropping the uncommitted transaction on error rolls it back
        tx.commit().await?;
        Ok(out)
    }

    /// windowed query over the given table expression along with total
    /// count of matching rows
    pub async fn paginate<F>(
        &self,
        query: AppPagedQuery,
        bind: F,
    ) -> DefaultResult<(Vec<MySqlRow>, i64), AppError>
    where
        F: Fn() -> MySqlArguments,
    {
        let (num_limit, num_offset) = query.window();
        let mut row_args = bind();
        let _ = row_args.add(num_limit);
        let _ = row_args.add(num_offset);
        let cmds = vec![(query.count_sql(), bind()), (query.rows_sql(), row_args)];
        let mut resultsets = self.fetch_multi(cmds).await?;
        let rows = resultsets.pop().unwrap_or_default();
        let total = if let Some(cnt_rows) = resultsets.pop() {
            if let Some(r) = cnt_rows.first() {
                r.try_get::<i64, usize>(0)?
            } else {
                0i64
            }
        } else {
            0i64
        };
        Ok((rows, total))
    } // end of fn paginate
} // end of impl AppMariaDbStore

pub(crate) async fn run_query_once(
    tx: &mut Transaction<'_, MySql>,
    sql_patt: String,
    args: MySqlArguments,
    maybe_num_batch: Option<usize>,
) -> DefaultResult<MySqlQueryResult, AppError> {
    let stmt = tx.deref_mut().prepare(sql_patt.as_str()).await?;
    let query = stmt.query_with(args);
    let exec = tx.deref_mut();
    let resultset = query.execute(exec).await?;
    if let Some(num_batch) = maybe_num_batch {
        let num_affected = resultset.rows_affected() as usize;
        if num_affected == num_batch {
            Ok(resultset)
        } else {
            let detail = format!("num_affected, actual:{}, expect:{}", num_affected, num_batch);
            Err(AppError {
                code: AppErrorCode::DataCorruption,
                detail: Some(detail),
            })
        }
    } else {
        Ok(resultset)
    }
} // end of fn run_query_once
