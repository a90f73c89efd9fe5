mod sql_db;

use std::sync::Arc;

pub use sql_db::{AppMariaDbStore, AppPagedQuery, AppSqlBatchCmd};

use crate::config::AppDbServerCfg;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};

pub(crate) fn build_context(
    logctx: Arc<AppLogContext>,
    cfg: &Vec<AppDbServerCfg>,
) -> Option<Vec<AppMariaDbStore>> {
    let mut sqldb = None;
    for c in cfg {
        if sqldb.is_none() {
            sqldb = Some(Vec::new());
        }
        if let Some(lst) = &mut sqldb {
            match AppMariaDbStore::try_build(c) {
                Ok(item) => {
                    lst.push(item);
                }
                Err(e) => {
                    app_log_event!(logctx, AppLogLevel::ERROR, "{:?}", e);
                }
            }
        }
    }
    sqldb
}
