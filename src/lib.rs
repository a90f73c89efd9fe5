use std::sync::atomic::{AtomicBool, AtomicU32};
use std::sync::Arc;

pub mod api;
pub mod constant;
pub mod error;
pub mod logging;
pub mod model;
pub mod network;
pub mod repository;
pub mod usecase;

mod config;
pub use config::{
    ApiServerCfg, AppBasepathCfg, AppConfig, AppDbServerCfg, AppDbServerType, AppLogHandlerCfg,
    AppLoggerCfg, AppLoggingCfg, WebApiListenCfg, WebApiRouteCfg,
};

mod auth;
pub use auth::AppAuthedClaim;

mod adapter;
pub use adapter::datastore;

type WebApiPath = String;
type WebApiHdlrLabel = &'static str;
type AppLogAlias = Arc<String>;

pub struct AppDataStoreContext {
    pub sql_dbs: Option<Vec<Arc<datastore::AppMariaDbStore>>>,
}

// global state shared by all threads
pub struct AppSharedState {
    _cfg: Arc<AppConfig>,
    _log: Arc<logging::AppLogContext>,
    dstore: Arc<AppDataStoreContext>,
    _shutdown: Arc<AtomicBool>,
    _num_reqs_processing: Arc<AtomicU32>,
}

impl AppSharedState {
    pub fn new(cfg: AppConfig, log: logging::AppLogContext) -> Self {
        let log = Arc::new(log);
        let sql_dbs = datastore::build_context(log.clone(), &cfg.api_server.data_store);
        let sql_dbs = sql_dbs.map(|m| m.into_iter().map(Arc::new).collect());
        let ds_ctx = Arc::new(AppDataStoreContext { sql_dbs });
        Self {
            _cfg: Arc::new(cfg),
            _log: log,
            dstore: ds_ctx,
            _shutdown: Arc::new(AtomicBool::new(false)),
            _num_reqs_processing: Arc::new(AtomicU32::new(0)),
        }
    } // end of fn new

    pub fn config(&self) -> &Arc<AppConfig> {
        &self._cfg
    }

    pub fn log_context(&self) -> &Arc<logging::AppLogContext> {
        &self._log
    }

    pub fn datastore(&self) -> Arc<AppDataStoreContext> {
        self.dstore.clone()
    }

    pub fn shutdown(&self) -> Arc<AtomicBool> {
        self._shutdown.clone()
    }

    /// return atomic field which represents current number of processing requests
    pub fn num_requests(&self) -> Arc<AtomicU32> {
        self._num_reqs_processing.clone()
    }
} // end of impl AppSharedState

impl Clone for AppSharedState {
    fn clone(&self) -> Self {
        Self {
            _cfg: self._cfg.clone(),
            _log: self._log.clone(),
            dstore: self.dstore.clone(),
            _shutdown: self._shutdown.clone(),
            _num_reqs_processing: self._num_reqs_processing.clone(),
        }
    }
}
