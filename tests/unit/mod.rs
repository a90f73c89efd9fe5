mod auth;
mod dto;
mod logging;
pub(crate) mod model;
mod usecase;

use std::env;

use warehouse::constant::{ENV_VAR_SERVICE_BASE_PATH, ENV_VAR_SYS_BASE_PATH};
use warehouse::logging::AppLogContext;
use warehouse::{AppBasepathCfg, AppConfig, AppSharedState};

pub(crate) const EXAMPLE_REL_PATH: &str = "/tests/unit/examples/";

pub(crate) fn ut_service_basepath() -> String {
    env::var(ENV_VAR_SERVICE_BASE_PATH).unwrap_or_else(|_| env!("CARGO_MANIFEST_DIR").to_string())
}

pub(crate) fn ut_sys_basepath() -> String {
    env::var(ENV_VAR_SYS_BASE_PATH).unwrap_or_else(|_| env!("CARGO_MANIFEST_DIR").to_string())
}

pub(crate) fn ut_setup_share_state(cfg_fname: &str) -> AppSharedState {
    let service_basepath = ut_service_basepath();
    let sys_basepath = ut_sys_basepath();
    let fullpath = service_basepath.clone() + EXAMPLE_REL_PATH + cfg_fname;
    let cfg = AppConfig {
        api_server: AppConfig::parse_from_file(fullpath).unwrap(),
        basepath: AppBasepathCfg {
            system: sys_basepath,
            service: service_basepath,
        },
    };
    let logctx = AppLogContext::new(&cfg.basepath, &cfg.api_server.logging);
    AppSharedState::new(cfg, logctx)
}
