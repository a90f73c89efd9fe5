use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::env;
use std::sync::atomic::Ordering;

use tokio::runtime::Builder as RuntimeBuilder;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use warehouse::api::web::route_table;
use warehouse::constant::{app_meta, EXPECTED_ENV_VAR_LABELS};
use warehouse::logging::{app_log_event, AppLogContext, AppLogLevel};
use warehouse::network::{app_web_service, middleware, net_listener};
use warehouse::{AppConfig, AppSharedState};

async fn start_server(shr_state: AppSharedState) {
    let log_ctx_p = shr_state.log_context().clone();
    let cfg = shr_state.config().clone();
    let routes = route_table();
    let listener_cfg = &cfg.api_server.listen;
    let (service, num_applied) = app_web_service(listener_cfg, routes, shr_state.clone());
    if num_applied == 0 {
        app_log_event!(
            log_ctx_p,
            AppLogLevel::ERROR,
            "no route created, web API server failed to start"
        );
        return;
    }
    let result = net_listener(listener_cfg.host.clone(), listener_cfg.port).await;
    match result {
        Ok(b) => {
            let co = match middleware::cors(
                cfg.basepath.system.clone() + "/" + listener_cfg.cors.as_str(),
            ) {
                Ok(v) => v,
                Err(e) => {
                    app_log_event!(
                        log_ctx_p,
                        AppLogLevel::ERROR,
                        "cors layer init error, detail: {}",
                        e
                    );
                    CorsLayer::new()
                }
            };
            let reqlm = middleware::req_body_limit(cfg.api_server.limit_req_body_in_bytes);
            let connlm = middleware::conn_limit(listener_cfg.max_connections);
            let sh_detect = middleware::ShutdownDetectionLayer::new(
                shr_state.shutdown(),
                shr_state.num_requests(),
            );
            let middlewares = ServiceBuilder::new()
                .layer(sh_detect)
                .layer(connlm)
                .layer(reqlm)
                .layer(co);
            let service = service.layer(middlewares);
            app_log_event!(
                log_ctx_p,
                AppLogLevel::INFO,
                "application started, service:{}",
                app_meta::LABEL
            );
            let sr = axum::serve(b, service.into_make_service())
                .with_graceful_shutdown(shutdown_signal(shr_state.clone()));
            if let Err(e) = sr.await {
                app_log_event!(log_ctx_p, AppLogLevel::ERROR, "API server error, {}", e);
            }
            let num_remain = shr_state.num_requests().load(Ordering::Relaxed);
            app_log_event!(
                log_ctx_p,
                AppLogLevel::INFO,
                "application terminating, residual requests:{}",
                num_remain
            );
        }
        Err(e) => {
            app_log_event!(
                log_ctx_p,
                AppLogLevel::ERROR,
                "API server failed to start, {} ",
                e
            );
        }
    }
} // end of fn start_server

async fn shutdown_signal(shr_state: AppSharedState) {
    let log_ctx_p = shr_state.log_context().clone();
    if let Err(e) = tokio::signal::ctrl_c().await {
        app_log_event!(
            log_ctx_p,
            AppLogLevel::ERROR,
            "shutdown signal listener error, {}",
            e
        );
    }
    shr_state.shutdown().store(true, Ordering::Relaxed);
    app_log_event!(
        log_ctx_p,
        AppLogLevel::WARNING,
        "shutdown signal received, draining requests"
    );
}

fn start_async_runtime(cfg: AppConfig) {
    let log_ctx = AppLogContext::new(&cfg.basepath, &cfg.api_server.logging);
    let shr_state = AppSharedState::new(cfg, log_ctx);
    let cfg = shr_state.config().clone();
    let log_ctx = shr_state.log_context().clone();
    let log_ctx2 = log_ctx.clone();
    let stack_nbytes: usize = (cfg.api_server.stack_sz_kb as usize) << 10;
    let result = RuntimeBuilder::new_multi_thread()
        .worker_threads(cfg.api_server.num_workers as usize)
        .on_thread_start(move || {
            // this `Fn()` closure will be invoked several times by new thread,
            // depending on number of work threads in the application, all variables
            // moved into this closure have to be clonable.
            let log_cpy = log_ctx.clone();
            app_log_event!(log_cpy, AppLogLevel::INFO, "[API server] worker started");
        })
        .on_thread_stop(move || {
            let log_cpy = log_ctx2.clone();
            app_log_event!(log_cpy, AppLogLevel::INFO, "[API server] worker terminating");
        })
        .thread_stack_size(stack_nbytes)
        .thread_name("web-api-worker")
        // manage low-level I/O drivers used by network types
        .enable_io()
        .enable_time()
        .build();
    match result {
        Ok(rt) => {
            // new worker threads spawned
            rt.block_on(async move {
                start_server(shr_state).await;
            }); // runtime started
        }
        Err(e) => {
            let log_ctx_p = shr_state.log_context();
            app_log_event!(
                log_ctx_p,
                AppLogLevel::ERROR,
                "async runtime failed to build, {} ",
                e
            );
        }
    };
} // end of fn start_async_runtime

fn main() {
    let iter = env::vars().filter(|(k, _v)| EXPECTED_ENV_VAR_LABELS.contains(&k.as_str()));
    let arg_map: HashMap<String, String, RandomState> = HashMap::from_iter(iter);
    match AppConfig::new(arg_map) {
        Ok(cfg) => start_async_runtime(cfg),
        Err(e) => {
            println!("app failed to configure, error code: {} ", e);
        }
    };
} // end of main
