use warehouse::logging::{app_log_event, AppLogLevel};

use crate::ut_setup_share_state;

#[tokio::test]
async fn assigner_lookup() {
    let shr_state = ut_setup_share_state("config_ok.json");
    let log_ctx = shr_state.log_context().clone();
    let result = log_ctx.get_assigner("warehouse::usecase::edit_order_detail");
    assert!(result.is_some());
    let result = log_ctx.get_assigner("warehouse::no::such::module");
    assert!(result.is_none());
}

#[tokio::test]
async fn emit_event_through_dispatcher() {
    // the alias `unittest::logging` in the example config matches the
    // module path of this test file
    let shr_state = ut_setup_share_state("config_ok.json");
    let log_ctx = shr_state.log_context().clone();
    assert!(log_ctx.get_assigner(module_path!()).is_some());
    app_log_event!(log_ctx, AppLogLevel::DEBUG, "unit test debug event {}", 123);
    app_log_event!(log_ctx, AppLogLevel::INFO, "unit test info event");
    app_log_event!(log_ctx, AppLogLevel::WARNING, "unit test warning event");
    app_log_event!(log_ctx, AppLogLevel::ERROR, "unit test error event");
}

mod fallback_case {
    use warehouse::logging::{app_log_event, AppLogLevel};

    use crate::ut_setup_share_state;

    #[tokio::test]
    async fn emit_event_fallback() {
        // no logger is configured for this inner module path, the event
        // falls back to stdout instead of panicking
        let shr_state = ut_setup_share_state("config_ok.json");
        let log_ctx = shr_state.log_context().clone();
        assert!(log_ctx.get_assigner(module_path!()).is_none());
        app_log_event!(log_ctx, AppLogLevel::INFO, "fallback event");
    }
}
