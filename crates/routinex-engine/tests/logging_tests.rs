// Lifecycle logging emitted by the engine handlers.

use routinex_core::errors::ExErrorKind;
use routinex_core::logging_facility::init_test_capture;
use routinex_core::model::Actor;
use routinex_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use routinex_engine::commands::routine::{routine_create, routine_get};

#[test]
fn test_handlers_log_start_end_and_errors() {
    let capture = init_test_capture();
    let conn = routinex_store::db::open_in_memory().unwrap();

    routine_create(&conn, "Logged", &Actor::client("userX")).unwrap();
    capture.assert_event_exists("routine_create", EVENT_START);
    capture.assert_event_exists("routine_create", EVENT_END);

    let err = routine_get(&conn, "no-such-routine", &Actor::client("userX")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);

    let failures = capture.count_events(|e| {
        e.op.as_deref() == Some("routine_get")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err_code") == Some("ERR_NOT_FOUND")
    });
    assert!(failures >= 1);
}
