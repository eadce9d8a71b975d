use hamlog::logging::{LoggingError, init_logging};

// One test per binary: the subscriber is process-global.
#[test]
fn filter_errors_and_double_install_are_reported() {
    assert!(matches!(
        init_logging(Some("hamlog=loud"), "info"),
        Err(LoggingError::InvalidFilter(_))
    ));

    init_logging(Some("hamlog=debug"), "info").expect("first install");
    assert!(matches!(
        init_logging(None, "warn"),
        Err(LoggingError::Install(_))
    ));
}
