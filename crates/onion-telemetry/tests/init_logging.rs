//! Global subscriber installation.
//!
//! Kept in its own test binary: a process can install the global subscriber
//! only once.

use onion_telemetry::{init_logging, LogConfig, LogFormat, TelemetryError};

#[test]
fn test_init_logging_once() {
    let invalid = LogConfig::default().with_level("onion=loud");
    assert!(matches!(
        init_logging(&invalid),
        Err(TelemetryError::LoggingInit(_))
    ));

    let config = LogConfig::default()
        .with_format(LogFormat::Pretty)
        .with_level("debug");
    assert!(init_logging(&config).is_ok());

    tracing::debug!(layer = "framing", "Layer resolved");

    let err = init_logging(&config).unwrap_err();
    assert!(matches!(err, TelemetryError::LoggingInit(_)));
}
