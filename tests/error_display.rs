use dte_lib::error::ErrorCategory;
use dte_lib::DteError;

#[test]
fn config_error_display_includes_message() {
    let err = DteError::Config("unknown analyzer".to_string());

    assert_eq!(format!("{}", err), "Configuration error: unknown analyzer");
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: DteError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
    assert_eq!(err.to_payload().category, ErrorCategory::Io);
}

#[test]
fn capture_helper_formats_message() {
    let err = DteError::capture("Capture file not found: page.json");

    assert_eq!(
        format!("{}", err),
        "Invalid capture: Capture file not found: page.json"
    );
}

#[test]
fn serialization_error_display_wraps_source() {
    let err: DteError = serde_json::from_str::<serde_json::Value>("[1,")
        .unwrap_err()
        .into();

    assert!(format!("{}", err).starts_with("Serialization error: "));
}

#[test]
fn unknown_error_payload_suggests_verbose_rerun() {
    let payload = DteError::Unknown("boom".to_string()).to_payload();

    assert_eq!(payload.category, ErrorCategory::Unknown);
    assert_eq!(payload.message, "boom");
    assert!(payload
        .remediation
        .as_deref()
        .is_some_and(|r| r.contains("--verbose")));
}

#[test]
fn payload_serializes_lowercase_category() {
    let payload = DteError::Config("bad".to_string()).to_payload();
    let json = serde_json::to_value(&payload).expect("serialize payload");

    assert_eq!(json["category"], "config");
    assert_eq!(json["message"], "bad");
}
