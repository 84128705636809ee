use super::*;

#[test]
fn payload_carries_trimmed_fields_and_subject() {
    let config = RelayConfig::new("key-123");
    let form = ContactForm::new("  Jane Doe ", "jane@example.com\n", "Hello there, friend.");
    let payload = config.payload(&form);
    assert_eq!(payload.name, "Jane Doe");
    assert_eq!(payload.email, "jane@example.com");
    assert_eq!(payload.subject, DEFAULT_SUBJECT);

    let json = serde_json::to_value(&payload).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    for key in ["access_key", "name", "email", "message", "subject"] {
        assert!(keys.contains(&key), "missing {key}");
    }
}

#[test]
fn response_tolerates_extra_fields() {
    let reply: RelayResponse =
        serde_json::from_str(r#"{"success":false,"message":"bad key","data":{}}"#).unwrap();
    assert!(!reply.success);
    assert_eq!(reply.message.as_deref(), Some("bad key"));

    let bare: RelayResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
    assert!(bare.success);
}

#[test]
fn config_defaults_and_validation() {
    let config: RelayConfig = serde_json::from_str(r#"{"access_key":"k"}"#).unwrap();
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert!(config.validate().is_ok());

    assert!(RelayConfig::new("  ").validate().is_err());
    let mut bad = RelayConfig::new("k");
    bad.endpoint = "ftp://example.com".into();
    assert!(bad.validate().is_err());
}
