//! Device record decoding and error-code tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use devicehub_core::error::ClientCode;
use devicehub_core::{default_seed, Device, DeviceHubError};

#[test]
fn decode_full_record() {
    let d = Device::from_json(br#"{"id":4,"mac":"AA-BB","firmware":"4.1.6"}"#).unwrap();
    assert_eq!(d, Device::new(4, "AA-BB", "4.1.6"));
}

#[test]
fn missing_fields_fall_back_to_zero_values() {
    let d = Device::from_json(br#"{"firmware":"9.9.9","extra":true}"#).unwrap();
    assert_eq!(d.id, 0);
    assert_eq!(d.mac, "");
    assert_eq!(d.firmware, "9.9.9");
}

#[test]
fn malformed_body_is_bad_request_with_decoder_message() {
    let err = Device::from_json(b"{not json").expect_err("must fail");
    assert_eq!(err.client_code(), ClientCode::BadRequest);
    match err {
        DeviceHubError::BadRequest(msg) => assert!(msg.contains("line 1"), "{msg}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn wrong_field_type_is_rejected() {
    let err = Device::from_json(br#"{"id":"one"}"#).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn serializes_with_lowercase_keys() {
    let s = serde_json::to_string(&Device::new(1, "5F-33-CC-1F-43-82", "2.1.6")).unwrap();
    assert_eq!(s, r#"{"id":1,"mac":"5F-33-CC-1F-43-82","firmware":"2.1.6"}"#);
}

#[test]
fn default_seed_has_two_devices_in_order() {
    let seed = default_seed();
    assert_eq!(seed.len(), 2);
    assert_eq!(seed[0].id, 1);
    assert_eq!(seed[1].id, 2);
    assert!(seed.iter().all(|d| d.firmware == "2.1.6"));
}

#[test]
fn client_codes_are_stable() {
    assert_eq!(DeviceHubError::NotFound.client_code().as_str(), "NOT_FOUND");
    assert_eq!(
        DeviceHubError::MethodNotAllowed { allow: "PUT" }.client_code().as_str(),
        "METHOD_NOT_ALLOWED"
    );
    assert_eq!(DeviceHubError::UnsupportedVersion.client_code().as_str(), "UNSUPPORTED_VERSION");
    assert_eq!(DeviceHubError::Internal("x".into()).client_code().as_str(), "INTERNAL");
}
