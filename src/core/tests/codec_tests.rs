use crate::core::codec::{decode_password, encode_password, DecodeError};

#[test]
fn test_round_trip_preserves_text() {
    let samples = [
        "",
        "s3cret",
        "pässwörd",
        "密码🔑",
        "  leading and trailing  ",
        "line\nbreak\ttab",
        "=:#!\\",
    ];

    for plain in samples {
        let stored = encode_password(plain);
        assert_eq!(decode_password(&stored).unwrap(), plain, "round trip failed for {:?}", plain);
    }
}

#[test]
fn test_encoding_is_deterministic() {
    assert_eq!(encode_password("hunter2"), encode_password("hunter2"));
}

#[test]
fn test_encoded_form_is_plain_ascii() {
    let stored = encode_password("密码🔑 with spaces");
    assert!(stored.is_ascii());
    assert!(!stored.contains(' '));
}

#[test]
fn test_malformed_values_are_errors_not_panics() {
    for stored in ["%%%", "abc", "=====", "czNjcmV0!"] {
        assert!(matches!(decode_password(stored), Err(DecodeError::Base64(_))), "{:?} should fail", stored);
    }
}
