// SPDX-License-Identifier: Apache-2.0

use formflow_core::{ErrorCode, ExitCode, MachineError, ERROR_CODES};

#[test]
fn error_codes_roundtrip_through_strings() {
    for code in ERROR_CODES {
        assert_eq!(ErrorCode::parse(code.as_str()), Some(code));
    }
    assert_eq!(ErrorCode::parse("nope"), None);
}

#[test]
fn error_code_strings_are_unique_snake_case() {
    let mut seen = std::collections::BTreeSet::new();
    for code in ERROR_CODES {
        let s = code.as_str();
        assert!(s.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{s}");
        assert!(seen.insert(s), "duplicate {s}");
    }
}

#[test]
fn validation_codes_map_to_validation_exit() {
    assert_eq!(ErrorCode::MissingField.exit_code(), ExitCode::Validation);
    assert_eq!(ErrorCode::Internal.exit_code(), ExitCode::Internal);
    assert_eq!(ExitCode::Validation as u8, 3);
}

#[test]
fn machine_error_serializes_details() {
    let err = MachineError::new(ErrorCode::NotFound, "form not found").with_detail("id", "f1");
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["code"], "not_found");
    assert_eq!(json["details"]["id"], "f1");
    assert_eq!(err.to_string(), "not_found: form not found");
}
