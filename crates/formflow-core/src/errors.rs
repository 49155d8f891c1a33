// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::DependencyFailure => "dependency_failure",
            Self::Internal => "internal",
        }
    }
}

/// Machine-readable failure classes shared by the store, API and CLI layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum ErrorCode {
    ValidationFailed,
    MissingField,
    InvalidQueryParameter,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    AlreadySubmitted,
    UpstreamUnavailable,
    Internal,
}

pub const ERROR_CODES: [ErrorCode; 10] = [
    ErrorCode::ValidationFailed,
    ErrorCode::MissingField,
    ErrorCode::InvalidQueryParameter,
    ErrorCode::Unauthorized,
    ErrorCode::Forbidden,
    ErrorCode::NotFound,
    ErrorCode::Conflict,
    ErrorCode::AlreadySubmitted,
    ErrorCode::UpstreamUnavailable,
    ErrorCode::Internal,
];

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "validation_failed",
            Self::MissingField => "missing_field",
            Self::InvalidQueryParameter => "invalid_query_parameter",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::AlreadySubmitted => "already_submitted",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::Internal => "internal",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        ERROR_CODES.into_iter().find(|c| c.as_str() == raw)
    }

    #[must_use]
    pub const fn exit_code(self) -> ExitCode {
        match self {
            Self::ValidationFailed
            | Self::MissingField
            | Self::InvalidQueryParameter
            | Self::AlreadySubmitted => ExitCode::Validation,
            Self::UpstreamUnavailable => ExitCode::DependencyFailure,
            Self::Unauthorized | Self::Forbidden | Self::NotFound | Self::Conflict => {
                ExitCode::Usage
            }
            Self::Internal => ExitCode::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: ErrorCode, message: &str) -> Self {
        Self {
            code: code.as_str().to_string(),
            message: message.to_string(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for MachineError {}
