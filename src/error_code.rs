//! 探针错误分类：把远端调用失败映射为固定的诊断类别。
//!
//! Probe error taxonomy.
//!
//! Every failure a probe can observe ends up in exactly one [`ProbeErrorKind`].
//! Classification prefers structured data (HTTP status, Google RPC status) and
//! only inspects the human-readable message when neither is available.
//!
//! ## Codes
//!
//! | Code  | Name                 | Meaning                                    |
//! |-------|----------------------|--------------------------------------------|
//! | P1001 | missing_credential   | Credential variable unset or empty         |
//! | P1002 | client_construction  | Client could not be built                  |
//! | P2001 | not_found            | Model or endpoint does not exist (404)     |
//! | P2002 | permission_denied    | Credential lacks access (403)              |
//! | P2003 | authentication       | Credential rejected (401)                  |
//! | P3001 | empty_response       | Call succeeded but carried no text         |
//! | P9999 | call_failed          | Anything else                              |
//!
//! ## Example
//!
//! ```rust
//! use genai_probe::error_code::ProbeErrorKind;
//!
//! let kind = ProbeErrorKind::from_message("permission denied (403)");
//! assert_eq!(kind, ProbeErrorKind::PermissionDenied);
//! assert_eq!(kind.code(), "P2002");
//! ```

use crate::Error;
use std::fmt;

/// Diagnostic category of a probe failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeErrorKind {
    /// P1001: Credential environment variable unset or empty
    MissingCredential,
    /// P1002: Client construction failed (bad key, bad base URL, TLS setup)
    ClientConstruction,
    /// P2001: Requested model or endpoint does not exist
    NotFound,
    /// P2002: Valid credential but insufficient permissions
    PermissionDenied,
    /// P2003: Invalid, expired, or rejected credential
    Authentication,
    /// P3001: The call succeeded but the response had no text
    EmptyResponse,
    /// P9999: Failure that fits none of the categories above
    CallFailed,
}

impl ProbeErrorKind {
    /// Returns the code string (e.g., `"P2001"`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential => "P1001",
            Self::ClientConstruction => "P1002",
            Self::NotFound => "P2001",
            Self::PermissionDenied => "P2002",
            Self::Authentication => "P2003",
            Self::EmptyResponse => "P3001",
            Self::CallFailed => "P9999",
        }
    }

    /// Returns the snake_case name (e.g., `"not_found"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::ClientConstruction => "client_construction",
            Self::NotFound => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::Authentication => "authentication",
            Self::EmptyResponse => "empty_response",
            Self::CallFailed => "call_failed",
        }
    }

    /// Maps an HTTP status to a remote-call category, if it has one.
    pub fn from_http_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(Self::Authentication),
            403 => Some(Self::PermissionDenied),
            404 => Some(Self::NotFound),
            _ => None,
        }
    }

    /// Maps a Google RPC status string to a remote-call category, if it has one.
    pub fn from_rpc_status(rpc_status: &str) -> Option<Self> {
        match rpc_status {
            "NOT_FOUND" => Some(Self::NotFound),
            "PERMISSION_DENIED" => Some(Self::PermissionDenied),
            "UNAUTHENTICATED" => Some(Self::Authentication),
            _ => None,
        }
    }

    /// Classifies a failure by its message text alone.
    ///
    /// Checked in order: `404`/`not found`, `403`/`permission`, `401`.
    /// Keyword matches are case-insensitive.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("404") || lower.contains("not found") {
            Self::NotFound
        } else if lower.contains("403") || lower.contains("permission") {
            Self::PermissionDenied
        } else if lower.contains("401") {
            Self::Authentication
        } else {
            Self::CallFailed
        }
    }

    /// Classifies a library error, structured fields first.
    pub fn classify(err: &Error) -> Self {
        match err {
            Error::MissingCredential { .. } => return Self::MissingCredential,
            Error::Configuration { .. } => return Self::ClientConstruction,
            _ => {}
        }
        err.status()
            .and_then(Self::from_http_status)
            .or_else(|| err.rpc_status().and_then(Self::from_rpc_status))
            .unwrap_or_else(|| Self::from_message(&err.to_string()))
    }
}

impl fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
