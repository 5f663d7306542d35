//! # Errors
//!
//! HRMS carries one structured error type through every layer.
//! Core goals:
//! - a small, closed set of kinds, each with a fixed HTTP status
//! - tenant-scope violations look exactly like missing records
//! - transport-agnostic (the axum crate decides how to serialize)
//!
//! Crate-local errors (`StoreError`, `AuthError`) convert into [`HrError`]
//! through `From`, so `?` works across crate boundaries.

use std::fmt;

use anyhow::Error as AnyError;

/// A convenience result type for HRMS APIs.
pub type HrResult<T> = std::result::Result<T, HrError>;

/// Error classes + status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,       // 400
    Conflict,         // 400
    NotAuthenticated, // 401
    NotFound,         // 404
    Persistence,      // 500
    General,          // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Conflict => 400,
            ErrorKind::NotAuthenticated => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Persistence => 500,
            ErrorKind::General => 500,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Conflict => "ConflictError",
            ErrorKind::NotAuthenticated => "AuthError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Persistence => "PersistenceError",
            ErrorKind::General => "GeneralError",
        }
    }

    /// Server-side failures never expose their message to clients.
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

/// A structured HRMS error.
///
/// - kind (and therefore HTTP status)
/// - message (client-facing for 4xx)
/// - source (operational detail, never serialized)
#[derive(Debug)]
pub struct HrError {
    pub kind: ErrorKind,
    pub message: String,
    pub source: Option<AnyError>,
}

impl HrError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<AnyError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Turn any error into an HrError:
    /// - if it's already an HrError somewhere in the chain, keep its kind and message
    /// - otherwise wrap as General
    pub fn normalize(err: AnyError) -> HrError {
        match err.downcast::<HrError>() {
            Ok(hr) => hr,
            Err(other) => {
                if let Some(hr) = other.chain().find_map(|e| e.downcast_ref::<HrError>()) {
                    return HrError::new(hr.kind, hr.message.clone());
                }
                HrError::new(ErrorKind::General, other.to_string()).with_source(other)
            }
        }
    }

    /// The message that may be shown to a client.
    pub fn client_message(&self) -> &str {
        if self.kind.is_server_error() {
            "Internal Server Error"
        } else {
            &self.message
        }
    }

    // ---- Constructors ----

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, msg)
    }
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, msg)
    }
    pub fn not_authenticated(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAuthenticated, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Persistence, msg)
    }
    pub fn general(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::General, msg)
    }
}

impl fmt::Display for HrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for HrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<AnyError> for HrError {
    fn from(err: AnyError) -> Self {
        HrError::normalize(err)
    }
}

impl HrError {
    /// The uniform `{ message }` error body.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "message": self.client_message() })
    }
}

impl From<serde_json::Error> for HrError {
    fn from(err: serde_json::Error) -> Self {
        HrError::general("JSON encoding failed").with_source(err)
    }
}

/// Convenience helper for "bail with HrError".
#[macro_export]
macro_rules! bail_hr {
    ($ctor:ident, $msg:expr) => {
        return Err($crate::errors::HrError::$ctor($msg))
    };
    ($ctor:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::HrError::$ctor(format!($fmt, $($arg)*)))
    };
}
