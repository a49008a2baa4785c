use crate::driver::DriverError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable classification.
/// Configuration and programming mistakes surface here instead of panicking;
/// driver failures are wrapped once and keep the original error as `source`.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    #[source]
    pub source: Option<DriverError>,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            source: None,
        }
    }

    /// Construct a value-container type mismatch.
    pub(crate) fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::TypeMismatch, ErrorOrigin::Values, message)
    }

    /// Construct a "no value available" error for an unregistered column key.
    pub(crate) fn missing_value(column: &str) -> Self {
        Self::new(
            ErrorClass::MissingValue,
            ErrorOrigin::Values,
            format!("no value available for column '{column}'"),
        )
    }

    /// Construct a handler-origin configuration error.
    pub(crate) fn handler_config(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Configuration, ErrorOrigin::Handler, message)
    }

    /// Construct a handler-origin invariant violation.
    pub(crate) fn handler_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, ErrorOrigin::Handler, message)
    }

    /// Construct a decoder-origin invariant violation.
    pub(crate) fn decoder_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, ErrorOrigin::Decoder, message)
    }

    /// Wrap an error raised by the statement execution service.
    pub fn driver(err: impl Into<DriverError>) -> Self {
        let source = err.into();

        Self {
            class: ErrorClass::Driver,
            origin: ErrorOrigin::Driver,
            message: format!("statement execution failed: {source}"),
            source: Some(source),
        }
    }

    #[must_use]
    pub const fn is_driver(&self) -> bool {
        matches!(self.class, ErrorClass::Driver)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// A value does not match the semantic type of its column.
    TypeMismatch,
    /// A container was asked for a column it never received.
    MissingValue,
    /// Column configuration makes the operation impossible.
    Configuration,
    /// The store reported something the handler cannot have produced.
    InvariantViolation,
    /// The statement execution service failed.
    Driver,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TypeMismatch => "type_mismatch",
            Self::MissingValue => "missing_value",
            Self::Configuration => "configuration",
            Self::InvariantViolation => "invariant_violation",
            Self::Driver => "driver",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Values,
    Decoder,
    Handler,
    Driver,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Values => "values",
            Self::Decoder => "decoder",
            Self::Handler => "handler",
            Self::Driver => "driver",
        };
        write!(f, "{label}")
    }
}
