//! Error types for the Electra tutor engine.
//!
//! This module provides a unified error type [`TutorError`] that covers
//! every error condition the engine can report: unknown topology names,
//! inconsistent circuit specs, grading requests without a circuit and
//! malformed answer sheets.
//!
//! The analyzer itself is infallible. A spec missing a field its topology
//! needs is analyzed to [`NotApplicable`]; the validation errors below are
//! only produced by [`validate_spec`](crate::circuit::validate_spec).
//!
//! [`NotApplicable`]: crate::analysis::AnalysisResult::NotApplicable

use thiserror::Error;

use crate::circuit::Topology;

/// Result type alias using [`TutorError`].
pub type Result<T> = std::result::Result<T, TutorError>;

/// Unified error type for all Electra operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TutorError {
    // ============ Topology Errors ============
    /// Topology name that names none of the supported circuits
    #[error("Unknown circuit type '{name}'")]
    UnknownTopology { name: String },

    // ============ Spec Validation Errors ============
    /// A field the topology requires is absent
    #[error("{topology} requires '{param}'")]
    MissingParameter { topology: Topology, param: &'static str },

    /// A field the topology does not use is populated
    #[error("{topology} does not use '{param}'")]
    UnexpectedParameter { topology: Topology, param: &'static str },

    /// Parameter present but physically meaningless
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // ============ Session Errors ============
    /// Grading or reporting was requested before a circuit was generated
    #[error("No circuit has been generated yet")]
    NoCircuit,

    /// Submitted answers do not fit the current circuit
    #[error("Answer sheet mismatch: expected {expected}, found {found}")]
    AnswerMismatch { expected: String, found: String },

    // ============ Input Errors ============
    /// Text that cannot be read as a number
    #[error("Invalid number '{text}'")]
    InvalidNumber { text: String },
}

impl TutorError {
    /// Create an unknown topology error
    pub fn unknown_topology(name: impl Into<String>) -> Self {
        Self::UnknownTopology { name: name.into() }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an answer sheet mismatch error
    pub fn answer_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::AnswerMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
