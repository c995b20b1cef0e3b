//! ## Errors
//!
//! This module defines the errors surfaced by the index. Both `insert` and `load` are
//! atomic: on an `ExtractorFailure` the index is left exactly as it was found.

use std::error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors raised by `rbush`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
pub enum RbushError {
    /// The user-supplied `Extractor` produced an ill-formed rectangle (a NaN coordinate,
    /// or `min > max` on some axis), or otherwise signaled failure.
    ExtractorFailure {
        /// Human-readable description of what went wrong.
        reason: String,
    },
    /// A serialized document failed structural validation before any mutation occurred.
    MalformedDocument {
        /// Human-readable description of the structural problem.
        reason: String,
    },
}

impl fmt::Display for RbushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RbushError::ExtractorFailure { reason } => {
                write!(f, "extractor failed to produce a bounding rectangle: {reason}")
            }
            RbushError::MalformedDocument { reason } => {
                write!(f, "malformed serialized document: {reason}")
            }
        }
    }
}

impl Error for RbushError {}
