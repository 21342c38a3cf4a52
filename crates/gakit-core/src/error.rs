//! Error taxonomy for gakit.
//!
//! Three kinds, matching how a construction or mutation can fail:
//! - `TypeMismatch`: an argument of the wrong kind (non-integer grade, a
//!   string inside a coefficient list, a scalar where a basis was expected)
//! - `Domain`: the right kind of value outside its allowed range
//! - `Structural`: a grade that cannot fit the space it is placed in

/// Errors raised by gakit constructors and operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GakitError {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: &'static str, got: String },

    #[error("{0}")]
    Domain(String),

    #[error("grade {grade} exceeds the {available} basis vectors available")]
    Structural { grade: usize, available: usize },
}

impl GakitError {
    pub fn type_mismatch(expected: &'static str, got: impl Into<String>) -> Self {
        GakitError::TypeMismatch { expected, got: got.into() }
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        GakitError::Domain(msg.into())
    }

    /// Whether a caller may treat this error as "not supported" and try
    /// another strategy instead of failing.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, GakitError::TypeMismatch { .. })
    }
}

fn non_negative(value: i64, what: &str) -> crate::Result<usize> {
    usize::try_from(value).map_err(|_| GakitError::domain(format!("{what} must be non-negative, got {value}")))
}

/// Validate a signed grade coming from an untyped boundary.
pub fn checked_grade(value: i64) -> crate::Result<usize> {
    non_negative(value, "grade")
}

/// Validate a signed dimension coming from an untyped boundary.
pub fn checked_dim(value: i64) -> crate::Result<usize> {
    non_negative(value, "dim")
}

/// Validate a signed basis index coming from an untyped boundary.
pub fn checked_index(value: i64) -> crate::Result<usize> {
    non_negative(value, "index")
}
