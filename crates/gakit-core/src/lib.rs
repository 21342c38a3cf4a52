//! # gakit-core
//!
//! Shared foundation for the gakit geometric algebra crates.
//!
//! Provides:
//! - `GakitError`, the error taxonomy every fallible operation reports
//! - Binomial sizing and base-2 ceiling logarithm
//! - Size limits for blades and multivectors
//! - Lexicographic enumeration of k-combinations
//! - Signed-input guards for grades and dimensions

pub mod combinatorics;
pub mod error;
pub mod prelude;

pub use combinatorics::{
    binomial, blade_counts, blade_size, ceil_log2, combinations, multivector_size, Combination, MAX_COEFFICIENTS,
};
pub use error::{checked_dim, checked_grade, checked_index, GakitError};

pub type Result<T> = std::result::Result<T, GakitError>;
