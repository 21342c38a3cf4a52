//! # gakit-clifford
//!
//! Blades and multivectors of the Euclidean geometric algebra over n
//! orthonormal basis vectors (every eᵢ squares to +1).
//!
//! Provides:
//! - Basis labels with sign-aware contraction and wedge
//! - Blades stored as coefficient/label pairs in lexicographic order
//! - Multivectors built from flat coefficients or a grade mapping
//! - Addition, negation, reversion and dimension growth
//!
//! ```rust
//! use gakit_clifford::{Blade, Multivector};
//!
//! let v = Blade::vector([3.0, -2.0], Some(2)).unwrap();
//! assert_eq!(v.to_string(), "3^e0- 2^e1");
//!
//! let m = Multivector::from_flat([1.0, 2.0, 3.0, 4.0], None).unwrap();
//! assert_eq!(m.dim(), 2);
//! ```

pub mod basis;
pub mod blade;
pub mod input;
pub mod multivector;
mod render;

pub use basis::{combine_operands, BasisIndex, BasisLabel, BasisOperand, Sign};
pub use blade::{Blade, BladeSum};
pub use input::{Coefficients, MultivectorInput};
pub use multivector::Multivector;

pub use gakit_core::{GakitError, Result};
