//! Convenience re-exports for common gakit-core items.
//!
//! ```rust
//! use gakit_core::prelude::*;
//! ```

pub use crate::binomial;
pub use crate::blade_size;
pub use crate::combinations;
pub use crate::GakitError;
pub use crate::Result;
