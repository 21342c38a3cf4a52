//! Basis vectors and basis blade labels of the Euclidean algebra.
//!
//! A basis label such as e₀₂ is an ascending list of basis indices. Two
//! labels combine under the +1 orthonormal signature:
//! - equal indices contract (eᵢeᵢ = +1)
//! - unequal indices anticommute (eᵢeⱼ = -eⱼeᵢ)
//!
//! `BasisLabel::combine` is the only place a sign is derived from these
//! rules; everything else asks it.

use std::fmt;

use gakit_core::{checked_index, Combination, GakitError, Result};
use smallvec::SmallVec;

/// Sign result from multiplying two basis blades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Sign {
    Pos,
    Neg,
    /// The product vanishes (a wedge of overlapping labels).
    Zero,
}

impl Sign {
    /// `1.0`, `-1.0` or `0.0`.
    pub fn as_f64(self) -> f64 {
        match self {
            Sign::Pos => 1.0,
            Sign::Neg => -1.0,
            Sign::Zero => 0.0,
        }
    }

    /// Opposite sign. `Zero` stays `Zero`.
    pub fn flip(self) -> Self {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
            Sign::Zero => Sign::Zero,
        }
    }

    /// Scale a coefficient by this sign. Negating a zero yields `+0.0`.
    pub fn apply(self, coeff: f64) -> f64 {
        match self {
            Sign::Pos => coeff,
            Sign::Neg => 0.0 - coeff,
            Sign::Zero => 0.0,
        }
    }
}

impl std::ops::Mul for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Sign {
        match (self, rhs) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (Sign::Pos, s) | (s, Sign::Pos) => s,
            (Sign::Neg, Sign::Neg) => Sign::Pos,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Pos => write!(f, "+"),
            Sign::Neg => write!(f, "-"),
            Sign::Zero => write!(f, "0"),
        }
    }
}

/// One orthonormal basis vector eᵢ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BasisIndex(usize);

impl BasisIndex {
    /// Basis vector `e{index}`.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the basis vector, starting at 0.
    pub fn index(self) -> usize {
        self.0
    }

    /// Product of two basis vectors: contraction when equal, wedge otherwise.
    pub fn combine(self, other: BasisIndex) -> (Sign, BasisLabel) {
        BasisLabel::from(self).combine(&BasisLabel::from(other))
    }
}

impl TryFrom<i64> for BasisIndex {
    type Error = GakitError;

    fn try_from(value: i64) -> Result<Self> {
        checked_index(value).map(BasisIndex)
    }
}

impl fmt::Display for BasisIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// An elementary basis blade: strictly ascending basis indices.
///
/// The empty label is the scalar unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BasisLabel {
    indices: SmallVec<[BasisIndex; 4]>,
}

impl BasisLabel {
    /// The scalar label (no basis vectors).
    pub fn scalar() -> Self {
        Self::default()
    }

    /// Build a label from indices that must already be strictly ascending.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Result<Self> {
        let indices: SmallVec<[BasisIndex; 4]> = indices.into_iter().map(BasisIndex).collect();
        if let Some(w) = indices.windows(2).find(|w| w[0] >= w[1]) {
            return Err(GakitError::domain(format!(
                "basis label indices must be strictly ascending, found {} before {}",
                w[0].0, w[1].0
            )));
        }
        Ok(Self { indices })
    }

    pub(crate) fn from_combination(combo: &Combination) -> Self {
        Self {
            indices: combo.iter().copied().map(BasisIndex).collect(),
        }
    }

    /// Basis vectors of the label, strictly ascending.
    pub fn indices(&self) -> &[BasisIndex] {
        &self.indices
    }

    /// Number of basis vectors in the label.
    pub fn grade(&self) -> usize {
        self.indices.len()
    }

    /// True for the empty label `e`.
    pub fn is_scalar(&self) -> bool {
        self.indices.is_empty()
    }

    /// Geometric product of two basis blades under the +1 signature.
    ///
    /// Concatenates both index lists and bubble-sorts them: every swap of two
    /// unequal neighbours flips the sign, every adjacent equal pair contracts
    /// to +1 and is removed.
    pub fn combine(&self, other: &BasisLabel) -> (Sign, BasisLabel) {
        let mut merged: SmallVec<[BasisIndex; 8]> =
            self.indices.iter().chain(other.indices.iter()).copied().collect();
        let mut sign = Sign::Pos;

        loop {
            let mut changed = false;
            let mut i = 0;
            while i + 1 < merged.len() {
                if merged[i] == merged[i + 1] {
                    merged.drain(i..i + 2);
                    changed = true;
                } else if merged[i] > merged[i + 1] {
                    merged.swap(i, i + 1);
                    sign = sign.flip();
                    changed = true;
                    i += 1;
                } else {
                    i += 1;
                }
            }
            if !changed {
                break;
            }
        }

        let result = BasisLabel {
            indices: merged.into_iter().collect(),
        };
        tracing::trace!("{} * {} = {}{}", self, other, sign, result);
        (sign, result)
    }

    /// Outer product: the geometric product when the labels are disjoint,
    /// `Sign::Zero` with the scalar label when they share any index.
    pub fn wedge(&self, other: &BasisLabel) -> (Sign, BasisLabel) {
        if self.indices.iter().any(|i| other.indices.contains(i)) {
            return (Sign::Zero, BasisLabel::scalar());
        }
        self.combine(other)
    }

    /// Products of every basis vector of `self` with every basis vector of
    /// `other`, row-major.
    pub fn combine_all(&self, other: &BasisLabel) -> Vec<(Sign, BasisLabel)> {
        self.indices
            .iter()
            .flat_map(|&a| other.indices.iter().map(move |&b| a.combine(b)))
            .collect()
    }
}

impl From<BasisIndex> for BasisLabel {
    fn from(index: BasisIndex) -> Self {
        Self {
            indices: smallvec::smallvec![index],
        }
    }
}

impl fmt::Display for BasisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e")?;
        for i in &self.indices {
            write!(f, "{}", i.0)?;
        }
        Ok(())
    }
}

/// Anything that may show up as a factor next to a basis blade.
#[derive(Debug, Clone, PartialEq)]
pub enum BasisOperand {
    Basis(BasisLabel),
    Scalar(f64),
}

impl From<BasisLabel> for BasisOperand {
    fn from(label: BasisLabel) -> Self {
        BasisOperand::Basis(label)
    }
}

impl From<BasisIndex> for BasisOperand {
    fn from(index: BasisIndex) -> Self {
        BasisOperand::Basis(index.into())
    }
}

impl From<f64> for BasisOperand {
    fn from(value: f64) -> Self {
        BasisOperand::Scalar(value)
    }
}

/// Combine two operands as basis blades.
///
/// A non-basis operand is a `TypeMismatch`; callers can check
/// [`GakitError::is_unsupported`] and fall back to scalar handling.
pub fn combine_operands(a: &BasisOperand, b: &BasisOperand) -> Result<(Sign, BasisLabel)> {
    match (a, b) {
        (BasisOperand::Basis(a), BasisOperand::Basis(b)) => Ok(a.combine(b)),
        (BasisOperand::Scalar(s), _) | (_, BasisOperand::Scalar(s)) => {
            Err(GakitError::type_mismatch("basis blade", format!("scalar {s}")))
        }
    }
}
