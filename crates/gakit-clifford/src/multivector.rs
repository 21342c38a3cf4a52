//! Multivector: the general element of the algebra.
//!
//! A multivector of dimension n is the direct sum of one blade per grade:
//! M = ⟨M⟩₀ + ⟨M⟩₁ + … + ⟨M⟩ₙ, holding `Σ C(n, k) = 2ⁿ` coefficients.
//! The flat layout used by [`Multivector::from_flat`] and
//! [`Multivector::coefficients`] lists grades in ascending order, each grade
//! in lexicographic label order:
//!
//! ```text
//! dim 2:  [ 1 | e0 e1 | e01 ]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use gakit_core::{binomial, ceil_log2, checked_grade, multivector_size, GakitError, Result};

use crate::basis::Sign;
use crate::blade::Blade;
use crate::input::{Coefficients, MultivectorInput};
use crate::render::{render_list, render_terms};

/// A multivector: one blade for every grade `0..=dim`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Multivector {
    dim: usize,
    grades: BTreeMap<usize, Blade>,
}

impl Multivector {
    /// The zero multivector of dimension `dim`.
    pub fn zero(dim: usize) -> Result<Self> {
        multivector_size(dim)?;
        Ok(Self::from_grown_blades(dim, []))
    }

    /// Build from either input form.
    pub fn build(input: MultivectorInput) -> Result<Self> {
        match input {
            MultivectorInput::FromScalars { coefficients, dim } => Self::from_flat(coefficients, dim),
            MultivectorInput::FromMapping(mapping) => Self::from_map(mapping),
        }
    }

    /// Split flat coefficients into grades.
    ///
    /// The minimal dimension is `ceil(log2(count))`; the coefficients are
    /// zero-extended to `2^dim` and sliced into chunks of `C(dim, 0)`,
    /// `C(dim, 1)`, … in ascending grade order. A `dim` below the minimal
    /// dimension is a `Domain` error, as is a dimension whose `2^dim`
    /// exceeds [`gakit_core::MAX_COEFFICIENTS`].
    pub fn from_flat(coefficients: impl Into<Coefficients>, dim: Option<usize>) -> Result<Self> {
        let coeffs = coefficients.into().into_vec();
        let minimal = ceil_log2(coeffs.len());
        let dim = match dim {
            Some(d) if d < minimal => {
                return Err(GakitError::domain(format!(
                    "dim must be >= {minimal} to hold {} coefficients, got {d}",
                    coeffs.len()
                )));
            }
            Some(d) => d,
            None => minimal,
        };
        multivector_size(dim)?;
        tracing::debug!(count = coeffs.len(), minimal, dim, "multivector from flat coefficients");
        Ok(Self::split_flat(coeffs, dim))
    }

    /// Build from an explicit grade → coefficients mapping.
    ///
    /// Negative grades are a `Domain` error. The dimension is the smallest
    /// that fits every key and every grade's coefficients; grades that are
    /// not named are zero. A dimension past the size limit is a `Domain`
    /// error, raised before any blade is built.
    pub fn from_map<I, C>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, C)>,
        C: Into<Coefficients>,
    {
        let mut entries: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
        for (key, coeffs) in mapping {
            let grade = checked_grade(key)?;
            if entries.insert(grade, coeffs.into().into_vec()).is_some() {
                return Err(GakitError::domain(format!("grade {grade} given twice")));
            }
        }

        let dim = entries
            .iter()
            .map(|(&grade, coeffs)| grade.max(Blade::minimal_dim(grade, coeffs.len())))
            .max()
            .unwrap_or(0);
        multivector_size(dim)?;
        tracing::debug!(grades = entries.len(), dim, "multivector from grade mapping");

        let blades = entries
            .into_iter()
            .map(|(grade, coeffs)| Blade::new(grade, coeffs, Some(dim)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_grown_blades(dim, blades))
    }

    /// Assemble blades of distinct grades, growing all of them to the largest
    /// dimension among them.
    pub fn from_blades(blades: impl IntoIterator<Item = Blade>) -> Result<Self> {
        let blades: Vec<Blade> = blades.into_iter().collect();
        let dim = blades.iter().map(Blade::dim).max().unwrap_or(0);
        let mut seen = BTreeSet::new();
        for b in &blades {
            if !seen.insert(b.grade()) {
                return Err(GakitError::domain(format!("grade {} given twice", b.grade())));
            }
        }
        multivector_size(dim)?;
        Ok(Self::from_grown_blades(dim, blades.iter().map(|b| b.grown(dim))))
    }

    /// Caller guarantees every blade has dimension `dim` and grades are distinct.
    pub(crate) fn from_grown_blades(dim: usize, blades: impl IntoIterator<Item = Blade>) -> Self {
        let mut grades: BTreeMap<usize, Blade> = blades.into_iter().map(|b| (b.grade(), b)).collect();
        for grade in 0..=dim {
            grades.entry(grade).or_insert_with(|| Blade::zero(grade, dim));
        }
        Self { dim, grades }
    }

    /// Caller guarantees `multivector_size(dim)` succeeded and
    /// `coeffs.len() <= 2^dim`.
    fn split_flat(mut coeffs: Vec<f64>, dim: usize) -> Self {
        coeffs.resize(multivector_size(dim).unwrap_or(0), 0.0);
        let mut grades = BTreeMap::new();
        let mut start = 0;
        for grade in 0..=dim {
            let end = (start + binomial(dim, grade).unwrap_or(0)).min(coeffs.len());
            grades.insert(grade, Blade::assemble(grade, dim, coeffs[start..end].to_vec()));
            start = end;
        }
        Self { dim, grades }
    }

    /// Number of basis vectors spanning the space.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Total number of stored coefficients, always `2^dim`.
    pub fn size(&self) -> usize {
        self.grades.values().map(Blade::size).sum()
    }

    /// The grade-`grade` blade, if `grade <= dim`.
    pub fn grade(&self, grade: usize) -> Option<&Blade> {
        self.grades.get(&grade)
    }

    /// Blades in ascending grade order.
    pub fn blades(&self) -> impl Iterator<Item = &Blade> + '_ {
        self.grades.values()
    }

    /// All coefficients in flat layout.
    pub fn coefficients(&self) -> Vec<f64> {
        self.grades.values().flat_map(Blade::coefficients).collect()
    }

    /// True when every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.grades.values().all(Blade::is_zero)
    }

    /// This multivector in `dim` dimensions: every blade grown in place and
    /// the new grades added as zero. Shrinking is a `Domain` error, as is
    /// growing past [`gakit_core::MAX_COEFFICIENTS`].
    pub fn with_dim(&self, dim: usize) -> Result<Multivector> {
        if dim < self.dim {
            return Err(GakitError::domain(format!(
                "can't shrink multivector from dim {} to {dim}",
                self.dim
            )));
        }
        multivector_size(dim)?;
        Ok(Self::from_grown_blades(dim, self.grades.values().map(|b| b.grown(dim))))
    }

    /// Grow in place. Leaves `self` untouched on error.
    pub fn set_dim(&mut self, dim: usize) -> Result<()> {
        *self = self.with_dim(dim)?;
        Ok(())
    }

    /// Additive inverse of every coefficient.
    pub fn negate(&self) -> Multivector {
        Multivector {
            dim: self.dim,
            grades: self.grades.iter().map(|(&g, b)| (g, b.negate())).collect(),
        }
    }

    /// Reversion by cumulative sign.
    ///
    /// Walks grades upwards with a sign that starts positive and flips at
    /// every nonzero even grade, never resetting. Grades 0..=7 get
    /// `+ + - - + + - -`, the same pattern as (-1)^(k(k-1)/2).
    pub fn reverse(&self) -> Multivector {
        let mut sign = Sign::Pos;
        let mut flat = Vec::with_capacity(self.size());
        for (&grade, blade) in &self.grades {
            if grade != 0 && grade % 2 == 0 {
                sign = sign.flip();
            }
            flat.extend(blade.coefficients().map(|c| sign.apply(c)));
        }
        Self::split_flat(flat, self.dim)
    }

    /// Grade-wise sum.
    ///
    /// The operand with more coefficients sets the dimension; the other one's
    /// grades are zero-padded position by position to match.
    pub fn add(&self, other: &Multivector) -> Multivector {
        let (larger, smaller) = if self.size() > other.size() { (self, other) } else { (other, self) };
        let grades = larger
            .grades
            .iter()
            .map(|(&grade, blade)| {
                let mut coeffs: Vec<f64> = blade.coefficients().collect();
                if let Some(small) = smaller.grades.get(&grade) {
                    for (acc, c) in coeffs.iter_mut().zip(small.coefficients()) {
                        *acc += c;
                    }
                }
                (grade, Blade::assemble(grade, larger.dim, coeffs))
            })
            .collect();
        Multivector { dim: larger.dim, grades }
    }

    /// `self + (-other)`.
    pub fn sub(&self, other: &Multivector) -> Multivector {
        self.add(&other.negate())
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: f64) -> Multivector {
        Multivector {
            dim: self.dim,
            grades: self.grades.iter().map(|(&g, b)| (g, b.scale(factor))).collect(),
        }
    }

    /// ```text
    /// Multivector(1^e + 2^e0, dim = 1)
    ///   0 -> [1]
    ///   1 -> [2]
    /// ```
    pub fn repr(&self) -> String {
        let mut out = format!("Multivector({}, dim = {})", self, self.dim);
        for (grade, blade) in &self.grades {
            out.push_str(&format!("\n  {} -> {}", grade, render_list(blade.coefficients())));
        }
        out
    }
}

impl fmt::Display for Multivector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_terms(self.grades.values().flat_map(Blade::terms)))
    }
}

// Arithmetic: Add, Sub, Neg, scalar Mul
impl std::ops::Add for &Multivector {
    type Output = Multivector;
    fn add(self, rhs: &Multivector) -> Multivector {
        Multivector::add(self, rhs)
    }
}

impl std::ops::Sub for &Multivector {
    type Output = Multivector;
    fn sub(self, rhs: &Multivector) -> Multivector {
        Multivector::sub(self, rhs)
    }
}

impl std::ops::Neg for &Multivector {
    type Output = Multivector;
    fn neg(self) -> Multivector {
        self.negate()
    }
}

impl std::ops::Mul<f64> for &Multivector {
    type Output = Multivector;
    fn mul(self, factor: f64) -> Multivector {
        self.scale(factor)
    }
}
