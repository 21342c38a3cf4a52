//! Blade: the homogeneous-grade component of a multivector.
//!
//! A grade-k blade in an n-dimensional space holds `C(n, k)` coefficients,
//! one per k-subset of `{0, …, n-1}` in lexicographic order:
//!
//! ```text
//! grade 2, dim 3:   c₀·e01 + c₁·e02 + c₂·e12
//! ```

use std::fmt;

use gakit_core::prelude::*;

use gakit_core::multivector_size;

use crate::basis::{BasisLabel, Sign};
use crate::input::Coefficients;
use crate::multivector::Multivector;
use crate::render::{render_list, render_terms};

/// A homogeneous-grade element: coefficients paired with their basis labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Blade {
    grade: usize,
    dim: usize,
    terms: Vec<(f64, BasisLabel)>,
}

impl Blade {
    /// Build a blade of `grade` from `coefficients`.
    ///
    /// Without `dim`, the smallest dimension whose grade holds every
    /// coefficient is used. Coefficients are zero-extended to `C(dim, grade)`.
    ///
    /// Errors:
    /// - `Domain` if a scalar or pseudoscalar is given more than one coefficient
    /// - `Structural` if `grade > dim`
    /// - `Domain` if `dim` cannot hold the coefficients
    /// - `Domain` if the blade would exceed [`gakit_core::MAX_COEFFICIENTS`]
    pub fn new(grade: usize, coefficients: impl Into<Coefficients>, dim: Option<usize>) -> Result<Self> {
        let coeffs = coefficients.into().into_vec();
        let count = coeffs.len();

        if grade == 0 && count > 1 {
            return Err(GakitError::domain(format!(
                "Blade-0 can't have multiple components, got {count}"
            )));
        }

        let dim = match dim {
            Some(d) => {
                if grade > d {
                    return Err(GakitError::Structural { grade, available: d });
                }
                if grade == d && count > 1 {
                    return Err(GakitError::domain(format!(
                        "Blade-{grade} is the pseudoscalar of dim {d} and can't have multiple components, got {count}"
                    )));
                }
                if blade_size(d, grade)? < count {
                    return Err(GakitError::domain(format!(
                        "dim must be >= {} to hold {count} grade-{grade} coefficients, got {d}",
                        Self::minimal_dim(grade, count)
                    )));
                }
                d
            }
            None => {
                let d = Self::minimal_dim(grade, count);
                blade_size(d, grade)?;
                d
            }
        };

        Ok(Self::assemble(grade, dim, coeffs))
    }

    /// A grade-0 blade.
    pub fn scalar(value: f64) -> Self {
        Self::assemble(0, 0, vec![value])
    }

    /// A grade-1 blade. See [`Blade::new`].
    pub fn vector(coefficients: impl Into<Coefficients>, dim: Option<usize>) -> Result<Self> {
        Self::new(1, coefficients, dim)
    }

    /// A grade-2 blade. See [`Blade::new`].
    pub fn bivector(coefficients: impl Into<Coefficients>, dim: Option<usize>) -> Result<Self> {
        Self::new(2, coefficients, dim)
    }

    /// A grade-3 blade. See [`Blade::new`].
    pub fn trivector(coefficients: impl Into<Coefficients>, dim: Option<usize>) -> Result<Self> {
        Self::new(3, coefficients, dim)
    }

    /// All-zero blade of `grade` in `dim` dimensions. Requires `grade <= dim`.
    pub(crate) fn zero(grade: usize, dim: usize) -> Self {
        Self::assemble(grade, dim, Vec::new())
    }

    /// Smallest `n >= grade` with `C(n, grade) >= count`.
    pub fn minimal_dim(grade: usize, count: usize) -> usize {
        if grade == 0 {
            return 0;
        }
        let mut n = grade;
        while binomial(n, grade).is_some_and(|size| size < count) {
            n += 1;
        }
        n
    }

    /// Pair zero-extended coefficients with the lexicographic labels.
    /// Caller guarantees `blade_size(dim, grade)` succeeded and
    /// `coeffs.len() <= C(dim, grade)`.
    pub(crate) fn assemble(grade: usize, dim: usize, mut coeffs: Vec<f64>) -> Self {
        let size = binomial(dim, grade).unwrap_or(0);
        debug_assert!(coeffs.len() <= size, "{} coefficients for C({dim}, {grade})", coeffs.len());
        coeffs.resize(size, 0.0);
        let terms = coeffs
            .into_iter()
            .zip(combinations(dim, grade))
            .map(|(c, combo)| (c, BasisLabel::from_combination(&combo)))
            .collect();
        Self { grade, dim, terms }
    }

    /// Number of basis vectors in each label.
    pub fn grade(&self) -> usize {
        self.grade
    }

    /// Number of basis vectors spanning the space.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of coefficient/label pairs, always `C(dim, grade)`.
    pub fn size(&self) -> usize {
        self.terms.len()
    }

    /// Coefficient/label pairs in lexicographic label order.
    pub fn terms(&self) -> &[(f64, BasisLabel)] {
        &self.terms
    }

    /// Coefficients in label order.
    pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.terms.iter().map(|(c, _)| *c)
    }

    /// Labels in lexicographic order.
    pub fn labels(&self) -> impl Iterator<Item = &BasisLabel> + '_ {
        self.terms.iter().map(|(_, l)| l)
    }

    /// True when every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.terms.iter().all(|(c, _)| *c == 0.0)
    }

    /// Zero the coefficient at position `i`; its label stays in place.
    pub fn clear(&mut self, i: usize) -> Result<()> {
        let size = self.terms.len();
        let term = self
            .terms
            .get_mut(i)
            .ok_or_else(|| GakitError::domain(format!("index {i} out of range for {size} coefficients")))?;
        term.0 = 0.0;
        Ok(())
    }

    /// This blade re-derived in `dim` dimensions.
    ///
    /// Existing coefficients keep their relative order and are re-paired
    /// with the labels of the larger space. Shrinking is a `Domain` error,
    /// as is growing past [`gakit_core::MAX_COEFFICIENTS`].
    pub fn with_dim(&self, dim: usize) -> Result<Blade> {
        if dim < self.dim {
            return Err(GakitError::domain(format!(
                "can't shrink blade from dim {} to {dim}",
                self.dim
            )));
        }
        blade_size(dim, self.grade)?;
        Ok(self.grown(dim))
    }

    /// Grow in place. Leaves `self` untouched on error.
    pub fn set_dim(&mut self, dim: usize) -> Result<()> {
        *self = self.with_dim(dim)?;
        Ok(())
    }

    /// Caller guarantees `dim >= self.dim` and that `dim` is within the size limits.
    pub(crate) fn grown(&self, dim: usize) -> Blade {
        if dim == self.dim {
            return self.clone();
        }
        tracing::debug!("growing grade-{} blade from dim {} to {}", self.grade, self.dim, dim);
        Self::assemble(self.grade, dim, self.coefficients().collect())
    }

    /// Sum of two blades.
    ///
    /// Equal grades add position by position after zero-padding the smaller
    /// blade. Different grades cannot form a single blade, so the result is a
    /// multivector holding both; that fails with `Domain` when a multivector
    /// of the larger dimension exceeds [`gakit_core::MAX_COEFFICIENTS`].
    pub fn add(&self, other: &Blade) -> Result<BladeSum> {
        if self.grade != other.grade {
            let dim = self.dim.max(other.dim);
            multivector_size(dim)?;
            return Ok(BladeSum::Multivector(Multivector::from_grown_blades(
                dim,
                [self.grown(dim), other.grown(dim)],
            )));
        }

        let (larger, smaller) = if self.dim >= other.dim { (self, other) } else { (other, self) };
        let mut coeffs: Vec<f64> = larger.coefficients().collect();
        for (acc, c) in coeffs.iter_mut().zip(smaller.coefficients()) {
            *acc += c;
        }
        Ok(BladeSum::Blade(Self::assemble(self.grade, larger.dim, coeffs)))
    }

    /// Additive inverse.
    pub fn negate(&self) -> Blade {
        self.map(|c| Sign::Neg.apply(c))
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: f64) -> Blade {
        self.map(|c| c * factor)
    }

    /// True division by a scalar.
    pub fn div(&self, divisor: f64) -> Result<Blade> {
        nonzero_divisor(divisor)?;
        Ok(self.map(|c| c / divisor))
    }

    /// Floored division: `floor(c / divisor)`.
    pub fn floor_div(&self, divisor: f64) -> Result<Blade> {
        nonzero_divisor(divisor)?;
        Ok(self.map(|c| (c / divisor).floor()))
    }

    /// Floored modulo: the result takes the sign of `divisor`.
    pub fn modulo(&self, divisor: f64) -> Result<Blade> {
        nonzero_divisor(divisor)?;
        Ok(self.map(|c| c - divisor * (c / divisor).floor()))
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Blade {
        Blade {
            grade: self.grade,
            dim: self.dim,
            terms: self.terms.iter().map(|(c, l)| (f(*c), l.clone())).collect(),
        }
    }

    /// `Blade(3, -2), grade = 1, dim = 2`
    pub fn repr(&self) -> String {
        let list = render_list(self.coefficients());
        format!(
            "Blade({}), grade = {}, dim = {}",
            &list[1..list.len() - 1],
            self.grade,
            self.dim
        )
    }
}

fn nonzero_divisor(divisor: f64) -> Result<()> {
    if divisor == 0.0 {
        return Err(GakitError::domain("division by zero"));
    }
    Ok(())
}

impl fmt::Display for Blade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_terms(&self.terms))
    }
}

/// Result of adding two blades.
#[derive(Debug, Clone, PartialEq)]
pub enum BladeSum {
    Blade(Blade),
    Multivector(Multivector),
}

impl BladeSum {
    /// Widen to a multivector. A lone blade gets zero blades for its other
    /// grades, which fails with `Domain` past [`gakit_core::MAX_COEFFICIENTS`].
    pub fn into_multivector(self) -> Result<Multivector> {
        match self {
            BladeSum::Blade(b) => {
                multivector_size(b.dim)?;
                Ok(Multivector::from_grown_blades(b.dim, [b]))
            }
            BladeSum::Multivector(m) => Ok(m),
        }
    }

    /// The sum as a blade, if both operands had the same grade.
    pub fn as_blade(&self) -> Option<&Blade> {
        match self {
            BladeSum::Blade(b) => Some(b),
            BladeSum::Multivector(_) => None,
        }
    }
}

impl fmt::Display for BladeSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BladeSum::Blade(b) => fmt::Display::fmt(b, f),
            BladeSum::Multivector(m) => fmt::Display::fmt(m, f),
        }
    }
}

// Arithmetic: Add, Neg, scalar Mul
impl std::ops::Add for &Blade {
    type Output = Result<BladeSum>;
    fn add(self, rhs: &Blade) -> Result<BladeSum> {
        Blade::add(self, rhs)
    }
}

impl std::ops::Neg for &Blade {
    type Output = Blade;
    fn neg(self) -> Blade {
        self.negate()
    }
}

impl std::ops::Mul<f64> for &Blade {
    type Output = Blade;
    fn mul(self, factor: f64) -> Blade {
        self.scale(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coeffs(b: &Blade) -> Vec<f64> {
        b.coefficients().collect()
    }

    fn labels(b: &Blade) -> Vec<String> {
        b.labels().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_bivector_labels() {
        let b = Blade::new(2, [1.0, 2.0, 3.0], Some(3)).unwrap();
        assert_eq!(labels(&b), vec!["e01", "e02", "e12"]);
        assert_eq!(b.size(), 3);
    }

    #[test]
    fn test_render_negative() {
        let b = Blade::new(1, [3.0, -2.0], Some(2)).unwrap();
        assert_eq!(b.to_string(), "3^e0- 2^e1");
    }

    #[test]
    fn test_zero_padding_to_dim() {
        let b = Blade::vector([1.0, 2.0], Some(4)).unwrap();
        assert_eq!(coeffs(&b), vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(labels(&b), vec!["e0", "e1", "e2", "e3"]);
    }

    #[test]
    fn test_default_dim_is_minimal() {
        assert_eq!(Blade::vector([1.0, 2.0, 3.0], None).unwrap().dim(), 3);
        // C(3, 2) = 3 < 4 <= C(4, 2) = 6
        let b = Blade::bivector([1.0, 2.0, 3.0, 4.0], None).unwrap();
        assert_eq!(b.dim(), 4);
        assert_eq!(b.size(), 6);
        assert_eq!(Blade::bivector(5.0, None).unwrap().dim(), 2);
        assert_eq!(Blade::scalar(5.0).dim(), 0);
    }

    #[test]
    fn test_scalar_rejects_many() {
        let err = Blade::new(0, [1.0, 2.0], None).unwrap_err();
        assert!(matches!(err, GakitError::Domain(_)));
        assert_eq!(Blade::new(0, 4.0, Some(3)).unwrap().to_string(), "4^e");
    }

    #[test]
    fn test_pseudoscalar_rejects_many() {
        let err = Blade::new(3, [1.0, 2.0], Some(3)).unwrap_err();
        assert!(matches!(err, GakitError::Domain(_)));
        let i = Blade::trivector(1.0, Some(3)).unwrap();
        assert_eq!(labels(&i), vec!["e012"]);
    }

    #[test]
    fn test_grade_exceeds_dim() {
        let err = Blade::new(4, 1.0, Some(3)).unwrap_err();
        assert_eq!(err, GakitError::Structural { grade: 4, available: 3 });
    }

    #[test]
    fn test_dim_too_small() {
        let err = Blade::vector([1.0, 2.0, 3.0], Some(2)).unwrap_err();
        assert!(matches!(err, GakitError::Domain(_)));
    }

    #[test]
    fn test_set_dim_grows() {
        let mut b = Blade::bivector([1.0, 2.0, 3.0], Some(3)).unwrap();
        b.set_dim(4).unwrap();
        assert_eq!(b.dim(), 4);
        assert_eq!(coeffs(&b), vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
        assert_eq!(labels(&b), vec!["e01", "e02", "e03", "e12", "e13", "e23"]);
    }

    #[test]
    fn test_oversized_blades_rejected() {
        assert!(matches!(Blade::bivector(1.0, Some(5000)), Err(GakitError::Domain(_))));
        assert!(matches!(Blade::new(100, 1.0, Some(200)), Err(GakitError::Domain(_))));
        assert!(matches!(Blade::new(usize::MAX, 1.0, None), Err(GakitError::Domain(_))));
        assert!(Blade::vector(1.0, Some(100_000)).is_ok());

        let mut b = Blade::bivector([1.0, 2.0, 3.0], None).unwrap();
        assert!(matches!(b.set_dim(2000), Err(GakitError::Domain(_))));
        assert_eq!(b.dim(), 3);
    }

    #[test]
    fn test_mixed_grade_add_past_limit() {
        let v = Blade::vector(1.0, Some(64)).unwrap();
        let s = Blade::scalar(2.0);
        assert!(matches!(v.add(&s), Err(GakitError::Domain(_))));
        assert!(matches!(BladeSum::Blade(v).into_multivector(), Err(GakitError::Domain(_))));
    }

    #[test]
    fn test_set_dim_shrink_fails_and_keeps_value() {
        let mut b = Blade::vector([1.0, 2.0, 3.0], None).unwrap();
        let before = b.clone();
        assert!(matches!(b.set_dim(2), Err(GakitError::Domain(_))));
        assert_eq!(b, before);
    }

    #[test]
    fn test_add_same_grade_pads() {
        let a = Blade::vector([1.0, 2.0], None).unwrap();
        let b = Blade::vector([1.0, 2.0, 3.0], None).unwrap();
        let sum = (&a + &b).unwrap();
        let blade = sum.as_blade().unwrap();
        assert_eq!(coeffs(blade), vec![2.0, 4.0, 3.0]);
        assert_eq!(blade.dim(), 3);
        assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    #[test]
    fn test_add_mixed_grades_is_multivector() {
        let v = Blade::vector([1.0, 2.0], Some(2)).unwrap();
        let bv = Blade::bivector(5.0, Some(2)).unwrap();
        let BladeSum::Multivector(m) = v.add(&bv).unwrap() else {
            panic!("mixed grades must not collapse into a blade");
        };
        assert_eq!(m.dim(), 2);
        assert_eq!(m.coefficients(), vec![0.0, 1.0, 2.0, 5.0]);
        assert_eq!(m.to_string(), "1^e0 + 2^e1 + 5^e01");
    }

    #[test]
    fn test_scalar_ops() {
        let b = Blade::vector([3.0, -7.0], None).unwrap();
        assert_eq!(coeffs(&(&b * 2.0)), vec![6.0, -14.0]);
        assert_eq!(coeffs(&b.div(2.0).unwrap()), vec![1.5, -3.5]);
        assert_eq!(coeffs(&b.floor_div(2.0).unwrap()), vec![1.0, -4.0]);
        assert_eq!(coeffs(&b.modulo(2.0).unwrap()), vec![1.0, 1.0]);
        assert_eq!(coeffs(&-&b), vec![-3.0, 7.0]);
        assert_eq!(labels(&b.scale(0.5)), labels(&b));
    }

    #[test]
    fn test_division_by_zero() {
        let b = Blade::vector([1.0], None).unwrap();
        assert!(matches!(b.div(0.0), Err(GakitError::Domain(_))));
        assert!(matches!(b.floor_div(0.0), Err(GakitError::Domain(_))));
        assert!(matches!(b.modulo(0.0), Err(GakitError::Domain(_))));
    }

    #[test]
    fn test_clear() {
        let mut b = Blade::vector([1.0, 2.0], None).unwrap();
        b.clear(0).unwrap();
        assert_eq!(coeffs(&b), vec![0.0, 2.0]);
        assert_eq!(b.size(), 2);
        assert!(b.clear(2).is_err());
    }

    #[test]
    fn test_repr() {
        let b = Blade::new(1, [3.0, -2.0], Some(2)).unwrap();
        assert_eq!(b.repr(), "Blade(3, -2), grade = 1, dim = 2");
        assert_eq!(Blade::vector(Vec::new(), Some(2)).unwrap().to_string(), "");
    }
}
