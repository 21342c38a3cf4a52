//! Binomial sizing and combination enumeration.
//!
//! Every blade of grade k in an n-dimensional space holds `C(n, k)`
//! coefficients, one per k-subset of `{0, …, n-1}` taken in lexicographic
//! order. These helpers are the single source of that bookkeeping.

use smallvec::SmallVec;

use crate::{GakitError, Result};

/// One k-subset of basis indices, stack-allocated for grades ≤ 4.
pub type Combination = SmallVec<[usize; 4]>;

/// Most coefficients a single blade or multivector may hold (`2^20`, a
/// full multivector of dimension 20). Also bounds the grade, since every
/// label of a grade-k blade stores k indices.
pub const MAX_COEFFICIENTS: usize = 1 << 20;

/// Binomial coefficient C(n, k). `Some(0)` when `k > n`, `None` on overflow.
pub fn binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc = 1usize;
    for i in 0..k {
        // Exact at every step: acc * (n - i) is divisible by (i + 1).
        acc = acc.checked_mul(n - i)? / (i + 1);
    }
    Some(acc)
}

/// Coefficient count of a grade-`grade` blade in `dim` dimensions.
///
/// `Domain` error when the count or the grade exceeds [`MAX_COEFFICIENTS`].
pub fn blade_size(dim: usize, grade: usize) -> Result<usize> {
    binomial(dim, grade)
        .filter(|&size| size <= MAX_COEFFICIENTS && grade <= MAX_COEFFICIENTS)
        .ok_or_else(|| {
            GakitError::domain(format!(
                "grade-{grade} blade of dim {dim} exceeds {MAX_COEFFICIENTS} coefficients"
            ))
        })
}

/// Coefficient count `2^dim` of a multivector in `dim` dimensions.
///
/// `Domain` error when the count exceeds [`MAX_COEFFICIENTS`].
pub fn multivector_size(dim: usize) -> Result<usize> {
    u32::try_from(dim)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift))
        .filter(|&size| size <= MAX_COEFFICIENTS)
        .ok_or_else(|| {
            GakitError::domain(format!(
                "multivector of dim {dim} exceeds {MAX_COEFFICIENTS} coefficients"
            ))
        })
}

/// Smallest `d` with `2^d >= count`. Zero for `count <= 1`.
pub fn ceil_log2(count: usize) -> usize {
    if count <= 1 {
        return 0;
    }
    (usize::BITS - (count - 1).leading_zeros()) as usize
}

/// Number of basis blades of each grade `0..=dim`.
///
/// Counts only, nothing is allocated per blade, so the sole failure is a
/// count that overflows `usize`.
pub fn blade_counts(dim: usize) -> Result<Vec<usize>> {
    (0..=dim)
        .map(|k| {
            binomial(dim, k)
                .ok_or_else(|| GakitError::domain(format!("C({dim}, {k}) overflows usize")))
        })
        .collect()
}

/// Lexicographic k-combinations of `{0, …, n-1}`.
///
/// Yields nothing when `k > n` and exactly one empty combination when `k == 0`.
pub fn combinations(n: usize, k: usize) -> Combinations {
    let current = (k <= n).then(|| (0..k).collect());
    Combinations { n, k, current }
}

/// Iterator returned by [`combinations`].
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    current: Option<Combination>,
}

impl Iterator for Combinations {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        let out = self.current.take()?;

        let mut next = out.clone();
        let (n, k) = (self.n, self.k);
        if let Some(i) = (0..k).rev().find(|&i| next[i] < n - k + i) {
            next[i] += 1;
            for j in (i + 1)..k {
                next[j] = next[j - 1] + 1;
            }
            self.current = Some(next);
        }

        Some(out)
    }
}
