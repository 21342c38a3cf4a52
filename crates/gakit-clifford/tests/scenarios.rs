//! End-to-end behaviour of blades and multivectors.

use gakit_clifford::{
    BasisIndex, BasisLabel, Blade, BladeSum, Coefficients, GakitError, Multivector, MultivectorInput, Sign,
};

fn labels(b: &Blade) -> Vec<String> {
    b.labels().map(|l| l.to_string()).collect()
}

// ============================================================================
// Blade construction
// ============================================================================

#[test]
fn test_vector_renders_with_negative_separator() {
    let b = Blade::new(1, [3.0, -2.0], Some(2)).unwrap();
    assert_eq!(b.to_string(), "3^e0- 2^e1");
}

#[test]
fn test_bivector_label_order() {
    let b = Blade::new(2, [1.0, 2.0, 3.0], Some(3)).unwrap();
    assert_eq!(labels(&b), vec!["e01", "e02", "e12"]);
}

#[test]
fn test_blade_size_and_labels_for_every_grade() {
    for dim in 0..=5usize {
        for grade in 0..=dim {
            let b = Blade::new(grade, Vec::new(), Some(dim)).unwrap();
            assert_eq!(Some(b.size()), gakit_core::binomial(dim, grade));
            let expected: Vec<BasisLabel> = gakit_core::combinations(dim, grade)
                .map(|c| BasisLabel::new(c.iter().copied()).unwrap())
                .collect();
            assert_eq!(b.labels().cloned().collect::<Vec<_>>(), expected);
        }
    }
}

#[test]
fn test_construction_errors() {
    assert!(matches!(Blade::new(0, [1.0, 2.0], None), Err(GakitError::Domain(_))));
    assert!(matches!(Blade::new(2, [1.0, 2.0], Some(2)), Err(GakitError::Domain(_))));
    assert!(matches!(Blade::new(3, 1.0, Some(2)), Err(GakitError::Structural { .. })));
    assert!(matches!(Blade::new(1, [1.0, 2.0, 3.0], Some(2)), Err(GakitError::Domain(_))));
    assert!(matches!(gakit_core::checked_grade(-1), Err(GakitError::Domain(_))));
}

#[test]
fn test_inputs_from_ranges_and_sets() {
    let from_range = Blade::new(1, 1i64..4, None).unwrap();
    let from_set = Blade::new(1, [3i64, 1, 2].into_iter().collect::<std::collections::BTreeSet<_>>(), None).unwrap();
    assert_eq!(from_range, from_set);
    assert_eq!(from_range.to_string(), "1^e0 + 2^e1 + 3^e2");
}

// ============================================================================
// Blade arithmetic
// ============================================================================

#[test]
fn test_same_grade_add_zero_pads() {
    let a = Blade::new(1, [1.0, 2.0], None).unwrap();
    let b = Blade::new(1, [1.0, 2.0, 3.0], None).unwrap();
    let BladeSum::Blade(sum) = a.add(&b).unwrap() else {
        panic!("same-grade sum must stay a blade");
    };
    assert_eq!(sum.coefficients().collect::<Vec<_>>(), vec![2.0, 4.0, 3.0]);
    assert_eq!(sum.grade(), 1);
}

#[test]
fn test_vector_plus_bivector_is_multivector() {
    let v = Blade::vector([1.0, 0.0, 2.0], None).unwrap();
    let bv = Blade::bivector([0.0, 0.0, 7.0], None).unwrap();
    let sum = (&v + &bv).unwrap();
    assert!(sum.as_blade().is_none());
    let m = sum.into_multivector().unwrap();
    assert_eq!(m.dim(), 3);
    assert_eq!(m.to_string(), "1^e0 + 2^e2 + 7^e12");
    assert!(m.grade(0).unwrap().is_zero());
    assert!(m.grade(3).unwrap().is_zero());
}

// ============================================================================
// Multivector
// ============================================================================

#[test]
fn test_from_flat_four_coefficients() {
    let m = Multivector::from_flat([1.0, 2.0, 3.0, 4.0], None).unwrap();
    assert_eq!(m.dim(), 2);
    let grade = |g| m.grade(g).unwrap().coefficients().collect::<Vec<_>>();
    assert_eq!(grade(0), vec![1.0]);
    assert_eq!(grade(1), vec![2.0, 3.0]);
    assert_eq!(grade(2), vec![4.0]);
}

/// Sign applied to each grade by `reverse`, pinned for dims 0 through 4.
#[test]
fn test_reverse_sign_sequence() {
    let expected: [&[f64]; 5] = [
        &[1.0],
        &[1.0, 1.0],
        &[1.0, 1.0, -1.0],
        &[1.0, 1.0, -1.0, -1.0],
        &[1.0, 1.0, -1.0, -1.0, 1.0],
    ];
    for (dim, signs) in expected.iter().enumerate() {
        let ones = Multivector::from_flat(vec![1.0; 1 << dim], None).unwrap();
        let rev = ones.reverse();
        assert_eq!(rev.dim(), dim);
        for (grade, &sign) in signs.iter().enumerate() {
            let blade = rev.grade(grade).unwrap();
            assert!(
                blade.coefficients().all(|c| c == sign),
                "dim {dim} grade {grade}: expected sign {sign}, got {:?}",
                blade.coefficients().collect::<Vec<_>>()
            );
        }
    }
}

#[test]
fn test_reverse_matches_basis_reversal_sign() {
    // Reversing e_{i1}…e_{ik} takes k(k-1)/2 transpositions.
    let rev = Multivector::from_flat(vec![1.0; 1 << 7], None).unwrap().reverse();
    for grade in 0..=7usize {
        let expected = if (grade * grade.saturating_sub(1) / 2) % 2 == 0 { 1.0 } else { -1.0 };
        assert!(rev.grade(grade).unwrap().coefficients().all(|c| c == expected));
    }
}

#[test]
fn test_reverse_twice_restores() {
    let m = Multivector::from_flat((0..16).map(|i| i as f64 - 7.5).collect::<Coefficients>(), None).unwrap();
    assert_eq!(m.reverse().reverse(), m);
}

#[cfg(feature = "serde")]
#[test]
fn test_build_from_json() {
    let value = serde_json::json!({"1": [0, 2], "0": 5});
    let m = Multivector::build(MultivectorInput::from_json(&value).unwrap()).unwrap();
    assert_eq!(m.dim(), 2);
    assert_eq!(m.to_string(), "5^e + 2^e1");

    let value = serde_json::json!({"-2": [1]});
    let err = Multivector::build(MultivectorInput::from_json(&value).unwrap()).unwrap_err();
    assert!(matches!(err, GakitError::Domain(_)));
}

#[test]
fn test_multivector_set_dim_shrink_fails() {
    let mut m = Multivector::from_flat([1.0; 8], None).unwrap();
    assert!(matches!(m.set_dim(2), Err(GakitError::Domain(_))));
    assert_eq!(m.dim(), 3);
}

#[test]
fn test_oversized_dimensions_are_domain_errors() {
    assert!(matches!(Multivector::from_flat([1.0], Some(64)), Err(GakitError::Domain(_))));
    assert!(matches!(Multivector::from_map([(70, vec![1.0])]), Err(GakitError::Domain(_))));
    assert!(matches!(Blade::new(2, 1.0, Some(10_000)), Err(GakitError::Domain(_))));

    let mut b = Blade::vector([1.0, 2.0], None).unwrap();
    assert!(matches!(b.with_dim(usize::MAX), Err(GakitError::Domain(_))));
    assert!(matches!(b.set_dim(usize::MAX), Err(GakitError::Domain(_))));
    assert_eq!(b.dim(), 2);
}

#[test]
fn test_blade_set_dim_shrink_fails() {
    let mut b = Blade::new(2, [1.0, 2.0, 3.0], Some(3)).unwrap();
    assert!(matches!(b.set_dim(2), Err(GakitError::Domain(_))));
    assert_eq!(b.dim(), 3);
}

// ============================================================================
// Basis combination
// ============================================================================

#[test]
fn test_basis_contraction_and_wedge() {
    let e0 = BasisIndex::new(0);
    let e2 = BasisIndex::new(2);
    assert_eq!(e0.combine(e0), (Sign::Pos, BasisLabel::scalar()));
    assert_eq!(e2.combine(e0), (Sign::Neg, BasisLabel::new([0, 2]).unwrap()));
}
