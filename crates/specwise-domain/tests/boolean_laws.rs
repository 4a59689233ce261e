//! Property tests for the boolean algebra of product specifications

use proptest::prelude::*;
use specwise_domain::{and, not, or, Product, ProductSpec, ProductSpecification};

const CATEGORIES: &[&str] = &["cat1", "cat2", "cat3"];

fn leaf() -> impl Strategy<Value = ProductSpecification> {
    prop_oneof![
        prop::sample::select(CATEGORIES).prop_map(|c| ProductSpec::matches_category(c)),
        (0u32..5_000).prop_map(ProductSpec::price_at_most),
    ]
}

fn specification() -> impl Strategy<Value = ProductSpecification> {
    leaf().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l & r),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l | r),
            inner.prop_map(|s| !s),
        ]
    })
}

fn product() -> impl Strategy<Value = Product> {
    (prop::sample::select(CATEGORIES), 0u32..5_000)
        .prop_map(|(category, price)| Product::new("item", category, price))
}

proptest! {
    /// Property: double negation is the identity
    #[test]
    fn test_double_negation(s in specification(), item in product()) {
        prop_assert_eq!(not(&not(&s)).is_satisfied_by(&item), s.is_satisfied_by(&item));
    }

    /// Property: and/or are idempotent
    #[test]
    fn test_idempotence(s in specification(), item in product()) {
        prop_assert_eq!(and(&s, &s).is_satisfied_by(&item), s.is_satisfied_by(&item));
        prop_assert_eq!(or(&s, &s).is_satisfied_by(&item), s.is_satisfied_by(&item));
    }

    /// Property: excluded middle and contradiction
    #[test]
    fn test_excluded_middle(s in specification(), item in product()) {
        prop_assert!(or(&s, &not(&s)).is_satisfied_by(&item));
        prop_assert!(!and(&s, &not(&s)).is_satisfied_by(&item));
    }

    /// Property: De Morgan's laws hold for arbitrary operands
    #[test]
    fn test_de_morgan(a in specification(), b in specification(), item in product()) {
        prop_assert_eq!(
            not(&and(&a, &b)).is_satisfied_by(&item),
            or(&not(&a), &not(&b)).is_satisfied_by(&item)
        );
        prop_assert_eq!(
            not(&or(&a, &b)).is_satisfied_by(&item),
            and(&not(&a), &not(&b)).is_satisfied_by(&item)
        );
    }
}

#[test]
fn test_category_scenario() {
    let spec = ProductSpec::matches_category("cat1").or(&ProductSpec::matches_category("cat2"));

    let results: Vec<bool> = ["cat3", "cat1", "cat2"]
        .iter()
        .map(|c| spec.is_satisfied_by(&Product::new("item", *c, 100)))
        .collect();

    assert_eq!(results, vec![false, true, true]);
}
