//! Product module - the example domain and its leaf conditions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SpecError;
use crate::specification::{Leaf, Specification};

/// A product in the catalogue
///
/// Owned by the client; specifications only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name
    pub name: String,

    /// Category the product is filed under
    pub category: String,

    /// Unit price in cents
    pub price_cents: u32,
}

impl Product {
    /// Create a new product
    pub fn new(name: impl Into<String>, category: impl Into<String>, price_cents: u32) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price_cents,
        }
    }
}

/// Atomic conditions over a [`Product`]
///
/// This is the closed set of product leaves. Adding a variant means adding a
/// handler to [`ProductSpecVisitor`]; the dispatch in [`ProductSpec::accept`]
/// is an exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSpec {
    /// The product's category equals the given value
    MatchesCategory(String),

    /// The product's price is at most the given amount in cents
    PriceAtMost(u32),
}

/// A specification over products
pub type ProductSpecification = Specification<ProductSpec>;

impl ProductSpec {
    /// Specification matching products of `category`
    ///
    /// # Examples
    ///
    /// ```
    /// use specwise_domain::{Product, ProductSpec};
    ///
    /// let spec = ProductSpec::matches_category("cat1");
    /// assert!(spec.is_satisfied_by(&Product::new("Kettle", "cat1", 2_499)));
    /// ```
    pub fn matches_category(category: impl Into<String>) -> ProductSpecification {
        Specification::leaf(Self::MatchesCategory(category.into()))
    }

    /// Specification matching products priced at most `price_cents`
    pub fn price_at_most(price_cents: u32) -> ProductSpecification {
        Specification::leaf(Self::PriceAtMost(price_cents))
    }

    /// Name of the variant, e.g. `"PriceAtMost"`
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::MatchesCategory(_) => "MatchesCategory",
            Self::PriceAtMost(_) => "PriceAtMost",
        }
    }

    /// Dispatch to the leaf visitor handler matching this variant
    pub fn accept<V>(&self, visitor: &mut V) -> Result<V::Output, SpecError>
    where
        V: ProductSpecVisitor + ?Sized,
    {
        match self {
            Self::MatchesCategory(category) => visitor.visit_matches_category(category),
            Self::PriceAtMost(price_cents) => visitor.visit_price_at_most(*price_cents),
        }
    }
}

impl Leaf for ProductSpec {
    type Item = Product;

    fn is_satisfied_by(&self, item: &Product) -> bool {
        match self {
            Self::MatchesCategory(category) => item.category == *category,
            Self::PriceAtMost(price_cents) => item.price_cents <= *price_cents,
        }
    }
}

impl fmt::Display for ProductSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchesCategory(category) => write!(f, "category == {:?}", category),
            Self::PriceAtMost(price_cents) => write!(f, "price_cents <= {}", price_cents),
        }
    }
}

/// One handler per product leaf variant
///
/// Handlers a visitor does not override fail with
/// `SpecError::MissingHandler` when their variant is visited.
pub trait ProductSpecVisitor {
    /// Value produced for a leaf
    type Output;

    /// Handle `ProductSpec::MatchesCategory`
    fn visit_matches_category(&mut self, _category: &str) -> Result<Self::Output, SpecError> {
        Err(SpecError::missing_handler::<Self>("MatchesCategory"))
    }

    /// Handle `ProductSpec::PriceAtMost`
    fn visit_price_at_most(&mut self, _price_cents: u32) -> Result<Self::Output, SpecError> {
        Err(SpecError::missing_handler::<Self>("PriceAtMost"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kettle() -> Product {
        Product::new("Kettle", "cat1", 2_499)
    }

    #[test]
    fn test_leaf_evaluation() {
        assert!(ProductSpec::matches_category("cat1").is_satisfied_by(&kettle()));
        assert!(!ProductSpec::matches_category("cat2").is_satisfied_by(&kettle()));
        assert!(ProductSpec::price_at_most(2_499).is_satisfied_by(&kettle()));
        assert!(!ProductSpec::price_at_most(2_498).is_satisfied_by(&kettle()));
    }

    #[test]
    fn test_category_match_is_exact() {
        assert!(!ProductSpec::matches_category("Cat1").is_satisfied_by(&kettle()));
        assert!(!ProductSpec::matches_category("cat").is_satisfied_by(&kettle()));
    }

    struct CategoryOnly;

    impl ProductSpecVisitor for CategoryOnly {
        type Output = String;

        fn visit_matches_category(&mut self, category: &str) -> Result<String, SpecError> {
            Ok(category.to_string())
        }
    }

    #[test]
    fn test_leaf_dispatch() {
        let leaf = ProductSpec::MatchesCategory("cat1".to_string());
        assert_eq!(leaf.accept(&mut CategoryOnly).unwrap(), "cat1");
    }

    #[test]
    fn test_unhandled_variant_fails() {
        let leaf = ProductSpec::PriceAtMost(100);
        let err = leaf.accept(&mut CategoryOnly).unwrap_err();

        assert!(matches!(
            err,
            SpecError::MissingHandler { variant: "PriceAtMost", .. }
        ));
        assert_eq!(leaf.variant_name(), "PriceAtMost");
    }

    struct NoHandlers;

    impl ProductSpecVisitor for NoHandlers {
        type Output = ();
    }

    #[test]
    fn test_default_handlers_report_variant_name() {
        let leaves = [
            ProductSpec::MatchesCategory("cat1".to_string()),
            ProductSpec::PriceAtMost(100),
        ];

        for leaf in &leaves {
            match leaf.accept(&mut NoHandlers) {
                Err(SpecError::MissingHandler { variant, .. }) => {
                    assert_eq!(variant, leaf.variant_name());
                }
                other => panic!("expected MissingHandler, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_price_bound_covers_u32_range() {
        let priciest = Product::new("Yacht", "cat9", u32::MAX);
        assert!(ProductSpec::price_at_most(u32::MAX).is_satisfied_by(&priciest));
        assert!(!ProductSpec::price_at_most(u32::MAX - 1).is_satisfied_by(&priciest));
    }

    #[test]
    fn test_display() {
        let spec = ProductSpec::matches_category("cat1") | ProductSpec::price_at_most(500);
        assert_eq!(spec.to_string(), "(category == \"cat1\" or price_cents <= 500)");
    }

    #[test]
    fn test_leaf_serde_shape() {
        let json = serde_json::to_string(&ProductSpec::MatchesCategory("cat1".into())).unwrap();
        assert_eq!(json, r#"{"matches_category":"cat1"}"#);

        let leaf: ProductSpec = serde_json::from_str(r#"{"price_at_most":500}"#).unwrap();
        assert_eq!(leaf, ProductSpec::PriceAtMost(500));
    }
}
