//! Serializable form of a specification
//!
//! Specifications read from JSON or TOML arrive as a [`SpecDocument`]. The
//! document allows combinator children to be absent so that a malformed file
//! is reported as `SpecError::InvalidArgument` when it is turned into a
//! [`Specification`], instead of failing inside the deserializer.
//!
//! ```
//! use specwise_domain::{ProductSpecification, SpecDocument, ProductSpec};
//!
//! let doc: SpecDocument<ProductSpec> = serde_json::from_str(
//!     r#"{"or": {"left":  {"leaf": {"matches_category": "cat1"}},
//!               "right": {"leaf": {"matches_category": "cat2"}}}}"#,
//! ).unwrap();
//!
//! let spec = ProductSpecification::try_from(doc).unwrap();
//! assert_eq!(spec.to_string(), r#"(category == "cat1" or category == "cat2")"#);
//! ```

use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::error::SpecError;
use crate::specification::Specification;
use crate::visitor::SpecificationVisitor;

/// Document form of a `Specification<L>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecDocument<L> {
    /// A leaf condition
    Leaf(L),

    /// Both operands must hold
    And {
        /// Left operand
        #[serde(skip_serializing_if = "Option::is_none")]
        left: Option<Box<SpecDocument<L>>>,
        /// Right operand
        #[serde(skip_serializing_if = "Option::is_none")]
        right: Option<Box<SpecDocument<L>>>,
    },

    /// Either operand must hold
    Or {
        /// Left operand
        #[serde(skip_serializing_if = "Option::is_none")]
        left: Option<Box<SpecDocument<L>>>,
        /// Right operand
        #[serde(skip_serializing_if = "Option::is_none")]
        right: Option<Box<SpecDocument<L>>>,
    },

    /// The operand must not hold
    Not {
        /// Negated operand
        #[serde(skip_serializing_if = "Option::is_none")]
        spec: Option<Box<SpecDocument<L>>>,
    },
}

impl<L> TryFrom<SpecDocument<L>> for Specification<L> {
    type Error = SpecError;

    fn try_from(doc: SpecDocument<L>) -> Result<Self, Self::Error> {
        match doc {
            SpecDocument::Leaf(leaf) => Ok(Specification::leaf(leaf)),
            SpecDocument::And { left, right } => {
                let left = convert_child(left)?;
                let right = convert_child(right)?;
                Specification::try_and(left.as_ref(), right.as_ref())
            }
            SpecDocument::Or { left, right } => {
                let left = convert_child(left)?;
                let right = convert_child(right)?;
                Specification::try_or(left.as_ref(), right.as_ref())
            }
            SpecDocument::Not { spec } => {
                let spec = convert_child(spec)?;
                Specification::try_not(spec.as_ref())
            }
        }
    }
}

fn convert_child<L>(
    child: Option<Box<SpecDocument<L>>>,
) -> Result<Option<Specification<L>>, SpecError> {
    child.map(|doc| Specification::try_from(*doc)).transpose()
}

impl<L: Clone> From<&Specification<L>> for SpecDocument<L> {
    fn from(spec: &Specification<L>) -> Self {
        match spec.accept(&mut DocumentWriter) {
            Ok(doc) => doc,
            Err(never) => match never {},
        }
    }
}

/// Folds a specification back into its document form
struct DocumentWriter;

impl DocumentWriter {
    fn child<L: Clone>(
        &mut self,
        spec: &Specification<L>,
    ) -> Result<Option<Box<SpecDocument<L>>>, Infallible> {
        Ok(Some(Box::new(spec.accept(self)?)))
    }
}

impl<L: Clone> SpecificationVisitor<L> for DocumentWriter {
    type Output = SpecDocument<L>;
    type Error = Infallible;

    fn visit_leaf(&mut self, leaf: &L) -> Result<SpecDocument<L>, Infallible> {
        Ok(SpecDocument::Leaf(leaf.clone()))
    }

    fn visit_and(
        &mut self,
        left: &Specification<L>,
        right: &Specification<L>,
    ) -> Result<SpecDocument<L>, Infallible> {
        Ok(SpecDocument::And {
            left: self.child(left)?,
            right: self.child(right)?,
        })
    }

    fn visit_or(
        &mut self,
        left: &Specification<L>,
        right: &Specification<L>,
    ) -> Result<SpecDocument<L>, Infallible> {
        Ok(SpecDocument::Or {
            left: self.child(left)?,
            right: self.child(right)?,
        })
    }

    fn visit_not(&mut self, spec: &Specification<L>) -> Result<SpecDocument<L>, Infallible> {
        Ok(SpecDocument::Not {
            spec: self.child(spec)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Product, ProductSpec, ProductSpecification};

    #[test]
    fn test_document_roundtrip_preserves_structure() {
        let spec = (ProductSpec::matches_category("cat1") | ProductSpec::matches_category("cat2"))
            & !ProductSpec::price_at_most(500);

        let doc = SpecDocument::from(&spec);
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: SpecDocument<ProductSpec> = serde_json::from_str(&json).unwrap();
        let rebuilt = ProductSpecification::try_from(parsed).unwrap();

        assert_eq!(rebuilt.to_string(), spec.to_string());
    }

    #[test]
    fn test_document_deserializes_for_leaves_without_default() {
        fn assert_deserialize<T: serde::de::DeserializeOwned>() {}
        assert_deserialize::<SpecDocument<ProductSpec>>();

        let doc: SpecDocument<ProductSpec> =
            serde_json::from_str(r#"{"or": {"right": {"leaf": {"price_at_most": 5}}}}"#).unwrap();
        assert_eq!(
            doc,
            SpecDocument::Or {
                left: None,
                right: Some(Box::new(SpecDocument::Leaf(ProductSpec::PriceAtMost(5)))),
            }
        );
    }

    #[test]
    fn test_missing_child_is_invalid_argument() {
        let doc: SpecDocument<ProductSpec> =
            serde_json::from_str(r#"{"and": {"left": {"leaf": {"matches_category": "cat1"}}}}"#)
                .unwrap();

        let err = ProductSpecification::try_from(doc).unwrap_err();
        assert_eq!(
            err,
            SpecError::InvalidArgument("and: missing right operand".to_string())
        );
    }

    #[test]
    fn test_nested_missing_child_is_reported() {
        let doc: SpecDocument<ProductSpec> = serde_json::from_str(
            r#"{"or": {"left": {"leaf": {"matches_category": "cat1"}}, "right": {"not": {}}}}"#,
        )
        .unwrap();

        let err = ProductSpecification::try_from(doc).unwrap_err();
        assert_eq!(
            err,
            SpecError::InvalidArgument("not: missing inner operand".to_string())
        );
    }

    #[test]
    fn test_document_evaluates_like_source() {
        let doc: SpecDocument<ProductSpec> = serde_json::from_str(
            r#"{"not": {"spec": {"leaf": {"price_at_most": 1000}}}}"#,
        )
        .unwrap();
        let spec = ProductSpecification::try_from(doc).unwrap();

        assert!(spec.is_satisfied_by(&Product::new("Kettle", "cat1", 2_499)));
        assert!(!spec.is_satisfied_by(&Product::new("Mug", "cat1", 399)));
    }
}
