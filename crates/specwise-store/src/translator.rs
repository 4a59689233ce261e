//! Translation of specifications into lambdas over a target entity
//!
//! [`ExpressionVisitor`] is the [`SpecificationVisitor`] shared by every
//! domain: it owns the `And`/`Or`/`Not` composition and delegates leaves to a
//! [`LeafTranslator`]. Each leaf produces a lambda over a fresh parameter;
//! combinators translate both children and rebind the right-hand body onto the
//! left-hand parameter, so the finished lambda closes over exactly one
//! variable.
//!
//! [`ProductExpressionTranslator`] is the leaf translator for product
//! specifications, producing `Lambda<EfProduct>`.

use specwise_domain::{
    ProductSpec, ProductSpecVisitor, ProductSpecification, SpecError, Specification,
    SpecificationVisitor,
};
use tracing::{debug, trace};

use crate::entity::EfProduct;
use crate::expression::{Expr, Lambda, Parameter, Value};

/// Name of the lambda parameter in translated expressions
const PARAMETER_NAME: &str = "ef";

/// Translates the leaf conditions of one domain
///
/// Implementors only handle leaves; wrap them in an [`ExpressionVisitor`] to
/// translate whole trees.
pub trait LeafTranslator<L> {
    /// Target entity the produced lambdas read
    type Entity;

    /// Translate a single leaf into a lambda over a fresh parameter
    fn translate_leaf(&mut self, leaf: &L) -> Result<Lambda<Self::Entity>, SpecError>;
}

/// `left And right`, closing over the left lambda's parameter
pub fn combine_and<E>(left: Lambda<E>, right: Lambda<E>) -> Lambda<E> {
    let (parameter, left, right) = rebind_pair(left, right);
    Lambda::new(parameter, Expr::and(left, right))
}

/// `left Or right`, closing over the left lambda's parameter
pub fn combine_or<E>(left: Lambda<E>, right: Lambda<E>) -> Lambda<E> {
    let (parameter, left, right) = rebind_pair(left, right);
    Lambda::new(parameter, Expr::or(left, right))
}

/// `Not(body)`, keeping the lambda's parameter
pub fn negate<E>(lambda: Lambda<E>) -> Lambda<E> {
    let (parameter, body) = lambda.into_parts();
    Lambda::new(parameter, Expr::negate(body))
}

fn rebind_pair<E>(left: Lambda<E>, right: Lambda<E>) -> (Parameter, Expr, Expr) {
    let (parameter, left_body) = left.into_parts();
    let (right_parameter, right_body) = right.into_parts();
    let right_body = right_body.rebind(&right_parameter, &parameter);
    (parameter, left_body, right_body)
}

/// Folds a specification tree into one lambda, delegating leaves to `T`
///
/// One visitor translates one tree: [`translate`](Self::translate) consumes
/// it.
#[derive(Debug, Default)]
pub struct ExpressionVisitor<T> {
    leaves: T,
    visited: usize,
}

impl<T> ExpressionVisitor<T> {
    /// Wrap a leaf translator
    pub fn new(leaves: T) -> Self {
        Self { leaves, visited: 0 }
    }

    /// Nodes visited so far
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Translate `spec`, consuming the visitor
    ///
    /// # Errors
    /// Returns whatever the leaf translator fails with, typically
    /// `SpecError::MissingHandler`
    pub fn translate<L>(mut self, spec: &Specification<L>) -> Result<Lambda<T::Entity>, SpecError>
    where
        T: LeafTranslator<L>,
    {
        let lambda = spec.accept(&mut self)?;
        debug!(
            nodes = self.visited,
            expression = %lambda,
            "Translated specification"
        );
        Ok(lambda)
    }
}

impl<L, T: LeafTranslator<L>> SpecificationVisitor<L> for ExpressionVisitor<T> {
    type Output = Lambda<T::Entity>;
    type Error = SpecError;

    fn visit_leaf(&mut self, leaf: &L) -> Result<Lambda<T::Entity>, SpecError> {
        self.visited += 1;
        self.leaves.translate_leaf(leaf)
    }

    fn visit_and(
        &mut self,
        left: &Specification<L>,
        right: &Specification<L>,
    ) -> Result<Lambda<T::Entity>, SpecError> {
        self.visited += 1;
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        Ok(combine_and(left, right))
    }

    fn visit_or(
        &mut self,
        left: &Specification<L>,
        right: &Specification<L>,
    ) -> Result<Lambda<T::Entity>, SpecError> {
        self.visited += 1;
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        Ok(combine_or(left, right))
    }

    fn visit_not(&mut self, spec: &Specification<L>) -> Result<Lambda<T::Entity>, SpecError> {
        self.visited += 1;
        Ok(negate(spec.accept(self)?))
    }
}

/// Builds a `Lambda<EfProduct>` from a product specification
///
/// # Examples
///
/// ```
/// use specwise_domain::ProductSpec;
/// use specwise_store::{EfProduct, ProductExpressionTranslator};
///
/// let spec = ProductSpec::matches_category("cat1").or(&ProductSpec::matches_category("cat2"));
/// let lambda = ProductExpressionTranslator::expression_for(&spec).unwrap();
///
/// assert_eq!(
///     lambda.to_string(),
///     r#"ef => ((ef.category == "cat1") Or (ef.category == "cat2"))"#
/// );
/// ```
#[derive(Debug, Default)]
pub struct ProductExpressionTranslator;

impl ProductExpressionTranslator {
    /// Create a translator
    pub fn new() -> Self {
        Self
    }

    /// Translate `spec`, consuming the translator
    ///
    /// # Errors
    /// Returns `SpecError::MissingHandler` if a leaf variant has no handler
    pub fn translate(self, spec: &ProductSpecification) -> Result<Lambda<EfProduct>, SpecError> {
        ExpressionVisitor::new(self).translate(spec)
    }

    /// Translate `spec` with a fresh translator
    pub fn expression_for(spec: &ProductSpecification) -> Result<Lambda<EfProduct>, SpecError> {
        Self::new().translate(spec)
    }
}

impl LeafTranslator<ProductSpec> for ProductExpressionTranslator {
    type Entity = EfProduct;

    fn translate_leaf(&mut self, leaf: &ProductSpec) -> Result<Lambda<EfProduct>, SpecError> {
        trace!(variant = leaf.variant_name(), "Translating leaf");
        leaf.accept(self)
    }
}

impl ProductSpecVisitor for ProductExpressionTranslator {
    type Output = Lambda<EfProduct>;

    fn visit_matches_category(&mut self, category: &str) -> Result<Lambda<EfProduct>, SpecError> {
        let ef = Parameter::new(PARAMETER_NAME);
        let body = Expr::equal(Expr::member(&ef, "category"), Expr::constant(category));
        Ok(Lambda::new(ef, body))
    }

    fn visit_price_at_most(&mut self, price_cents: u32) -> Result<Lambda<EfProduct>, SpecError> {
        let ef = Parameter::new(PARAMETER_NAME);
        let body = Expr::less_than_or_equal(
            Expr::member(&ef, "price_cents"),
            Expr::Constant(Value::Integer(i64::from(price_cents))),
        );
        Ok(Lambda::new(ef, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specwise_domain::Product;

    fn target(category: &str) -> EfProduct {
        EfProduct::from(&Product::new("item", category, 100))
    }

    #[test]
    fn test_category_scenario() {
        let spec = ProductSpec::matches_category("cat1").or(&ProductSpec::matches_category("cat2"));
        let lambda = ProductExpressionTranslator::expression_for(&spec).unwrap();

        assert_eq!(
            lambda.to_string(),
            r#"ef => ((ef.category == "cat1") Or (ef.category == "cat2"))"#
        );

        let predicate = lambda.compile().unwrap();
        let results: Vec<bool> = ["cat3", "cat1", "cat2"]
            .iter()
            .map(|c| predicate.invoke(&target(c)))
            .collect();
        assert_eq!(results, vec![false, true, true]);
    }

    #[test]
    fn test_single_free_parameter() {
        let spec = (ProductSpec::matches_category("cat1") & !ProductSpec::price_at_most(50))
            | ProductSpec::matches_category("cat2");
        let lambda = ProductExpressionTranslator::expression_for(&spec).unwrap();

        assert_eq!(lambda.free_parameters(), vec![lambda.parameter().clone()]);
    }

    #[test]
    fn test_not_reuses_inner_parameter() {
        let spec = !ProductSpec::matches_category("cat1");
        let lambda = ProductExpressionTranslator::expression_for(&spec).unwrap();

        assert_eq!(lambda.to_string(), r#"ef => Not((ef.category == "cat1"))"#);
        assert!(lambda.compile().unwrap().invoke(&target("cat2")));
    }

    #[test]
    fn test_shared_subtree_translates_independently() {
        let shared = ProductSpec::matches_category("cat1");
        let spec = shared.and(&shared.not());
        let lambda = ProductExpressionTranslator::expression_for(&spec).unwrap();

        assert_eq!(lambda.free_parameters().len(), 1);
        assert!(!lambda.compile().unwrap().invoke(&target("cat1")));
    }

    #[test]
    fn test_visitor_counts_nodes() {
        let spec = ProductSpec::matches_category("cat1") | !ProductSpec::price_at_most(10);
        let mut visitor = ExpressionVisitor::new(ProductExpressionTranslator::new());
        spec.accept(&mut visitor).unwrap();

        assert_eq!(visitor.visited(), 4);
    }

    #[test]
    fn test_combinators_rebind_right_parameter() {
        let mut leaves = ProductExpressionTranslator::new();
        let left = leaves.visit_matches_category("cat1").unwrap();
        let right = leaves.visit_price_at_most(500).unwrap();
        let parameter = left.parameter().clone();
        assert_ne!(&parameter, right.parameter());

        let combined = combine_and(left, negate(right));
        assert_eq!(combined.parameter(), &parameter);
        assert_eq!(combined.free_parameters(), vec![parameter]);
        assert_eq!(
            combined.to_string(),
            r#"ef => ((ef.category == "cat1") And Not((ef.price_cents <= 500)))"#
        );
    }
}
