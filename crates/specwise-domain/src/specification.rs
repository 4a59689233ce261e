//! Specification module - composable boolean predicates over a domain item

use std::fmt;
use std::ops;
use std::sync::Arc;

use crate::error::SpecError;
use crate::visitor::SpecificationVisitor;

/// An atomic, domain-specific condition
///
/// Implemented by the closed leaf enum of a domain. The leaf type is also the
/// domain tag of every [`Specification`] built from it: a visitor written for
/// one leaf type cannot be applied to a tree of another.
pub trait Leaf: fmt::Debug + fmt::Display {
    /// The domain item this leaf tests
    type Item;

    /// Test a single domain item
    fn is_satisfied_by(&self, item: &Self::Item) -> bool;
}

#[derive(Debug)]
enum Node<L> {
    Leaf(L),
    And(Specification<L>, Specification<L>),
    Or(Specification<L>, Specification<L>),
    Not(Specification<L>),
}

/// An immutable boolean predicate over `L::Item`
///
/// Children are reference counted, so the same sub-specification can be a
/// child of several parents. Cloning only bumps the count.
#[derive(Debug)]
pub struct Specification<L> {
    node: Arc<Node<L>>,
}

impl<L> Clone for Specification<L> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<L> Specification<L> {
    fn from_node(node: Node<L>) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Wrap a leaf condition
    pub fn leaf(leaf: L) -> Self {
        Self::from_node(Node::Leaf(leaf))
    }

    /// Satisfied when both `self` and `other` are
    pub fn and(&self, other: &Self) -> Self {
        Self::from_node(Node::And(self.clone(), other.clone()))
    }

    /// Satisfied when either `self` or `other` is
    pub fn or(&self, other: &Self) -> Self {
        Self::from_node(Node::Or(self.clone(), other.clone()))
    }

    /// Satisfied when `self` is not
    pub fn not(&self) -> Self {
        Self::from_node(Node::Not(self.clone()))
    }

    /// Build an `And` node from children that may be absent
    ///
    /// # Errors
    /// Returns `SpecError::InvalidArgument` if either child is `None`
    pub fn try_and(left: Option<&Self>, right: Option<&Self>) -> Result<Self, SpecError> {
        let left = require(left, "and", "left")?;
        let right = require(right, "and", "right")?;
        Ok(left.and(right))
    }

    /// Build an `Or` node from children that may be absent
    ///
    /// # Errors
    /// Returns `SpecError::InvalidArgument` if either child is `None`
    pub fn try_or(left: Option<&Self>, right: Option<&Self>) -> Result<Self, SpecError> {
        let left = require(left, "or", "left")?;
        let right = require(right, "or", "right")?;
        Ok(left.or(right))
    }

    /// Build a `Not` node from a child that may be absent
    ///
    /// # Errors
    /// Returns `SpecError::InvalidArgument` if the child is `None`
    pub fn try_not(spec: Option<&Self>) -> Result<Self, SpecError> {
        Ok(require(spec, "not", "inner")?.not())
    }

    /// Dispatch to the visitor handler matching this node's variant
    pub fn accept<V>(&self, visitor: &mut V) -> Result<V::Output, V::Error>
    where
        V: SpecificationVisitor<L> + ?Sized,
    {
        match self.node.as_ref() {
            Node::Leaf(leaf) => visitor.visit_leaf(leaf),
            Node::And(left, right) => visitor.visit_and(left, right),
            Node::Or(left, right) => visitor.visit_or(left, right),
            Node::Not(spec) => visitor.visit_not(spec),
        }
    }

    /// Nesting depth; a lone leaf has depth 1
    pub fn depth(&self) -> usize {
        match self.node.as_ref() {
            Node::Leaf(_) => 1,
            Node::And(left, right) | Node::Or(left, right) => 1 + left.depth().max(right.depth()),
            Node::Not(spec) => 1 + spec.depth(),
        }
    }

    /// Number of leaf occurrences; a shared leaf counts once per parent
    pub fn leaf_count(&self) -> usize {
        match self.node.as_ref() {
            Node::Leaf(_) => 1,
            Node::And(left, right) | Node::Or(left, right) => left.leaf_count() + right.leaf_count(),
            Node::Not(spec) => spec.leaf_count(),
        }
    }

    /// Whether both handles point at the same node
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl<L: Leaf> Specification<L> {
    /// Evaluate against a concrete domain item
    ///
    /// Both children of `And` and `Or` are always evaluated, matching the
    /// translated expression, which also combines both operands.
    pub fn is_satisfied_by(&self, item: &L::Item) -> bool {
        match self.node.as_ref() {
            Node::Leaf(leaf) => leaf.is_satisfied_by(item),
            Node::And(left, right) => left.is_satisfied_by(item) & right.is_satisfied_by(item),
            Node::Or(left, right) => left.is_satisfied_by(item) | right.is_satisfied_by(item),
            Node::Not(spec) => !spec.is_satisfied_by(item),
        }
    }
}

fn require<'a, L>(
    child: Option<&'a Specification<L>>,
    combinator: &str,
    operand: &str,
) -> Result<&'a Specification<L>, SpecError> {
    child.ok_or_else(|| {
        SpecError::InvalidArgument(format!("{}: missing {} operand", combinator, operand))
    })
}

impl<L: fmt::Display> fmt::Display for Specification<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.as_ref() {
            Node::Leaf(leaf) => write!(f, "{}", leaf),
            Node::And(left, right) => write!(f, "({} and {})", left, right),
            Node::Or(left, right) => write!(f, "({} or {})", left, right),
            Node::Not(spec) => write!(f, "not {}", spec),
        }
    }
}

/// Satisfied when both `left` and `right` are
pub fn and<L>(left: &Specification<L>, right: &Specification<L>) -> Specification<L> {
    left.and(right)
}

/// Satisfied when either `left` or `right` is
pub fn or<L>(left: &Specification<L>, right: &Specification<L>) -> Specification<L> {
    left.or(right)
}

/// Satisfied when `spec` is not
pub fn not<L>(spec: &Specification<L>) -> Specification<L> {
    spec.not()
}

impl<L> ops::BitAnd for Specification<L> {
    type Output = Specification<L>;

    fn bitand(self, rhs: Self) -> Self::Output {
        Specification::from_node(Node::And(self, rhs))
    }
}

impl<L> ops::BitAnd for &Specification<L> {
    type Output = Specification<L>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<L> ops::BitOr for Specification<L> {
    type Output = Specification<L>;

    fn bitor(self, rhs: Self) -> Self::Output {
        Specification::from_node(Node::Or(self, rhs))
    }
}

impl<L> ops::BitOr for &Specification<L> {
    type Output = Specification<L>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<L> ops::Not for Specification<L> {
    type Output = Specification<L>;

    fn not(self) -> Self::Output {
        Specification::from_node(Node::Not(self))
    }
}

impl<L> ops::Not for &Specification<L> {
    type Output = Specification<L>;

    fn not(self) -> Self::Output {
        Specification::not(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal leaf over integers for structural tests
    #[derive(Debug)]
    struct AtLeast(i32);

    impl fmt::Display for AtLeast {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, ">= {}", self.0)
        }
    }

    impl Leaf for AtLeast {
        type Item = i32;

        fn is_satisfied_by(&self, item: &i32) -> bool {
            *item >= self.0
        }
    }

    fn at_least(n: i32) -> Specification<AtLeast> {
        Specification::leaf(AtLeast(n))
    }

    #[test]
    fn test_combinator_evaluation() {
        let positive = at_least(1);
        let big = at_least(100);

        assert!(positive.and(&big).is_satisfied_by(&150));
        assert!(!positive.and(&big).is_satisfied_by(&50));
        assert!(positive.or(&big).is_satisfied_by(&50));
        assert!(!positive.or(&big).is_satisfied_by(&0));
        assert!(positive.not().is_satisfied_by(&0));
    }

    #[test]
    fn test_operators_match_builders() {
        let a = at_least(10);
        let b = at_least(20);

        for item in [0, 10, 15, 20, 30] {
            assert_eq!((&a & &b).is_satisfied_by(&item), and(&a, &b).is_satisfied_by(&item));
            assert_eq!((&a | &b).is_satisfied_by(&item), or(&a, &b).is_satisfied_by(&item));
            assert_eq!((!&a).is_satisfied_by(&item), not(&a).is_satisfied_by(&item));
        }
    }

    #[test]
    fn test_shared_children() {
        let shared = at_least(5);
        let first = shared.and(&at_least(0));
        let second = !shared.clone();

        assert!(first.is_satisfied_by(&7));
        assert!(!second.is_satisfied_by(&7));
        assert!(shared.ptr_eq(&shared.clone()));
        assert!(!shared.ptr_eq(&at_least(5)));
    }

    #[test]
    fn test_try_builders_reject_missing_children() {
        let a = at_least(1);

        assert!(Specification::try_and(Some(&a), Some(&a)).is_ok());

        let err = Specification::try_and(Some(&a), None).unwrap_err();
        assert_eq!(
            err,
            SpecError::InvalidArgument("and: missing right operand".to_string())
        );

        let err = Specification::try_or(None, Some(&a)).unwrap_err();
        assert_eq!(
            err,
            SpecError::InvalidArgument("or: missing left operand".to_string())
        );

        assert!(matches!(
            Specification::<AtLeast>::try_not(None),
            Err(SpecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_depth_and_leaf_count() {
        let a = at_least(1);
        let tree = (&a | &at_least(2)).and(&a.not());

        assert_eq!(a.depth(), 1);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn test_display() {
        let tree = (at_least(1) | at_least(2)) & !at_least(3);
        assert_eq!(tree.to_string(), "((>= 1 or >= 2) and not >= 3)");
    }

    #[test]
    fn test_specification_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Specification<AtLeast>>();
    }
}
