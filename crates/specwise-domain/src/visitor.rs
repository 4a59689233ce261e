//! Visitor protocol for specification trees
//!
//! [`Specification::accept`] picks the handler from the node's variant, so a
//! visitor never inspects or downcasts nodes itself. Leaf variants get a
//! second dispatch through the domain's own leaf visitor trait (see
//! [`ProductSpecVisitor`](crate::ProductSpecVisitor)).

use crate::specification::Specification;

/// Handles each variant of a `Specification<L>`
///
/// The trait is parameterized by the leaf type `L`, so a visitor built for one
/// domain cannot be handed another domain's tree. Combinator handlers receive
/// the children and recurse by calling `accept` on them.
pub trait SpecificationVisitor<L> {
    /// Value produced for each visited node
    type Output;

    /// Error raised by a handler
    type Error;

    /// Handle a leaf condition
    fn visit_leaf(&mut self, leaf: &L) -> Result<Self::Output, Self::Error>;

    /// Handle an `And` node
    fn visit_and(
        &mut self,
        left: &Specification<L>,
        right: &Specification<L>,
    ) -> Result<Self::Output, Self::Error>;

    /// Handle an `Or` node
    fn visit_or(
        &mut self,
        left: &Specification<L>,
        right: &Specification<L>,
    ) -> Result<Self::Output, Self::Error>;

    /// Handle a `Not` node
    fn visit_not(&mut self, spec: &Specification<L>) -> Result<Self::Output, Self::Error>;
}
