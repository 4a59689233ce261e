//! Specification error types

use thiserror::Error;

/// Errors raised while building or visiting a specification
///
/// Both variants are contract violations by the caller. They are returned
/// at the offending node and never recovered from internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A combinator was given an absent child
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A visitor has no handler for a leaf variant it encountered
    #[error("Visitor {visitor} has no handler for leaf variant {variant}")]
    MissingHandler {
        /// Type name of the visitor
        visitor: &'static str,
        /// Name of the unhandled leaf variant
        variant: &'static str,
    },
}

impl SpecError {
    /// Build a `MissingHandler` error for visitor type `V`
    pub fn missing_handler<V: ?Sized>(variant: &'static str) -> Self {
        Self::MissingHandler {
            visitor: std::any::type_name::<V>(),
            variant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PartialVisitor;

    #[test]
    fn test_missing_handler_names_visitor() {
        let err = SpecError::missing_handler::<PartialVisitor>("PriceAtMost");
        match &err {
            SpecError::MissingHandler { visitor, variant } => {
                assert!(visitor.ends_with("PartialVisitor"));
                assert_eq!(*variant, "PriceAtMost");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("PriceAtMost"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = SpecError::InvalidArgument("and: missing right operand".to_string());
        assert_eq!(err.to_string(), "Invalid argument: and: missing right operand");
    }
}
