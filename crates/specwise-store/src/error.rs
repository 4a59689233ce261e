//! Error types for expressions and the product store

use specwise_domain::SpecError;
use thiserror::Error;

/// Errors raised while compiling or rendering a lambda
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// The body references a parameter the lambda does not declare
    #[error("Parameter '{name}' is not bound by the enclosing lambda")]
    UnboundParameter {
        /// Name of the stray parameter
        name: String,
    },

    /// The body reads a field the target entity does not have
    #[error("Unknown field '{field}' on {entity}")]
    UnknownField {
        /// Target entity name
        entity: &'static str,
        /// Requested field
        field: String,
    },

    /// Operand types do not fit the operator
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
}

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The specification could not be translated
    #[error("Translation error: {0}")]
    Translation(#[from] SpecError),

    /// The translated expression could not be rendered
    #[error("Expression error: {0}")]
    Expression(#[from] ExprError),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
