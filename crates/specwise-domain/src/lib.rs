//! Specwise Domain Layer
//!
//! This crate contains the specification model: composable, immutable boolean
//! predicates over a domain item, and the visitor protocol that lets other
//! layers fold a specification into something else (an expression, a query,
//! a document) without downcasting.
//!
//! ## Key Concepts
//!
//! - **Specification**: a leaf condition or an `And`/`Or`/`Not` combinator
//! - **Leaf**: the closed enum of atomic conditions of one domain
//! - **Visitor**: variant-specific handling of a specification tree
//! - **Document**: the serde form of a specification
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure business logic only, no I/O and no logging
//! - Translators to concrete backends live in other crates
//!
//! # Examples
//!
//! ```
//! use specwise_domain::{Product, ProductSpec};
//!
//! let spec = ProductSpec::matches_category("cat1") | ProductSpec::matches_category("cat2");
//!
//! assert!(spec.is_satisfied_by(&Product::new("Kettle", "cat1", 2_499)));
//! assert!(!spec.is_satisfied_by(&Product::new("Lamp", "cat3", 1_299)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod product;
pub mod specification;
pub mod visitor;

// Re-exports for convenience
pub use document::SpecDocument;
pub use error::SpecError;
pub use product::{Product, ProductSpec, ProductSpecVisitor, ProductSpecification};
pub use specification::{and, not, or, Leaf, Specification};
pub use visitor::SpecificationVisitor;
