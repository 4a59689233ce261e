//! Specwise Storage Layer
//!
//! Translates product specifications into backend expressions and runs them.
//!
//! # Architecture
//!
//! - [`expression`]: an introspectable expression tree (`Lambda<E>`) that can
//!   be printed, compiled into a predicate, or rendered to SQL
//! - [`translator`]: the visitor folding a specification into a lambda, with
//!   `ProductExpressionTranslator` handling product leaves
//! - [`sqlite`]: a SQLite table of `EfProduct` rows queried with those lambdas
//!
//! # Examples
//!
//! ```
//! use specwise_domain::{Product, ProductSpec};
//! use specwise_store::{EfProduct, ProductExpressionTranslator};
//!
//! let spec = ProductSpec::matches_category("cat1") | ProductSpec::matches_category("cat2");
//! let predicate = ProductExpressionTranslator::expression_for(&spec)
//!     .unwrap()
//!     .compile()
//!     .unwrap();
//!
//! let kettle = Product::new("Kettle", "cat1", 2_499);
//! assert!(predicate.invoke(&EfProduct::from(&kettle)));
//! ```

#![warn(missing_docs)]

pub mod entity;
pub mod error;
pub mod expression;
pub mod sql;
pub mod sqlite;
pub mod translator;

pub use entity::{EfProduct, Entity};
pub use error::{ExprError, StoreError};
pub use expression::{CompiledPredicate, Expr, Lambda, Parameter, Value, ValueKind};
pub use sql::SqlFilter;
pub use sqlite::SqliteProductStore;
pub use translator::{
    combine_and, combine_or, negate, ExpressionVisitor, LeafTranslator, ProductExpressionTranslator,
};
