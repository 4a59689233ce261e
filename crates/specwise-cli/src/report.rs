//! Command results, independent of how they are printed.

use serde::Serialize;
use specwise_domain::Product;
use specwise_store::Value;

/// Result of invoking a translated expression on one target item.
#[derive(Debug, Clone, Serialize)]
pub struct DemoResult {
    /// Category of the target item
    pub category: String,
    /// Whether the compiled expression matched it
    pub matched: bool,
}

/// Output of the `demo` command.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Textual form of the translated expression
    pub expression: String,
    /// One result per sample item, in order
    pub results: Vec<DemoResult>,
}

/// Output of the `translate` command.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationReport {
    /// Direct textual form of the specification
    pub specification: String,
    /// Translated lambda
    pub expression: String,
    /// Rendered SQL `WHERE` clause
    pub sql: String,
    /// Values bound to the SQL placeholders
    pub params: Vec<Value>,
}

/// One catalogue product evaluated both ways.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// The product
    pub product: Product,
    /// Result of `is_satisfied_by`
    pub direct: bool,
    /// Result of the compiled translated expression
    pub translated: bool,
}

impl Evaluation {
    /// Whether both evaluation paths agree
    pub fn agrees(&self) -> bool {
        self.direct == self.translated
    }
}
