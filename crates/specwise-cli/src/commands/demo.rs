//! Demo command implementation.

use crate::error::Result;
use crate::output::Formatter;
use crate::report::{DemoReport, DemoResult};
use specwise_domain::ProductSpec;
use specwise_store::{EfProduct, ProductExpressionTranslator};

/// Categories of the sample products, in the order they are evaluated.
pub const SAMPLE_CATEGORIES: [&str; 3] = ["cat3", "cat1", "cat2"];

/// Translate `cat1 or cat2` and invoke it on one sample product per category.
pub fn build_demo_report() -> Result<DemoReport> {
    let spec = ProductSpec::matches_category("cat1").or(&ProductSpec::matches_category("cat2"));

    let lambda = ProductExpressionTranslator::new().translate(&spec)?;
    let predicate = lambda.compile()?;

    let results = SAMPLE_CATEGORIES
        .iter()
        .map(|category| {
            let target = EfProduct {
                id: 0,
                name: format!("sample-{category}"),
                category: category.to_string(),
                price_cents: 0,
            };
            DemoResult {
                category: category.to_string(),
                matched: predicate.invoke(&target),
            }
        })
        .collect();

    Ok(DemoReport {
        expression: lambda.to_string(),
        results,
    })
}

/// Execute the demo command.
pub fn execute_demo(formatter: &Formatter) -> Result<()> {
    let report = build_demo_report()?;
    println!("{}", formatter.format_demo(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_results() {
        let report = build_demo_report().unwrap();
        let matched: Vec<bool> = report.results.iter().map(|r| r.matched).collect();
        assert_eq!(matched, vec![false, true, true]);
        assert_eq!(
            report.expression,
            r#"ef => ((ef.category == "cat1") Or (ef.category == "cat2"))"#
        );
    }
}
