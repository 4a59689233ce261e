//! Translate command implementation.

use crate::cli::SpecArgs;
use crate::commands::load_specification;
use crate::error::Result;
use crate::output::Formatter;
use crate::report::TranslationReport;
use specwise_domain::ProductSpecification;
use specwise_store::ProductExpressionTranslator;

/// Translate a specification and render it as a lambda and a SQL filter.
pub fn build_translation_report(spec: &ProductSpecification) -> Result<TranslationReport> {
    let lambda = ProductExpressionTranslator::new().translate(spec)?;
    let filter = lambda.to_sql()?;

    Ok(TranslationReport {
        specification: spec.to_string(),
        expression: lambda.to_string(),
        sql: filter.clause,
        params: filter.params,
    })
}

/// Execute the translate command.
pub fn execute_translate(args: SpecArgs, formatter: &Formatter) -> Result<()> {
    let spec = load_specification(&args.spec)?;
    let report = build_translation_report(&spec)?;
    println!("{}", formatter.format_translation(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use specwise_domain::ProductSpec;
    use specwise_store::Value;

    #[test]
    fn test_translation_report() {
        let spec = ProductSpec::price_at_most(500).and(&ProductSpec::matches_category("cat1").not());
        let report = build_translation_report(&spec).unwrap();

        assert_eq!(
            report.specification,
            r#"(price_cents <= 500 and not category == "cat1")"#
        );
        assert_eq!(
            report.expression,
            r#"ef => ((ef.price_cents <= 500) And Not((ef.category == "cat1")))"#
        );
        assert_eq!(report.sql, "((price_cents <= ?1) AND (NOT (category = ?2)))");
        assert_eq!(report.params, vec![Value::Integer(500), Value::from("cat1")]);
    }
}
