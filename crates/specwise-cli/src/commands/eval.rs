//! Eval command implementation.

use crate::cli::SpecArgs;
use crate::commands::load_specification;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::report::Evaluation;
use specwise_domain::{Product, ProductSpecification};
use specwise_store::{EfProduct, ProductExpressionTranslator};
use tracing::warn;

/// Evaluate `spec` against each product, directly and through its translation.
pub fn evaluate_catalogue(
    spec: &ProductSpecification,
    catalogue: &[Product],
) -> Result<Vec<Evaluation>> {
    let predicate = ProductExpressionTranslator::expression_for(spec)?.compile()?;

    let evaluations: Vec<Evaluation> = catalogue
        .iter()
        .map(|product| Evaluation {
            product: product.clone(),
            direct: spec.is_satisfied_by(product),
            translated: predicate.invoke(&EfProduct::from(product)),
        })
        .collect();

    for evaluation in evaluations.iter().filter(|e| !e.agrees()) {
        warn!(
            product = %evaluation.product.name,
            direct = evaluation.direct,
            translated = evaluation.translated,
            "Translated expression disagrees with specification"
        );
    }

    Ok(evaluations)
}

/// Execute the eval command.
pub fn execute_eval(args: SpecArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let spec = load_specification(&args.spec)?;
    let evaluations = evaluate_catalogue(&spec, &config.catalogue)?;
    println!("{}", formatter.format_evaluations(&evaluations)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use specwise_domain::ProductSpec;

    #[test]
    fn test_evaluations_agree() {
        let config = Config::default();
        let spec = ProductSpec::matches_category("cat1").and(&ProductSpec::price_at_most(1_000));

        let evaluations = evaluate_catalogue(&spec, &config.catalogue).unwrap();
        assert_eq!(evaluations.len(), config.catalogue.len());
        assert!(evaluations.iter().all(Evaluation::agrees));

        let matched: Vec<&str> = evaluations
            .iter()
            .filter(|e| e.translated)
            .map(|e| e.product.name.as_str())
            .collect();
        assert_eq!(matched, vec!["Mug"]);
    }

    #[test]
    fn test_empty_catalogue() {
        let spec = ProductSpec::matches_category("cat1");
        assert!(evaluate_catalogue(&spec, &[]).unwrap().is_empty());
    }
}
