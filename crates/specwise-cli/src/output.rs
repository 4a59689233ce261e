//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::report::{DemoReport, Evaluation, TranslationReport};
use colored::*;
use specwise_store::EfProduct;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the demo report: the expression, then one boolean per line.
    pub fn format_demo(&self, report: &DemoReport) -> Result<String> {
        let results = report.results.iter().map(|r| self.boolean(r.matched));
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(results.collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                let mut lines = vec![report.expression.clone()];
                lines.extend(results);
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a translation report.
    pub fn format_translation(&self, report: &TranslationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.expression.clone()),
            OutputFormat::Table => {
                let params: Vec<String> = report.params.iter().map(|p| p.to_string()).collect();
                Ok(format!(
                    "{}  {}\n{}  {}\n{}  {}\n{}  [{}]",
                    self.colorize("specification", "cyan"),
                    report.specification,
                    self.colorize("expression   ", "cyan"),
                    report.expression,
                    self.colorize("sql          ", "cyan"),
                    report.sql,
                    self.colorize("params       ", "cyan"),
                    params.join(", ")
                ))
            }
        }
    }

    /// Format catalogue evaluations.
    pub fn format_evaluations(&self, evaluations: &[Evaluation]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(evaluations)?),
            OutputFormat::Quiet => Ok(evaluations
                .iter()
                .filter(|e| e.translated)
                .map(|e| e.product.name.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if evaluations.is_empty() {
                    return Ok(self.colorize("Catalogue is empty.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Name", "Category", "Price", "Direct", "Translated"]);
                for evaluation in evaluations {
                    let product = &evaluation.product;
                    builder.push_record([
                        product.name.clone(),
                        product.category.clone(),
                        format_price(i64::from(product.price_cents)),
                        self.boolean(evaluation.direct),
                        self.boolean(evaluation.translated),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format products returned by a store query.
    pub fn format_products(&self, products: &[EfProduct]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(products)?),
            OutputFormat::Quiet => Ok(products
                .iter()
                .map(|p| p.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if products.is_empty() {
                    return Ok(self.colorize("No products found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Category", "Price"]);
                for product in products {
                    builder.push_record([
                        product.id.to_string(),
                        product.name.clone(),
                        product.category.clone(),
                        format_price(product.price_cents),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a boolean result, green when true and red when false.
    fn boolean(&self, value: bool) -> String {
        let color = if value { "green" } else { "red" };
        self.colorize(&value.to_string(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn format_price(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}
