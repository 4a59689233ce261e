//! Query command implementation.

use crate::cli::QueryArgs;
use crate::commands::load_specification;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use specwise_domain::{Product, ProductSpecification};
use specwise_store::{EfProduct, ProductExpressionTranslator, SqliteProductStore};
use std::path::Path;
use tracing::{info, warn};

/// Open the store, seeding it from the catalogue when it is empty.
pub fn open_store(db: Option<&Path>, catalogue: &[Product]) -> Result<SqliteProductStore> {
    let mut store = match db {
        Some(path) => SqliteProductStore::new(path)?,
        None => SqliteProductStore::new(":memory:")?,
    };

    if store.count()? == 0 {
        let rows: Vec<EfProduct> = catalogue.iter().map(EfProduct::from).collect();
        store.insert_all(&rows)?;
        info!(count = rows.len(), "Seeded product store from catalogue");
    }

    Ok(store)
}

/// Run `spec` against the store and check every row with the compiled lambda.
///
/// Rows are checked as `EfProduct`s, so rows that do not fit a `Product`
/// (such as prices beyond `u32`) are still returned.
pub fn run_query(
    store: &SqliteProductStore,
    spec: &ProductSpecification,
) -> Result<Vec<EfProduct>> {
    let lambda = ProductExpressionTranslator::expression_for(spec)?;
    let predicate = lambda.compile()?;
    let rows = store.query(&lambda)?;

    if let Some(row) = rows.iter().find(|row| !predicate.invoke(row)) {
        warn!(id = row.id, name = %row.name, "Store returned a row outside the specification");
        return Err(CliError::InvalidInput(format!(
            "row {} does not satisfy {}",
            row.id, spec
        )));
    }

    Ok(rows)
}

/// Execute the query command.
pub fn execute_query(args: QueryArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let spec = load_specification(&args.spec)?;
    let store = open_store(args.db.as_deref(), &config.catalogue)?;
    let rows = run_query(&store, &spec)?;
    println!("{}", formatter.format_products(&rows)?);
    Ok(())
}
