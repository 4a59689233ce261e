//! SQLite-backed product table queried through translated specifications

use rusqlite::types::ToSqlOutput;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use specwise_domain::ProductSpecification;
use std::path::Path;
use tracing::{debug, info};

use crate::entity::EfProduct;
use crate::error::StoreError;
use crate::expression::{Lambda, Value};
use crate::translator::ProductExpressionTranslator;

const SELECT_PRODUCTS: &str = "SELECT id, name, category, price_cents FROM products";

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Bool(b) => ToSqlOutput::from(*b),
            Value::Integer(i) => ToSqlOutput::from(*i),
            Value::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}

/// SQLite store of `EfProduct` rows
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// store instance.
pub struct SqliteProductStore {
    conn: Connection,
}

impl SqliteProductStore {
    /// Open (or create) a store at `path`
    ///
    /// Use `:memory:` for an in-memory database.
    ///
    /// # Examples
    ///
    /// ```
    /// use specwise_store::SqliteProductStore;
    ///
    /// let store = SqliteProductStore::new(":memory:").unwrap();
    /// assert_eq!(store.count().unwrap(), 0);
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn row_to_product(row: &Row<'_>) -> rusqlite::Result<EfProduct> {
        Ok(EfProduct {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            price_cents: row.get(3)?,
        })
    }

    /// Insert a product and return its row id
    ///
    /// The `id` of `product` is ignored; SQLite assigns a new one.
    pub fn insert(&mut self, product: &EfProduct) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO products (name, category, price_cents) VALUES (?1, ?2, ?3)",
            params![&product.name, &product.category, product.price_cents],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert many products in one transaction
    pub fn insert_all<'a, I>(&mut self, products: I) -> Result<Vec<i64>, StoreError>
    where
        I: IntoIterator<Item = &'a EfProduct>,
    {
        let tx = self.conn.transaction()?;
        let mut ids = Vec::new();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO products (name, category, price_cents) VALUES (?1, ?2, ?3)",
            )?;
            for product in products {
                stmt.execute(params![&product.name, &product.category, product.price_cents])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;
        info!("Inserted {} products", ids.len());
        Ok(ids)
    }

    /// Get a product by row id
    pub fn get(&self, id: i64) -> Result<Option<EfProduct>, StoreError> {
        let product = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_PRODUCTS),
                params![id],
                Self::row_to_product,
            )
            .optional()?;
        Ok(product)
    }

    /// All products in id order
    pub fn all(&self) -> Result<Vec<EfProduct>, StoreError> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY id", SELECT_PRODUCTS))?;
        let products = stmt
            .query_map([], Self::row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    /// Number of stored products
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("negative row count {}", count)))
    }

    /// Products matching a translated lambda, in id order
    pub fn query(&self, lambda: &Lambda<EfProduct>) -> Result<Vec<EfProduct>, StoreError> {
        let filter = lambda.to_sql()?;
        let sql = format!("{} WHERE {} ORDER BY id", SELECT_PRODUCTS, filter.clause);
        debug!(sql = %sql, params = filter.params.len(), "Querying products");

        let mut stmt = self.conn.prepare(&sql)?;
        let products = stmt
            .query_map(params_from_iter(filter.params.iter()), Self::row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    /// Translate `spec` and return the matching products
    pub fn find_satisfying(
        &self,
        spec: &ProductSpecification,
    ) -> Result<Vec<EfProduct>, StoreError> {
        let lambda = ProductExpressionTranslator::expression_for(spec)?;
        self.query(&lambda)
    }
}
