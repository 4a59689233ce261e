//! SQL rendering of translated lambdas
//!
//! A lambda becomes a parameterized `WHERE` clause over the entity's table.
//! Field names are emitted as column names only after the lambda has been
//! checked against [`Entity::FIELDS`]; constants always travel as positional
//! parameters.

use crate::entity::Entity;
use crate::error::ExprError;
use crate::expression::{Expr, Lambda, Value};

/// A rendered `WHERE` clause and its positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFilter {
    /// Clause text using `?1`, `?2`, ... placeholders
    pub clause: String,

    /// Values bound to the placeholders, in order
    pub params: Vec<Value>,
}

impl<E: Entity> Lambda<E> {
    /// Render the body as a SQL `WHERE` clause
    ///
    /// # Errors
    /// Fails if the body does not type-check against `E`
    ///
    /// # Examples
    ///
    /// ```
    /// use specwise_store::{EfProduct, Expr, Lambda, Parameter, Value};
    ///
    /// let ef = Parameter::new("ef");
    /// let body = Expr::or(
    ///     Expr::equal(Expr::member(&ef, "category"), Expr::constant("cat1")),
    ///     Expr::equal(Expr::member(&ef, "category"), Expr::constant("cat2")),
    /// );
    /// let filter = Lambda::<EfProduct>::new(ef, body).to_sql().unwrap();
    ///
    /// assert_eq!(filter.clause, "((category = ?1) OR (category = ?2))");
    /// assert_eq!(filter.params, vec![Value::from("cat1"), Value::from("cat2")]);
    /// ```
    pub fn to_sql(&self) -> Result<SqlFilter, ExprError> {
        self.check()?;
        let mut params = Vec::new();
        let clause = render(self.body(), &mut params);
        Ok(SqlFilter { clause, params })
    }
}

fn render(expr: &Expr, params: &mut Vec<Value>) -> String {
    match expr {
        Expr::Constant(value) => {
            params.push(value.clone());
            format!("?{}", params.len())
        }
        Expr::Member { field, .. } => field.clone(),
        Expr::Equal(l, r) => binary(l, "=", r, params),
        Expr::LessThanOrEqual(l, r) => binary(l, "<=", r, params),
        Expr::And(l, r) => binary(l, "AND", r, params),
        Expr::Or(l, r) => binary(l, "OR", r, params),
        Expr::Not(e) => format!("(NOT {})", render(e, params)),
    }
}

fn binary(left: &Expr, op: &str, right: &Expr, params: &mut Vec<Value>) -> String {
    let left = render(left, params);
    let right = render(right, params);
    format!("({} {} {})", left, op, right)
}
