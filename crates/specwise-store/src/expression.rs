//! Introspectable boolean expressions over a target entity
//!
//! A [`Lambda<E>`] is a single [`Parameter`] plus a body [`Expr`] that reads
//! fields of that parameter. It is a plain value: it can be printed, checked,
//! compiled into a [`CompiledPredicate`] or rendered into SQL.
//!
//! ```
//! use specwise_store::{EfProduct, Expr, Lambda, Parameter};
//!
//! let ef = Parameter::new("ef");
//! let body = Expr::equal(Expr::member(&ef, "category"), Expr::constant("cat1"));
//! let lambda: Lambda<EfProduct> = Lambda::new(ef, body);
//!
//! assert_eq!(lambda.to_string(), r#"ef => (ef.category == "cat1")"#);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::entity::Entity;
use crate::error::ExprError;

static NEXT_PARAMETER_ID: AtomicU64 = AtomicU64::new(1);

/// A constant or field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Signed integer
    Integer(i64),
    /// UTF-8 text
    Text(String),
}

/// The kind of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Boolean
    Bool,
    /// Signed integer
    Integer,
    /// UTF-8 text
    Text,
}

impl Value {
    /// Kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Text(_) => ValueKind::Text,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// The free variable of a lambda
///
/// Identity is the process-unique id, not the name: two parameters both
/// called `ef` are different variables.
#[derive(Debug, Clone)]
pub struct Parameter {
    id: u64,
    name: Arc<str>,
}

impl Parameter {
    /// Create a fresh parameter
    pub fn new(name: &str) -> Self {
        Self {
            id: NEXT_PARAMETER_ID.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(name),
        }
    }

    /// Unique id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value
    Constant(Value),

    /// `parameter.field`
    Member {
        /// Parameter being read
        parameter: Parameter,
        /// Field name on the target entity
        field: String,
    },

    /// `left == right`
    Equal(Box<Expr>, Box<Expr>),

    /// `left <= right`
    LessThanOrEqual(Box<Expr>, Box<Expr>),

    /// Logical and; both operands are evaluated
    And(Box<Expr>, Box<Expr>),

    /// Logical or; both operands are evaluated
    Or(Box<Expr>, Box<Expr>),

    /// Logical negation
    Not(Box<Expr>),
}

impl Expr {
    /// Literal value
    pub fn constant(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    /// Field access on `parameter`
    pub fn member(parameter: &Parameter, field: &str) -> Self {
        Expr::Member {
            parameter: parameter.clone(),
            field: field.to_string(),
        }
    }

    /// `left == right`
    pub fn equal(left: Expr, right: Expr) -> Self {
        Expr::Equal(Box::new(left), Box::new(right))
    }

    /// `left <= right`
    pub fn less_than_or_equal(left: Expr, right: Expr) -> Self {
        Expr::LessThanOrEqual(Box::new(left), Box::new(right))
    }

    /// `left And right`
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// `left Or right`
    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// `Not(expr)`
    pub fn negate(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    /// Replace every reference to `from` with `to`
    pub fn rebind(self, from: &Parameter, to: &Parameter) -> Self {
        match self {
            Expr::Member { parameter, field } => Expr::Member {
                parameter: if parameter == *from { to.clone() } else { parameter },
                field,
            },
            Expr::Constant(value) => Expr::Constant(value),
            Expr::Equal(l, r) => Expr::equal(l.rebind(from, to), r.rebind(from, to)),
            Expr::LessThanOrEqual(l, r) => {
                Expr::less_than_or_equal(l.rebind(from, to), r.rebind(from, to))
            }
            Expr::And(l, r) => Expr::and(l.rebind(from, to), r.rebind(from, to)),
            Expr::Or(l, r) => Expr::or(l.rebind(from, to), r.rebind(from, to)),
            Expr::Not(e) => Expr::negate(e.rebind(from, to)),
        }
    }

    /// Distinct parameters referenced anywhere in this expression
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut found = Vec::new();
        self.collect_parameters(&mut found);
        found
    }

    fn collect_parameters(&self, found: &mut Vec<Parameter>) {
        match self {
            Expr::Constant(_) => {}
            Expr::Member { parameter, .. } => {
                if !found.contains(parameter) {
                    found.push(parameter.clone());
                }
            }
            Expr::Equal(l, r) | Expr::LessThanOrEqual(l, r) | Expr::And(l, r) | Expr::Or(l, r) => {
                l.collect_parameters(found);
                r.collect_parameters(found);
            }
            Expr::Not(e) => e.collect_parameters(found),
        }
    }

    /// Infer the value kind of this expression for entity `E`
    ///
    /// Every parameter must be `bound`.
    pub(crate) fn check<E: Entity>(&self, bound: &Parameter) -> Result<ValueKind, ExprError> {
        match self {
            Expr::Constant(value) => Ok(value.kind()),
            Expr::Member { parameter, field } => {
                if parameter != bound {
                    return Err(ExprError::UnboundParameter {
                        name: parameter.name().to_string(),
                    });
                }
                E::field_kind(field).ok_or_else(|| ExprError::UnknownField {
                    entity: E::NAME,
                    field: field.clone(),
                })
            }
            Expr::Equal(l, r) => {
                let (left, right) = (l.check::<E>(bound)?, r.check::<E>(bound)?);
                if left != right {
                    return Err(ExprError::TypeMismatch(format!(
                        "cannot compare {} with {} in {}",
                        left, right, self
                    )));
                }
                Ok(ValueKind::Bool)
            }
            Expr::LessThanOrEqual(l, r) => {
                let (left, right) = (l.check::<E>(bound)?, r.check::<E>(bound)?);
                if left != right || left == ValueKind::Bool {
                    return Err(ExprError::TypeMismatch(format!(
                        "cannot order {} against {} in {}",
                        left, right, self
                    )));
                }
                Ok(ValueKind::Bool)
            }
            Expr::And(l, r) | Expr::Or(l, r) => {
                expect_bool(l.check::<E>(bound)?, l)?;
                expect_bool(r.check::<E>(bound)?, r)?;
                Ok(ValueKind::Bool)
            }
            Expr::Not(e) => {
                expect_bool(e.check::<E>(bound)?, e)?;
                Ok(ValueKind::Bool)
            }
        }
    }
}

fn expect_bool(kind: ValueKind, expr: &Expr) -> Result<(), ExprError> {
    if kind == ValueKind::Bool {
        Ok(())
    } else {
        Err(ExprError::TypeMismatch(format!(
            "expected bool, found {} in {}",
            kind, expr
        )))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::Member { parameter, field } => write!(f, "{}.{}", parameter, field),
            Expr::Equal(l, r) => write!(f, "({} == {})", l, r),
            Expr::LessThanOrEqual(l, r) => write!(f, "({} <= {})", l, r),
            Expr::And(l, r) => write!(f, "({} And {})", l, r),
            Expr::Or(l, r) => write!(f, "({} Or {})", l, r),
            Expr::Not(e) => write!(f, "Not({})", e),
        }
    }
}

/// A boolean expression over one parameter of type `E`
pub struct Lambda<E> {
    parameter: Parameter,
    body: Expr,
    _target: PhantomData<fn(&E) -> bool>,
}

impl<E> Lambda<E> {
    /// Create a lambda from its parameter and body
    pub fn new(parameter: Parameter, body: Expr) -> Self {
        Self {
            parameter,
            body,
            _target: PhantomData,
        }
    }

    /// The declared parameter
    pub fn parameter(&self) -> &Parameter {
        &self.parameter
    }

    /// The body expression
    pub fn body(&self) -> &Expr {
        &self.body
    }

    /// Split into parameter and body
    pub fn into_parts(self) -> (Parameter, Expr) {
        (self.parameter, self.body)
    }

    /// Distinct parameters the body references
    ///
    /// A well-formed lambda references only its own parameter.
    pub fn free_parameters(&self) -> Vec<Parameter> {
        self.body.parameters()
    }
}

impl<E: Entity> Lambda<E> {
    /// Type-check the body against `E`
    ///
    /// # Errors
    /// `UnboundParameter`, `UnknownField` or `TypeMismatch`
    pub fn check(&self) -> Result<(), ExprError> {
        let kind = self.body.check::<E>(&self.parameter)?;
        expect_bool(kind, &self.body)
    }
}

impl<E: Entity + 'static> Lambda<E> {
    /// Compile into a callable predicate
    ///
    /// # Errors
    /// Fails if the body does not type-check against `E`
    pub fn compile(&self) -> Result<CompiledPredicate<E>, ExprError> {
        self.check()?;
        Ok(CompiledPredicate {
            evaluate: compile_expr::<E>(&self.body),
        })
    }
}

impl<E> Clone for Lambda<E> {
    fn clone(&self) -> Self {
        Self::new(self.parameter.clone(), self.body.clone())
    }
}

impl<E> fmt::Debug for Lambda<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("parameter", &self.parameter)
            .field("body", &self.body)
            .finish()
    }
}

impl<E> fmt::Display for Lambda<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.parameter, self.body)
    }
}

type Evaluator<E> = Box<dyn Fn(&E) -> Option<Value> + Send + Sync>;

fn compile_expr<E: Entity + 'static>(expr: &Expr) -> Evaluator<E> {
    match expr {
        Expr::Constant(value) => {
            let value = value.clone();
            Box::new(move |_: &E| Some(value.clone()))
        }
        Expr::Member { field, .. } => {
            let field = field.clone();
            Box::new(move |item: &E| item.field(&field))
        }
        Expr::Equal(l, r) => {
            let (l, r) = (compile_expr::<E>(l), compile_expr::<E>(r));
            Box::new(move |item: &E| Some(Value::Bool(l(item)? == r(item)?)))
        }
        Expr::LessThanOrEqual(l, r) => {
            let (l, r) = (compile_expr::<E>(l), compile_expr::<E>(r));
            Box::new(move |item: &E| match (l(item)?, r(item)?) {
                (Value::Integer(a), Value::Integer(b)) => Some(Value::Bool(a <= b)),
                (Value::Text(a), Value::Text(b)) => Some(Value::Bool(a <= b)),
                _ => None,
            })
        }
        Expr::And(l, r) => {
            let (l, r) = (compile_expr::<E>(l), compile_expr::<E>(r));
            Box::new(move |item: &E| Some(Value::Bool(truthy(l(item)) & truthy(r(item)))))
        }
        Expr::Or(l, r) => {
            let (l, r) = (compile_expr::<E>(l), compile_expr::<E>(r));
            Box::new(move |item: &E| Some(Value::Bool(truthy(l(item)) | truthy(r(item)))))
        }
        Expr::Not(e) => {
            let e = compile_expr::<E>(e);
            Box::new(move |item: &E| match e(item)? {
                Value::Bool(b) => Some(Value::Bool(!b)),
                _ => None,
            })
        }
    }
}

fn truthy(value: Option<Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

/// A compiled lambda, callable on target items
pub struct CompiledPredicate<E> {
    evaluate: Evaluator<E>,
}

impl<E> CompiledPredicate<E> {
    /// Evaluate the predicate for one item
    ///
    /// Values an entity fails to supply make the predicate false.
    pub fn invoke(&self, item: &E) -> bool {
        truthy((self.evaluate)(item))
    }
}

impl<E> fmt::Debug for CompiledPredicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPredicate").finish_non_exhaustive()
    }
}
