//! Target-side entities
//!
//! An [`Entity`] is a shape that translated expressions run against. Its
//! fields are looked up by name, so the same lambda can be compiled into a
//! closure or rendered into SQL over the matching table.

use serde::{Deserialize, Serialize};
use specwise_domain::Product;

use crate::error::StoreError;
use crate::expression::{Value, ValueKind};

/// A record type translated expressions can read
pub trait Entity {
    /// Entity name used in error messages
    const NAME: &'static str;

    /// Field names and the kind of value each holds
    const FIELDS: &'static [(&'static str, ValueKind)];

    /// Read a field by name
    fn field(&self, name: &str) -> Option<Value>;

    /// Kind of a declared field, if any
    fn field_kind(name: &str) -> Option<ValueKind> {
        Self::FIELDS
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, kind)| *kind)
    }
}

/// Persistence-layer shape of a product
///
/// Mirrors [`Product`] attribute by attribute, plus the row id. Prices are
/// stored as SQLite integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfProduct {
    /// Row id (0 until inserted)
    pub id: i64,

    /// Display name
    pub name: String,

    /// Category the product is filed under
    pub category: String,

    /// Unit price in cents
    pub price_cents: i64,
}

impl Entity for EfProduct {
    const NAME: &'static str = "EfProduct";

    const FIELDS: &'static [(&'static str, ValueKind)] = &[
        ("id", ValueKind::Integer),
        ("name", ValueKind::Text),
        ("category", ValueKind::Text),
        ("price_cents", ValueKind::Integer),
    ];

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::Integer(self.id)),
            "name" => Some(Value::Text(self.name.clone())),
            "category" => Some(Value::Text(self.category.clone())),
            "price_cents" => Some(Value::Integer(self.price_cents)),
            _ => None,
        }
    }
}

impl From<&Product> for EfProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: 0,
            name: product.name.clone(),
            category: product.category.clone(),
            price_cents: i64::from(product.price_cents),
        }
    }
}

impl TryFrom<&EfProduct> for Product {
    type Error = StoreError;

    fn try_from(row: &EfProduct) -> Result<Self, Self::Error> {
        let price_cents = u32::try_from(row.price_cents).map_err(|_| {
            StoreError::InvalidData(format!(
                "price_cents {} of product {} is out of range",
                row.price_cents, row.id
            ))
        })?;
        Ok(Product::new(row.name.clone(), row.category.clone(), price_cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_image_mirrors_product() {
        let product = Product::new("Kettle", "cat1", 2_499);
        let row = EfProduct::from(&product);

        assert_eq!(row.id, 0);
        assert_eq!(row.field("category"), Some(Value::Text("cat1".into())));
        assert_eq!(row.field("price_cents"), Some(Value::Integer(2_499)));
        assert_eq!(row.field("colour"), None);
        assert_eq!(Product::try_from(&row).unwrap(), product);
    }

    #[test]
    fn test_negative_price_is_invalid() {
        let row = EfProduct {
            id: 7,
            name: "Broken".into(),
            category: "cat1".into(),
            price_cents: -1,
        };
        assert!(matches!(Product::try_from(&row), Err(StoreError::InvalidData(_))));
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(EfProduct::field_kind("category"), Some(ValueKind::Text));
        assert_eq!(EfProduct::field_kind("price_cents"), Some(ValueKind::Integer));
        assert_eq!(EfProduct::field_kind("colour"), None);
    }
}
