use serde::{Deserialize, Serialize};

use tsmpos_core::{DomainError, DomainResult, Money, ProductId};

/// A product as served by the catalog backend.
///
/// The backend is the authority on every field, including `stock`; the client
/// only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    pub stock: u32,
}

impl Product {
    pub fn is_in_stock(&self) -> bool {
        self.stock >= 1
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub stock: u32,
}

/// One input of the "Add Product" form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Price,
    Stock,
}

/// Raw operator input for a new product, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
}

impl ProductForm {
    /// Return a copy of the form with one field replaced.
    pub fn with_field(&self, field: FormField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            FormField::Name => next.name = value,
            FormField::Price => next.price = value,
            FormField::Stock => next.stock = value,
        }
        next
    }

    pub fn is_complete(&self) -> bool {
        [&self.name, &self.price, &self.stock]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    /// Validate the form into a create payload.
    ///
    /// Every field is required; price must be a non-negative decimal and stock
    /// a non-negative integer.
    pub fn validate(&self) -> DomainResult<NewProduct> {
        if !self.is_complete() {
            return Err(DomainError::validation("fill all product fields"));
        }

        let price = self.price.parse::<Money>()?;
        let stock = self.stock.trim().parse::<u32>().map_err(|_| {
            DomainError::validation(format!("'{}' is not a valid stock count", self.stock.trim()))
        })?;

        Ok(NewProduct {
            name: self.name.trim().to_string(),
            price,
            stock,
        })
    }
}
