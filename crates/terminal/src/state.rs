//! Session state and its transitions.
//!
//! `PosState` is a plain value. Every transition borrows the current state and
//! returns the next one, so a refused transition leaves the caller holding the
//! state it started with. Requests are bracketed by a `begin_*` transition that
//! raises the busy flag and a completing transition that lowers it.

use chrono::{DateTime, Utc};

use tsmpos_core::{DomainError, ProductId};
use tsmpos_products::{FormField, NewProduct, Product, ProductForm};
use tsmpos_sales::{CartLedger, SaleRequest};

use crate::error::PosError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&PosError> for Notice {
    fn from(err: &PosError) -> Self {
        Notice::error(err.user_message())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PosState {
    products: Vec<Product>,
    cart: CartLedger,
    form: ProductForm,
    busy: bool,
    catalog_refreshed_at: Option<DateTime<Utc>>,
}

impl PosState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn catalog_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.catalog_refreshed_at
    }

    /// Look a product up by id, falling back to its 1-based list position.
    pub fn find_product(&self, selector: &ProductId) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| &p.id == selector)
            .or_else(|| {
                selector
                    .as_str()
                    .parse::<usize>()
                    .ok()
                    .and_then(|pos| pos.checked_sub(1))
                    .and_then(|idx| self.products.get(idx))
            })
    }

    fn ensure_idle(&self) -> Result<(), PosError> {
        if self.busy {
            return Err(PosError::Busy);
        }
        Ok(())
    }

    fn with_busy(&self, busy: bool) -> Self {
        Self {
            busy,
            ..self.clone()
        }
    }

    pub fn with_form_field(&self, field: FormField, value: impl Into<String>) -> Self {
        Self {
            form: self.form.with_field(field, value),
            ..self.clone()
        }
    }

    /// Add one unit of the selected product to the cart.
    ///
    /// Stock is checked against the product as last fetched from the catalog.
    pub fn add_to_cart(&self, selector: &str) -> Result<Self, PosError> {
        self.ensure_idle()?;
        let selector = selector.parse::<ProductId>()?;
        let product = self
            .find_product(&selector)
            .ok_or_else(|| DomainError::not_found(format!("product '{selector}'")))?;
        let cart = self.cart.add_to_cart(product)?;
        Ok(Self {
            cart,
            ..self.clone()
        })
    }

    /// Start a catalog fetch.
    pub fn begin_refresh(&self) -> Result<Self, PosError> {
        self.ensure_idle()?;
        Ok(self.with_busy(true))
    }

    /// Complete a catalog fetch. A failed fetch keeps the previous list.
    pub fn finish_refresh(&self, fetched: Option<Vec<Product>>, at: DateTime<Utc>) -> Self {
        match fetched {
            Some(products) => Self {
                products,
                busy: false,
                catalog_refreshed_at: Some(at),
                ..self.clone()
            },
            None => self.with_busy(false),
        }
    }

    /// Validate the form and start creating the product it describes.
    pub fn begin_add_product(&self) -> Result<(Self, NewProduct), PosError> {
        self.ensure_idle()?;
        let new_product = self.form.validate()?;
        Ok((self.with_busy(true), new_product))
    }

    /// The backend created `product`: list it and reset the form.
    pub fn complete_add_product(&self, product: Product) -> Self {
        let mut products = self.products.clone();
        products.push(product);
        Self {
            products,
            form: ProductForm::default(),
            busy: false,
            ..self.clone()
        }
    }

    /// Build the sale for the current cart and start submitting it.
    pub fn begin_checkout(&self) -> Result<(Self, SaleRequest), PosError> {
        self.ensure_idle()?;
        let sale = SaleRequest::from_ledger(&self.cart)?;
        Ok((self.with_busy(true), sale))
    }

    /// The backend recorded the sale: empty the cart.
    ///
    /// The session stays busy; the catalog refresh that follows lowers the flag.
    pub fn complete_sale(&self) -> Self {
        Self {
            cart: self.cart.clear(),
            ..self.clone()
        }
    }

    /// A request failed; discard its intended change and go idle.
    pub fn abort_request(&self) -> Self {
        self.with_busy(false)
    }
}
