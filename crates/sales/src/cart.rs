use serde::{Deserialize, Serialize};
use thiserror::Error;

use tsmpos_core::{Money, ProductId};
use tsmpos_products::Product;

/// Reasons a cart operation is refused. A refused operation never changes the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
    #[error("not enough stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: u32,
        available: u32,
    },
    #[error("cart is empty")]
    Empty,
}

/// A product snapshot and how many of it are in the cart.
///
/// Serialises as the product's own fields plus `quantity`, which is the line
/// shape the sales endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// `price * quantity` for this line.
    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

/// The in-memory cart of the current session.
///
/// Every operation takes `&self` and returns a new ledger; a ledger value is
/// never modified after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Quantity of `id` currently in the cart (0 when absent).
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.id() == id)
            .map_or(0, |line| line.quantity)
    }

    /// Add one unit of `product`.
    ///
    /// Merges into the existing line for the same product id, refreshing its
    /// snapshot. The resulting quantity may not exceed `product.stock`.
    pub fn add_to_cart(&self, product: &Product) -> Result<CartLedger, CartError> {
        if !product.is_in_stock() {
            return Err(CartError::OutOfStock(product.id.clone()));
        }

        let mut lines = self.lines.clone();
        match lines.iter_mut().find(|line| line.id() == &product.id) {
            Some(line) => {
                let requested = line.quantity.saturating_add(1);
                if requested > product.stock {
                    return Err(CartError::InsufficientStock {
                        product: product.id.clone(),
                        requested,
                        available: product.stock,
                    });
                }
                line.product = product.clone();
                line.quantity = requested;
            }
            None => lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }

        Ok(CartLedger { lines })
    }

    /// Sum of `price * quantity` over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The empty ledger that follows a completed sale.
    pub fn clear(&self) -> CartLedger {
        CartLedger::new()
    }
}
