use serde::{Deserialize, Serialize};

use crate::cart::{CartError, CartLedger, CartLine};

/// Body of a sale submission: every cart line with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub items: Vec<CartLine>,
}

impl SaleRequest {
    /// Build the submission for `ledger`. An empty cart cannot be sold.
    pub fn from_ledger(ledger: &CartLedger) -> Result<Self, CartError> {
        if ledger.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(Self {
            items: ledger.lines().to_vec(),
        })
    }

    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
