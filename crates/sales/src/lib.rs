//! Sales domain module: the cart ledger and the sale it turns into.
//!
//! This crate contains business rules for the point-of-sale cart, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod cart;
pub mod sale;

pub use cart::{CartError, CartLedger, CartLine};
pub use sale::SaleRequest;
