//! Products (catalog) domain module.
//!
//! This crate contains the catalog shapes the point-of-sale client reads and
//! the validation of operator input for new products. Pure domain logic (no IO,
//! no HTTP).

pub mod product;

pub use product::{FormField, NewProduct, Product, ProductForm};
