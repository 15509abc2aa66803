//! `tsmpos-terminal`
//!
//! **Responsibility:** interactive point-of-sale client.
//!
//! This crate provides:
//! - HTTP bindings for the catalog and sales endpoints
//! - The session state container and its by-value transitions
//! - The checkout coordinator that sequences requests against that state
//! - Text rendering and command parsing for the terminal front end
//!
//! The client is a **thin shell** around the backend API; the backend remains
//! the authority on products and stock.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod view;

pub use api::{ApiError, CatalogService, HttpApi, SalesService};
pub use commands::Command;
pub use config::PosConfig;
pub use error::PosError;
pub use session::{Coordinator, Transition};
pub use state::{Notice, NoticeLevel, PosState};
