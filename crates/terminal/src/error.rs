//! Session-level error model.

use thiserror::Error;

use tsmpos_core::DomainError;
use tsmpos_sales::CartError;

use crate::api::ApiError;

/// Why a session transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PosError {
    /// Another request is still outstanding.
    #[error("a request is already in progress")]
    Busy,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PosError {
    /// Short message shown to the operator.
    pub fn user_message(&self) -> String {
        match self {
            PosError::Busy => "Please wait for the current request to finish".to_string(),
            PosError::Domain(DomainError::Validation(msg)) => sentence_case(msg),
            PosError::Domain(DomainError::NotFound(what)) => format!("No such {what}"),
            PosError::Domain(other) => other.to_string(),
            PosError::Cart(CartError::OutOfStock(_)) => "Out of stock!".to_string(),
            PosError::Cart(CartError::InsufficientStock { .. }) => "Not enough stock".to_string(),
            PosError::Cart(CartError::Empty) => "Cart is empty".to_string(),
            PosError::Api(err) => err.user_message("Request failed"),
        }
    }
}

fn sentence_case(msg: &str) -> String {
    let mut chars = msg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
