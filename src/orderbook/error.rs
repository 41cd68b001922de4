//! Error taxonomy for validation and internal invariants (§7).

use std::fmt;

/// Errors reported synchronously to the submitter, before any book mutation
/// (§7 "Validation"). These are rejected input, not internal bugs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// `symbol` was empty.
    MissingSymbol,
    /// `quantity` was not strictly positive.
    NonPositiveQuantity,
    /// `order_type` was `LIMIT`/`IOC`/`FOK` but `price` was absent.
    MissingPrice,
    /// `price` was present but not strictly positive.
    NonPositivePrice,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingSymbol => write!(f, "symbol must be non-empty"),
            ValidationError::NonPositiveQuantity => write!(f, "quantity must be greater than zero"),
            ValidationError::MissingPrice => {
                write!(f, "price is required for limit, ioc, and fok orders")
            }
            ValidationError::NonPositivePrice => write!(f, "price must be greater than zero"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A violated book invariant (§7 "Internal invariant violation"). These
/// indicate bugs in the matching engine, not conditions a caller can cause
/// or recover from; the affected book should be treated as unsafe to match
/// against until investigated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderBookError {
    /// A price level with `total_qty == 0` was found still present on the book.
    EmptyLevelPersisted { price: String },
    /// A match produced a negative residual quantity.
    NegativeResidual { remaining: String },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::EmptyLevelPersisted { price } => {
                write!(f, "invariant violation: empty level persisted at price {price}")
            }
            OrderBookError::NegativeResidual { remaining } => {
                write!(f, "invariant violation: negative residual quantity {remaining}")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
