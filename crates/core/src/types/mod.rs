//! Core types for the cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod account;
pub mod cart;
pub mod id;
pub mod line_item;
pub mod price;
pub mod product;

pub use account::LoginState;
pub use cart::{AddOutcome, CartState, QuantityChange, Repairs};
pub use id::*;
pub use line_item::LineItem;
pub use price::{CurrencyCode, MAX_PRICE, Price, PriceError, format_amount};
pub use product::{AddRejection, ProductInput};
