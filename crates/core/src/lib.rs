//! Tranquil Trails Core - Shared cart types.
//!
//! This crate provides the types used by every Tranquil Trails component:
//! - `widget` - The browser cart widget (store, views, dispatcher)
//! - `cli` - Command-line driver over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no storage access, no rendering. This keeps it lightweight and allows it
//! to be used anywhere, including `wasm32` builds of the widget.
//!
//! # Modules
//!
//! - [`types`] - Item ids, prices, line items, the cart collection and login state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
