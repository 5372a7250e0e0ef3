//! Tranquil Trails Widget - Client-side shopping cart.
//!
//! The cart lives entirely in the shopper's browser: line items are kept in
//! client storage and mirrored into three views (badge, sidebar, cart page)
//! after every change.
//!
//! # Architecture
//!
//! - The page is reached through [`PageHost`]; [`Document`] is an in-memory
//!   implementation used for click delegation, tests and the CLI
//! - Storage is reached through [`KeyValueStore`] (`MemoryStore`,
//!   `FileStore`, and `LocalStorage` with the `web` feature)
//! - [`CartWidget`] wires the [`CartStore`] to the views and page chrome
//!
//! # Modules
//!
//! - [`store`] - Cart state bound to storage, tolerant loading
//! - [`views`] - Askama-rendered badge, sidebar and cart page
//! - [`dispatch`] - Delegated click recognition
//! - [`checkout`] - Checkout gate and pending-checkout record
//! - [`auth`] - Login flag, logout and admin chrome
//! - [`filter`] - Product category filter
//! - [`admin`] - Admin-only product form
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod auth;
pub mod checkout;
pub mod config;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod filter;
pub mod host;
pub mod sidebar;
pub mod storage;
pub mod store;
pub mod views;
pub mod widget;

pub use config::{ConfigError, StorageKeys, WidgetConfig};
pub use dom::{Document, Element, NodeId};
pub use error::{Result, WidgetError};
pub use host::PageHost;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::CartStore;
pub use widget::{CartWidget, ClickOutcome, PageKind};
