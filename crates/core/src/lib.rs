//! Corner Shop Core - Shared types and the cart state machine.
//!
//! This crate provides the types used across all Corner Shop components:
//! - `storefront` - JSON storefront server holding per-session carts
//! - `cli` - Command-line catalog inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! channels, no HTTP. The cart reducer lives here so it can be tested in
//! isolation; the storefront wraps it in a subscribable state cell.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, and products
//! - [`cart`] - Cart lines, cart state, actions, and the `reduce` transition

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{
    CartAction, CartLine, CartState, Notice, NoticeLevel, OrderSummary, TAX_RATE, Transition,
    reduce,
};
pub use types::*;
