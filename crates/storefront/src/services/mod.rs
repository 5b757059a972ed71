//! Business logic services for storefront.
//!
//! # Services
//!
//! - `carts` - Per-session cart stores with idle expiry
//! - `contact` - Contact form delivery (simulated)

pub mod carts;
pub mod contact;

pub use carts::{CartKey, CartRegistry};
pub use contact::{ContactMessage, ContactReceipt, ContactService};
