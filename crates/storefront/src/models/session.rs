//! Session-related types.

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the shopper's cart key.
    pub const CART_KEY: &str = "cart_key";
}
