//! Subscribable cart state cell.
//!
//! `CartStore` owns one cart. Every mutation runs [`cornershop_core::reduce`]
//! while holding the watch channel's write lock, then swaps in a fresh
//! `Arc<CartState>`. Readers holding an older snapshot keep it unchanged.
//!
//! Two channels hang off the store:
//! - a `watch` channel with the latest state, for re-rendering
//! - a `broadcast` channel of [`Notice`]s, for toast-style messages
//!
//! Notices are fire-and-forget: with no subscribers they are dropped. The
//! caller of an operation gets its own notice back in a [`CartUpdate`].

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use cornershop_core::{CartAction, CartState, Notice, NoticeLevel, Product, ProductId, reduce};

/// Buffered notices per subscriber before old ones are dropped.
const NOTICE_CAPACITY: usize = 32;

/// A single shopper's cart.
#[derive(Debug)]
pub struct CartStore {
    state: watch::Sender<Arc<CartState>>,
    notices: broadcast::Sender<Notice>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(Arc::new(CartState::empty()));
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self { state, notices }
    }

    /// The current cart state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CartState> {
        Arc::clone(&self.state.borrow())
    }

    /// Receive the latest state whenever the cart's contents change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<CartState>> {
        self.state.subscribe()
    }

    /// Receive notices emitted by subsequent transitions.
    #[must_use]
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    pub fn add_to_cart(&self, product: Arc<Product>, quantity: u32) -> CartUpdate {
        self.dispatch(CartAction::Add { product, quantity })
    }

    pub fn remove_from_cart(&self, product_id: ProductId) -> CartUpdate {
        self.dispatch(CartAction::Remove { product_id })
    }

    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) -> CartUpdate {
        self.dispatch(CartAction::UpdateQuantity {
            product_id,
            quantity,
        })
    }

    pub fn clear_cart(&self) -> CartUpdate {
        self.dispatch(CartAction::Clear)
    }

    fn dispatch(&self, action: CartAction) -> CartUpdate {
        let mut notice = None;
        let mut state = None;

        let changed = self.state.send_if_modified(|current| {
            let transition = reduce(current, action);
            notice = transition.notice;
            let modified = transition.state != **current;
            if modified {
                *current = Arc::new(transition.state);
            }
            state = Some(Arc::clone(current));
            modified
        });
        let state = state.unwrap_or_else(|| self.snapshot());

        if changed {
            tracing::debug!(
                lines = state.lines().len(),
                subtotal = %state.subtotal(),
                "Cart updated"
            );
        }

        if let Some(notice) = &notice {
            match notice.level {
                NoticeLevel::Success => tracing::info!(message = %notice.message, "Cart notice"),
                NoticeLevel::Info => tracing::debug!(message = %notice.message, "Cart notice"),
            }
            // No subscribers is fine.
            let _ = self.notices.send(notice.clone());
        }

        CartUpdate { state, notice }
    }
}

/// Result of one cart operation: the state it produced and its notice.
///
/// Unlike the broadcast channel, this belongs to the caller alone.
#[derive(Debug, Clone)]
pub struct CartUpdate {
    pub state: Arc<CartState>,
    pub notice: Option<Notice>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::Catalog;

    fn product(id: i32) -> Arc<Product> {
        Catalog::seeded().find_by_id(ProductId::new(id)).unwrap()
    }

    fn drain(receiver: &mut broadcast::Receiver<Notice>) -> Vec<Notice> {
        std::iter::from_fn(|| receiver.try_recv().ok()).collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = CartStore::new();
        let state = store.snapshot();
        assert!(state.is_empty());
        assert_eq!(state.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_operations_update_snapshot() {
        let store = CartStore::new();
        store.add_to_cart(product(2), 1); // 89.99
        store.add_to_cart(product(4), 2); // 24.99 x 2
        assert_eq!(store.snapshot().subtotal(), Decimal::new(13997, 2));

        store.update_quantity(ProductId::new(4), 1);
        assert_eq!(store.snapshot().subtotal(), Decimal::new(11498, 2));

        store.remove_from_cart(ProductId::new(2));
        assert_eq!(store.snapshot().subtotal(), Decimal::new(2499, 2));

        store.clear_cart();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_old_snapshots_are_not_mutated() {
        let store = CartStore::new();
        store.add_to_cart(product(1), 1);
        let before = store.snapshot();

        store.add_to_cart(product(1), 3);
        assert_eq!(before.quantity_of(ProductId::new(1)), Some(1));
        assert_eq!(store.snapshot().quantity_of(ProductId::new(1)), Some(4));
    }

    #[test]
    fn test_notices_are_broadcast() {
        let store = CartStore::new();
        let mut notices = store.subscribe_notices();

        store.add_to_cart(product(8), 1);
        store.add_to_cart(product(8), 1);
        store.update_quantity(ProductId::new(8), 5);
        store.remove_from_cart(ProductId::new(42));
        store.clear_cart();

        let messages: Vec<_> = drain(&mut notices)
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Added Premium Yoga Mat to cart",
                "Updated Premium Yoga Mat quantity in cart",
                "Item removed from cart",
                "Cart cleared",
            ]
        );
    }

    #[test]
    fn test_notices_without_subscribers_do_not_block() {
        let store = CartStore::new();
        for _ in 0..(NOTICE_CAPACITY * 2) {
            store.remove_from_cart(ProductId::new(1));
        }
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes_only() {
        let store = CartStore::new();
        let mut rx = store.subscribe();
        rx.mark_unchanged();

        store.remove_from_cart(ProductId::new(3));
        assert!(!rx.has_changed().unwrap());

        store.add_to_cart(product(3), 2);
        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.quantity_of(ProductId::new(3)), Some(2));
    }

    #[test]
    fn test_update_carries_its_own_notice_and_state() {
        let store = CartStore::new();
        let mut other = store.subscribe_notices();

        let first = store.add_to_cart(product(5), 2);
        let second = store.remove_from_cart(ProductId::new(99));

        assert_eq!(
            first.notice.unwrap().message,
            "Added Wireless Charging Pad to cart"
        );
        assert_eq!(first.state.quantity_of(ProductId::new(5)), Some(2));
        assert_eq!(second.notice.unwrap().message, "Item removed from cart");
        assert!(Arc::ptr_eq(&second.state, &first.state));

        // Subscribers still see both
        assert_eq!(drain(&mut other).len(), 2);
    }

    #[test]
    fn test_silent_update_has_no_notice() {
        let store = CartStore::new();
        store.add_to_cart(product(5), 1);

        let update = store.update_quantity(ProductId::new(5), 4);
        assert!(update.notice.is_none());
        assert_eq!(update.state.item_count(), 4);
    }
}
