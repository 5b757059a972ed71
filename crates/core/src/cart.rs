//! Cart state machine.
//!
//! [`reduce`] maps a cart state and an action to a new state plus an optional
//! notice for the shopper. It never mutates its input and never fails: inputs
//! outside the useful domain (unknown product ids, zero quantities) degrade to
//! no-ops.
//!
//! # Invariants
//!
//! - At most one [`CartLine`] per product id.
//! - Every line quantity is at least 1.
//! - Lines keep insertion order; new products are appended.
//! - `subtotal` equals the sum of `price × quantity` over all lines. It is
//!   recomputed from the lines on every transition, never patched.

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::types::{Product, ProductId};

/// One product-and-quantity pairing within a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Arc<Product>,
    quantity: u32,
}

impl CartLine {
    /// The product this line refers to.
    #[must_use]
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    /// Number of units, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Extended price: unit price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.times(self.quantity).amount
    }
}

/// A consistent snapshot of a cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    lines: Vec<CartLine>,
    subtotal: Decimal,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_lines(lines: Vec<CartLine>) -> Self {
        let subtotal = lines.iter().map(CartLine::line_total).sum();
        Self { lines, subtotal }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of line totals, excluding tax and shipping.
    #[must_use]
    pub const fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Quantity held for `product_id`, if the cart has a line for it.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.line(product_id).map(CartLine::quantity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Shipping, tax and total for the current subtotal.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::for_subtotal(self.subtotal)
    }

    fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.product.id == product_id)
    }

    fn without(&self, product_id: ProductId) -> Self {
        Self::from_lines(
            self.lines
                .iter()
                .filter(|line| line.product.id != product_id)
                .cloned()
                .collect(),
        )
    }
}

/// Sales tax applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Order totals shown alongside the cart.
///
/// Shipping is always free. Tax is rounded half away from zero to cents and
/// the total adds the rounded tax, so the displayed figures always add up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    #[must_use]
    pub fn for_subtotal(subtotal: Decimal) -> Self {
        let shipping = Decimal::ZERO;
        let tax = (subtotal * TAX_RATE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

/// A cart intent issued by the presentation layer.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Cumulative add. Appends a new line if the product is not in the cart.
    Add {
        product: Arc<Product>,
        quantity: u32,
    },
    /// Drop the line for a product, if any.
    Remove { product_id: ProductId },
    /// Absolute set. Zero or negative quantities remove the line.
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    /// Drop every line.
    Clear,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
}

/// Transient, human-readable message produced by a cart transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: CartState,
    pub notice: Option<Notice>,
}

impl Transition {
    const fn silent(state: CartState) -> Self {
        Self {
            state,
            notice: None,
        }
    }

    const fn with_notice(state: CartState, notice: Notice) -> Self {
        Self {
            state,
            notice: Some(notice),
        }
    }
}

/// Apply `action` to `state`, producing the next state.
#[must_use]
pub fn reduce(state: &CartState, action: CartAction) -> Transition {
    match action {
        CartAction::Add { quantity: 0, .. } => Transition::silent(state.clone()),
        CartAction::Add { product, quantity } => add(state, product, quantity),
        CartAction::Remove { product_id } => remove(state, product_id),
        CartAction::UpdateQuantity {
            product_id,
            quantity,
        } => match u32::try_from(quantity) {
            Ok(0) => remove(state, product_id),
            Ok(quantity) => set_quantity(state, product_id, quantity),
            Err(_) if quantity < 0 => remove(state, product_id),
            Err(_) => set_quantity(state, product_id, u32::MAX),
        },
        CartAction::Clear => {
            Transition::with_notice(CartState::empty(), Notice::success("Cart cleared"))
        }
    }
}

fn add(state: &CartState, product: Arc<Product>, quantity: u32) -> Transition {
    let existing = state.line(product.id).is_some();
    let notice = if existing {
        Notice::success(format!("Updated {} quantity in cart", product.name))
    } else {
        Notice::success(format!("Added {} to cart", product.name))
    };

    let mut lines = state.lines.clone();
    match lines.iter_mut().find(|line| line.product.id == product.id) {
        Some(line) => line.quantity = line.quantity.saturating_add(quantity),
        None => lines.push(CartLine { product, quantity }),
    }

    Transition::with_notice(CartState::from_lines(lines), notice)
}

// Notifies even when nothing matched.
fn remove(state: &CartState, product_id: ProductId) -> Transition {
    Transition::with_notice(
        state.without(product_id),
        Notice::info("Item removed from cart"),
    )
}

fn set_quantity(state: &CartState, product_id: ProductId, quantity: u32) -> Transition {
    if state.line(product_id).is_none() {
        return Transition::silent(state.clone());
    }

    let lines = state
        .lines
        .iter()
        .map(|line| {
            if line.product.id == product_id {
                CartLine {
                    product: Arc::clone(&line.product),
                    quantity,
                }
            } else {
                line.clone()
            }
        })
        .collect();

    Transition::silent(CartState::from_lines(lines))
}
