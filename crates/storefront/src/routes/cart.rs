//! Cart route handlers.
//!
//! Each session maps to one cart in the [`CartRegistry`](crate::services::CartRegistry)
//! through a cart key stored in the session. Mutations answer with the new
//! cart and the notices the transition produced, plus an `HX-Trigger`
//! header so badges elsewhere on the page can refresh.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use cornershop_core::{CartLine, CartState, Notice, Price, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::services::CartKey;
use crate::state::AppState;
use crate::store::{CartStore, CartUpdate};

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub url: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub in_stock: bool,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub subtotal_amount: Decimal,
    /// "Free" when there is no shipping charge.
    pub shipping: String,
    pub shipping_amount: Decimal,
    pub tax: String,
    pub tax_amount: Decimal,
    pub total: String,
    pub total_amount: Decimal,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&CartState::empty())
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let product = line.product();
        Self {
            product_id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            url: format!("/products/{}", product.id),
            quantity: line.quantity(),
            price: product.price.display(),
            line_price: product.price.times(line.quantity()).display(),
            in_stock: product.in_stock,
        }
    }
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        let currency = state
            .lines()
            .first()
            .map(|line| line.product().price.currency_code)
            .unwrap_or_default();

        let money = |amount| Price::new(amount, currency).display();
        let summary = state.summary();

        Self {
            items: state.lines().iter().map(CartItemView::from).collect(),
            subtotal: money(summary.subtotal),
            subtotal_amount: summary.subtotal,
            shipping: if summary.shipping.is_zero() {
                "Free".to_string()
            } else {
                money(summary.shipping)
            },
            shipping_amount: summary.shipping,
            tax: money(summary.tax),
            tax_amount: summary.tax,
            total: money(summary.total),
            total_amount: summary.total,
            item_count: state.item_count(),
        }
    }
}

/// Response to a cart mutation.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: CartView,
    pub notices: Vec<Notice>,
}

/// Cart count badge.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update cart form data. Zero or negative quantities remove the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart key from the session.
async fn get_cart_key(session: &Session) -> Result<Option<CartKey>> {
    Ok(session.get::<CartKey>(session_keys::CART_KEY).await?)
}

/// The session's cart, if it has one that is still live.
async fn existing_cart(state: &AppState, session: &Session) -> Result<Option<Arc<CartStore>>> {
    match get_cart_key(session).await? {
        Some(key) => Ok(state.carts().peek(key).await),
        None => Ok(None),
    }
}

/// The session's cart, created on first use.
async fn open_cart(state: &AppState, session: &Session) -> Result<Arc<CartStore>> {
    let existing = get_cart_key(session).await?;
    let (key, cart) = state.carts().open(existing).await;
    if existing != Some(key) {
        session.insert(session_keys::CART_KEY, key).await?;
    }
    Ok(cart)
}

/// Apply `op` to the session's cart and render the outcome.
async fn mutate<F>(state: &AppState, session: &Session, op: F) -> Result<Response>
where
    F: FnOnce(&CartStore) -> CartUpdate,
{
    let cart = open_cart(state, session).await?;
    let update = op(&cart);

    let response = CartResponse {
        cart: CartView::from(update.state.as_ref()),
        notices: update.notice.into_iter().collect(),
    };

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        Json(response),
    )
        .into_response())
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = existing_cart(&state, &session)
        .await?
        .map_or_else(CartView::empty, |cart| CartView::from(cart.snapshot().as_ref()));
    Ok(Json(cart))
}

/// Get cart count badge.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<Json<CartCount>> {
    let count = existing_cart(&state, &session)
        .await?
        .map_or(0, |cart| cart.snapshot().item_count());
    Ok(Json(CartCount { count }))
}

/// Add item to cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .find_by_id(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;
    let quantity = form.quantity.unwrap_or(1);

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[
            ("product_id", form.product_id.to_string()),
            ("quantity", quantity.to_string()),
        ],
    );

    mutate(&state, &session, |cart| cart.add_to_cart(product, quantity)).await
}

/// Set a line's quantity.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    mutate(&state, &session, |cart| {
        cart.update_quantity(form.product_id, form.quantity)
    })
    .await
}

/// Remove a line.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    mutate(&state, &session, |cart| cart.remove_from_cart(form.product_id)).await
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Response> {
    mutate(&state, &session, CartStore::clear_cart).await
}

/// Simulated checkout: wait, empty the cart, send the shopper home.
///
/// The wait-and-clear runs as its own task so it finishes even if the client
/// disconnects mid-request.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let Some(cart) = existing_cart(&state, &session).await? else {
        return Ok(Redirect::to("/cart").into_response());
    };
    if cart.snapshot().is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let delay = state.config().simulation.checkout_delay;
    let subtotal = cart.snapshot().subtotal();

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        cart.clear_cart()
    })
    .await
    .map_err(|e| AppError::Internal(format!("checkout task failed: {e}")))?;

    tracing::info!(%subtotal, "Checkout completed");
    Ok(Redirect::to("/").into_response())
}
