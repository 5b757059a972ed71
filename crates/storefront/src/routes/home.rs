//! Home page route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use super::products::{CategoryView, ProductView};
use crate::state::AppState;

/// Home page data: featured products and a category directory.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub featured: Vec<ProductView>,
    pub categories: Vec<CategoryView>,
}

/// Display home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    let catalog = state.catalog();

    Json(HomeView {
        featured: catalog
            .list_featured()
            .iter()
            .map(|p| ProductView::from(p.as_ref()))
            .collect(),
        categories: catalog
            .list_categories()
            .iter()
            .map(|name| CategoryView::new(name, false))
            .collect(),
    })
}
