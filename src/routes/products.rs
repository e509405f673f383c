//! Product catalog listing with offset pagination.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, models::Product, state::AppState};

/// Fixed page size; the client only chooses the page.
pub const PAGE_SIZE: u64 = 20;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductPage>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let from = (page as u64 - 1) * PAGE_SIZE;
    let to = from + PAGE_SIZE - 1;

    let (products, total) = state
        .backend
        .from("products")
        .select("*")
        .order("created_at", false)
        .range(from, to)
        .fetch_with_count::<Product>()
        .await
        .map_err(AppError::backend("Failed to fetch products"))?;

    Ok(Json(ProductPage {
        products,
        pagination: Pagination {
            page,
            limit: PAGE_SIZE,
            total,
            total_pages: total.div_ceil(PAGE_SIZE),
        },
    }))
}
