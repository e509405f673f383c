//! Cart handlers. Every mutation is scoped by both the row id and the
//! requesting user id, so one user cannot touch another's rows.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::checkout::{cart_total, format_amount},
    error::AppError,
    middleware::CurrentUser,
    models::{CartItem, CartLine},
    state::AppState,
};

const CART_SELECT: &str = "id,quantity,product_id,products(id,name,price,image_url,stock)";

pub async fn get_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let lines: Vec<CartLine> = state
        .backend
        .from("carts")
        .select(CART_SELECT)
        .eq("user_id", user.id)
        .fetch()
        .await
        .map_err(AppError::backend("Failed to fetch cart"))?;

    let total = cart_total(&lines);
    Ok(Json(json!({ "cart": lines, "total": format_amount(total) })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartRequest {
    pub product_id: i64,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
struct ProductStock {
    stock: i32,
}

#[derive(Debug, Deserialize)]
struct ExistingItem {
    id: Uuid,
    quantity: i32,
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    payload
        .validate()
        .map_err(|_| AppError::validation("Invalid product_id or quantity"))?;

    let product: ProductStock = state
        .backend
        .from("products")
        .select("name,stock")
        .eq("id", payload.product_id)
        .fetch_optional()
        .await
        .map_err(AppError::backend("Failed to add item to cart"))?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    if product.stock < payload.quantity {
        return Err(AppError::validation(format!(
            "Insufficient stock. Only {} available",
            product.stock
        )));
    }

    let existing: Option<ExistingItem> = state
        .backend
        .from("carts")
        .select("id,quantity")
        .eq("user_id", user.id)
        .eq("product_id", payload.product_id)
        .fetch_optional()
        .await
        .map_err(AppError::backend("Failed to add item to cart"))?;

    if let Some(existing) = existing {
        // Merge with the row already in the cart and re-validate the merged
        // quantity against stock before writing anything.
        let merged = existing.quantity + payload.quantity;
        if product.stock < merged {
            return Err(AppError::validation(format!(
                "Cannot add {} more. Only {} available",
                payload.quantity,
                product.stock - existing.quantity
            )));
        }

        state
            .backend
            .from("carts")
            .eq("id", existing.id)
            .update(&json!({ "quantity": merged, "updated_at": Utc::now() }))
            .await
            .map_err(AppError::backend("Failed to add item to cart"))?;

        return Ok((
            StatusCode::OK,
            Json(json!({ "message": "Cart updated", "quantity": merged })),
        ));
    }

    let item: CartItem = state
        .backend
        .from("carts")
        .insert_one(&json!({
            "user_id": user.id,
            "product_id": payload.product_id,
            "quantity": payload.quantity,
        }))
        .await
        .map_err(AppError::backend("Failed to add item to cart"))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Item added to cart", "item": item })),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuantityRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
struct ItemWithStock {
    #[serde(rename = "products")]
    product: StockOnly,
}

#[derive(Debug, Deserialize)]
struct StockOnly {
    stock: i32,
}

pub async fn update_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    payload
        .validate()
        .map_err(|_| AppError::validation("Quantity must be at least 1"))?;

    let item: ItemWithStock = state
        .backend
        .from("carts")
        .select("product_id,products(stock)")
        .eq("id", id)
        .eq("user_id", user.id)
        .fetch_optional()
        .await
        .map_err(AppError::backend("Failed to update cart item"))?
        .ok_or_else(|| AppError::not_found("Cart item not found"))?;

    if item.product.stock < payload.quantity {
        return Err(AppError::validation(format!(
            "Insufficient stock. Only {} available",
            item.product.stock
        )));
    }

    state
        .backend
        .from("carts")
        .eq("id", id)
        .eq("user_id", user.id)
        .update(&json!({ "quantity": payload.quantity, "updated_at": Utc::now() }))
        .await
        .map_err(AppError::backend("Failed to update cart item"))?;

    Ok(Json(json!({ "message": "Cart item updated" })))
}

pub async fn remove_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .backend
        .from("carts")
        .eq("id", id)
        .eq("user_id", user.id)
        .delete()
        .await
        .map_err(AppError::backend("Failed to remove item from cart"))?;

    Ok(Json(json!({ "message": "Item removed from cart" })))
}

pub async fn clear_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .backend
        .from("carts")
        .eq("user_id", user.id)
        .delete()
        .await
        .map_err(AppError::backend("Failed to clear cart"))?;

    Ok(Json(json!({ "message": "Cart cleared" })))
}
