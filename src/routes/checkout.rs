//! Checkout: converts the cart into an order plus line items and decrements
//! stock.
//!
//! The steps run as discrete sequential calls against the managed backend.
//! There is no transaction boundary at this layer: a failure part-way aborts
//! the remaining steps and leaves the earlier ones applied (order row kept,
//! stock already decremented). Known limitation.

use axum::{extract::State, Json};
use serde_json::json;

use crate::{
    domain::checkout::{cart_total, format_amount, stock_shortages},
    error::AppError,
    middleware::CurrentUser,
    models::{CartLine, NewOrder, NewOrderItem, Order, OrderHistory, OrderStatus},
    state::AppState,
};

const CHECKOUT_SELECT: &str = "id,quantity,product_id,products(id,name,price,stock)";
const ORDERS_SELECT: &str =
    "id,total_amount,status,created_at,order_items(quantity,price_at_purchase,products(name,image_url))";

pub async fn checkout(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let lines: Vec<CartLine> = state
        .backend
        .from("carts")
        .select(CHECKOUT_SELECT)
        .eq("user_id", user.id)
        .fetch()
        .await
        .map_err(AppError::backend("Checkout failed"))?;

    if lines.is_empty() {
        return Err(AppError::validation("Cart is empty"));
    }

    let shortages = stock_shortages(&lines);
    if !shortages.is_empty() {
        return Err(AppError::OutOfStock(shortages));
    }

    let total = cart_total(&lines);

    let order: Order = state
        .backend
        .from("orders")
        .insert_one(&NewOrder {
            user_id: user.id,
            total_amount: total,
            status: OrderStatus::Pending,
        })
        .await
        .map_err(AppError::backend("Checkout failed"))?;

    let items: Vec<NewOrderItem> = lines
        .iter()
        .map(|line| NewOrderItem {
            order_id: order.id,
            product_id: line.product_id,
            quantity: line.quantity,
            price_at_purchase: line.product.price,
        })
        .collect();

    state
        .backend
        .from("order_items")
        .insert_many(&items)
        .await
        .map_err(AppError::backend("Checkout failed"))?;

    // One update per affected product, issued sequentially.
    for line in &lines {
        state
            .backend
            .from("products")
            .eq("id", line.product_id)
            .update(&json!({ "stock": line.product.stock - line.quantity }))
            .await
            .map_err(AppError::backend("Checkout failed"))?;
    }

    state
        .backend
        .from("carts")
        .eq("user_id", user.id)
        .delete()
        .await
        .map_err(AppError::backend("Checkout failed"))?;

    Ok(Json(json!({
        "message": "Order created successfully",
        "order": {
            "id": order.id,
            "total": format_amount(total),
            "status": order.status,
            "created_at": order.created_at,
        },
    })))
}

pub async fn list_orders(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let orders: Vec<OrderHistory> = state
        .backend
        .from("orders")
        .select(ORDERS_SELECT)
        .eq("user_id", user.id)
        .order("created_at", false)
        .fetch()
        .await
        .map_err(AppError::backend("Failed to fetch orders"))?;

    Ok(Json(json!({ "orders": orders })))
}
