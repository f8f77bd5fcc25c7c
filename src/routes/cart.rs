use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, PricedCart, UpdateQuantityRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::CartItem,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/{item_id}", patch(update_quantity).delete(remove_item))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Current user's cart with computed totals", body = ApiResponse<PricedCart>),
        (status = 404, description = "No cart exists yet"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PricedCart>>> {
    let cart = state.cart.get_cart(&user).await?;
    Ok(Json(ApiResponse::success("OK", cart, None)))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Item added, cart re-priced", body = ApiResponse<PricedCart>),
        (status = 404, description = "Product or variant not found"),
        (status = 409, description = "Duplicate item or cart limit reached"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<PricedCart>>> {
    let cart = state.cart.add_item(&user, payload).await?;
    Ok(Json(ApiResponse::success(
        "Item added to cart",
        cart,
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "All items removed, cart kept", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "No cart exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state.cart.clear_cart(&user).await?;
    Ok(Json(ApiResponse::success(
        "Cart cleared",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{item_id}",
    params(
        ("item_id" = Uuid, Path, description = "Cart item ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Updated item (no reprice)", body = ApiResponse<CartItem>),
        (status = 400, description = "Quantity not a positive integer"),
        (status = 404, description = "Item not in caller's cart"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    let item = state
        .cart
        .update_quantity(&user, item_id, payload.quantity)
        .await?;
    Ok(Json(ApiResponse::success("Quantity updated", item, None)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{item_id}",
    params(
        ("item_id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Item removed, cart re-priced", body = ApiResponse<PricedCart>),
        (status = 404, description = "Item not in caller's cart"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PricedCart>>> {
    let cart = state.cart.remove_item(&user, item_id).await?;
    Ok(Json(ApiResponse::success(
        "Item removed from cart",
        cart,
        None,
    )))
}
