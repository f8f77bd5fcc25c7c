use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        cart::PricedCart,
        coupons::{
            ApplyCouponToCartRequest, ApplyCouponToOrderRequest, CouponList, CreateCouponRequest,
            UpdateCouponRequest,
        },
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Coupon, Order},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::coupon_admin,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_coupons).post(create_coupon))
        .route(
            "/{id}",
            get(get_coupon).patch(update_coupon).delete(delete_coupon),
        )
        .route("/apply/cart", post(apply_to_cart))
        .route("/apply/order", post(apply_to_order))
}

#[utoipa::path(
    post,
    path = "/api/coupons",
    request_body = CreateCouponRequest,
    responses(
        (status = 200, description = "Coupon created", body = ApiResponse<Coupon>),
        (status = 400, description = "Invalid code or discount"),
        (status = 409, description = "Coupon code already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn create_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCouponRequest>,
) -> AppResult<Json<ApiResponse<Coupon>>> {
    let coupon = coupon_admin::create_coupon(&state.orm, &user, payload).await?;
    Ok(Json(ApiResponse::success("Coupon created", coupon, None)))
}

#[utoipa::path(
    get,
    path = "/api/coupons",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List coupons", body = ApiResponse<CouponList>),
        (status = 403, description = "Caller is not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn list_coupons(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<CouponList>>> {
    let (page, limit, _) = pagination.normalize();
    let (items, total) = coupon_admin::list_coupons(&state.orm, &user, &pagination).await?;
    let meta = Meta::new(page, limit, total);
    Ok(Json(ApiResponse::success(
        "OK",
        CouponList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    get,
    path = "/api/coupons/{id}",
    params(
        ("id" = Uuid, Path, description = "Coupon ID")
    ),
    responses(
        (status = 200, description = "Coupon", body = ApiResponse<Coupon>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Coupon not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn get_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Coupon>>> {
    let coupon = coupon_admin::get_coupon(&state.orm, &user, id).await?;
    Ok(Json(ApiResponse::success("OK", coupon, None)))
}

#[utoipa::path(
    patch,
    path = "/api/coupons/{id}",
    params(
        ("id" = Uuid, Path, description = "Coupon ID")
    ),
    request_body = UpdateCouponRequest,
    responses(
        (status = 200, description = "Coupon updated", body = ApiResponse<Coupon>),
        (status = 404, description = "Coupon not found"),
        (status = 409, description = "Coupon code already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn update_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCouponRequest>,
) -> AppResult<Json<ApiResponse<Coupon>>> {
    let coupon = coupon_admin::update_coupon(&state.orm, &user, id, payload).await?;
    Ok(Json(ApiResponse::success("Coupon updated", coupon, None)))
}

#[utoipa::path(
    delete,
    path = "/api/coupons/{id}",
    params(
        ("id" = Uuid, Path, description = "Coupon ID")
    ),
    responses(
        (status = 200, description = "Coupon deleted", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Coupon not found"),
        (status = 409, description = "Coupon is applied to orders"),
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn delete_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    coupon_admin::delete_coupon(&state.orm, &user, id).await?;
    Ok(Json(ApiResponse::success(
        "Coupon deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/coupons/apply/cart",
    request_body = ApplyCouponToCartRequest,
    responses(
        (status = 200, description = "Coupon attached, cart re-priced", body = ApiResponse<PricedCart>),
        (status = 400, description = "Coupon has expired"),
        (status = 404, description = "Cart or coupon not found"),
        (status = 409, description = "Same coupon already attached"),
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn apply_to_cart(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<ApplyCouponToCartRequest>,
) -> AppResult<Json<ApiResponse<PricedCart>>> {
    let cart = state
        .coupons
        .apply_to_cart(payload.cart_id, &payload.coupon_code)
        .await?;
    Ok(Json(ApiResponse::success("Coupon applied", cart, None)))
}

#[utoipa::path(
    post,
    path = "/api/coupons/apply/order",
    request_body = ApplyCouponToOrderRequest,
    responses(
        (status = 200, description = "Coupon attached, payable recomputed", body = ApiResponse<Order>),
        (status = 400, description = "Coupon has expired"),
        (status = 404, description = "Order or coupon not found"),
        (status = 409, description = "Coupon already applied to this order"),
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn apply_to_order(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<ApplyCouponToOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state
        .coupons
        .apply_to_order(payload.order_id, &payload.coupon_code)
        .await?;
    Ok(Json(ApiResponse::success("Coupon applied", order, None)))
}
