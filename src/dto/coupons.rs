use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Coupon;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyCouponToCartRequest {
    pub cart_id: Uuid,
    pub coupon_code: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyCouponToOrderRequest {
    pub order_id: Uuid,
    pub coupon_code: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCouponRequest {
    pub code: String,
    pub discount: Decimal,
    pub expiry_date: DateTime<Utc>,
}

/// Explicit optional-field update payload; each present field is validated
/// before anything is written.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCouponRequest {
    pub code: Option<String>,
    pub discount: Option<Decimal>,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CouponList {
    pub items: Vec<Coupon>,
}
