use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{Cart, Product, ProductVariant},
    pricing::CartTotals,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

/// A cart item joined against live catalog data.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemDetail {
    pub id: Uuid,
    pub product: Product,
    pub variant: Option<ProductVariant>,
    pub quantity: i32,
}

/// A cart re-priced from live item prices. The totals are flattened so the
/// discount fields only appear when a coupon was actually applied.
#[derive(Debug, Serialize, ToSchema)]
pub struct PricedCart {
    pub cart: Cart,
    pub items: Vec<CartItemDetail>,
    #[serde(flatten)]
    pub totals: CartTotals,
}
