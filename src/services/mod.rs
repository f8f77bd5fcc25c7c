pub mod cart_service;
pub mod coupon_admin;
pub mod coupon_service;

pub use cart_service::CartManager;
pub use coupon_service::CouponManager;

use crate::{
    dto::cart::CartItemDetail,
    error::{AppError, AppResult},
    models::CartItem,
    pricing::LineItem,
    store::CatalogStore,
};

/// Join cart items against the catalog for live prices. Yields both the
/// response detail rows and the pricing input in one pass.
pub(crate) async fn load_cart_details<C: CatalogStore>(
    catalog: &C,
    items: &[CartItem],
) -> AppResult<(Vec<CartItemDetail>, Vec<LineItem>)> {
    let mut details = Vec::with_capacity(items.len());
    let mut line_items = Vec::with_capacity(items.len());

    for item in items {
        let product = catalog
            .get_product(item.product_id)
            .await?
            .ok_or(AppError::NotFound("Product"))?;
        let variant = match item.variant_id {
            Some(variant_id) => Some(
                catalog
                    .get_variant(variant_id)
                    .await?
                    .ok_or(AppError::NotFound("Product variant"))?,
            ),
            None => None,
        };

        line_items.push(LineItem {
            base_price: product.base_price,
            variant_additional_price: variant.as_ref().map(|v| v.additional_price),
            quantity: item.item_qty,
        });
        details.push(CartItemDetail {
            id: item.id,
            product,
            variant,
            quantity: item.item_qty,
        });
    }

    Ok((details, line_items))
}
