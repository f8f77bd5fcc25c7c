use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::cart::PricedCart,
    error::{AppError, AppResult, StoreError},
    models::{Coupon, Order},
    pricing::{order_payable, price_cart},
    services::load_cart_details,
    store::{CartStore, CatalogStore, CouponStore},
};

/// Validates coupon attachment for carts and orders. A cart holds at most
/// one coupon (attach replaces); an order accumulates distinct coupons, and
/// its payable amount is re-derived from the immutable gross total and the
/// full attached set on every change.
#[derive(Clone)]
pub struct CouponManager<Cat, Crt, Cpn> {
    catalog: Cat,
    carts: Crt,
    coupons: Cpn,
}

impl<Cat, Crt, Cpn> CouponManager<Cat, Crt, Cpn>
where
    Cat: CatalogStore,
    Crt: CartStore,
    Cpn: CouponStore,
{
    pub fn new(catalog: Cat, carts: Crt, coupons: Cpn) -> Self {
        Self {
            catalog,
            carts,
            coupons,
        }
    }

    /// Attach a coupon to a cart, replacing whatever coupon was attached
    /// before. Re-attaching the coupon that is already present is a
    /// conflict. Returns the cart re-priced under the new coupon.
    pub async fn apply_to_cart(&self, cart_id: Uuid, coupon_code: &str) -> AppResult<PricedCart> {
        let cart = self
            .carts
            .find_cart(cart_id)
            .await?
            .ok_or(AppError::NotFound("Cart"))?;

        let coupon = self.resolve_valid_coupon(coupon_code).await?;

        if let Some(attached) = self.coupons.find_cart_coupon(cart.id).await? {
            if attached.id == coupon.id {
                return Err(AppError::Conflict(
                    "Coupon is already applied to this cart".into(),
                ));
            }
        }

        // Last-committed-write wins when two attaches race; the store's
        // cart-unique upsert leaves exactly one binding either way.
        self.coupons.upsert_cart_coupon(cart.id, coupon.id).await?;
        tracing::info!(cart_id = %cart.id, code = %coupon.code, "coupon attached to cart");

        let items = self.carts.list_items(cart.id).await?;
        let (details, line_items) = load_cart_details(&self.catalog, &items).await?;
        let totals = price_cart(&line_items, Some(coupon.discount));

        Ok(PricedCart {
            cart,
            items: details,
            totals,
        })
    }

    /// Attach a coupon to a finalized order. Each distinct coupon may be
    /// attached once; the order's payable amount is recomputed from the
    /// untouched gross total and every attached coupon, so the result does
    /// not depend on attach order and nothing compounds destructively.
    pub async fn apply_to_order(&self, order_id: Uuid, coupon_code: &str) -> AppResult<Order> {
        let order = self
            .coupons
            .find_order(order_id)
            .await?
            .ok_or(AppError::NotFound("Order"))?;

        let coupon = self.resolve_valid_coupon(coupon_code).await?;

        let attached = self.coupons.list_order_coupons(order.id).await?;
        if attached.iter().any(|c| c.id == coupon.id) {
            return Err(AppError::Conflict(
                "Coupon is already applied to this order".into(),
            ));
        }

        match self.coupons.create_order_coupon(order.id, coupon.id).await {
            Ok(()) => {}
            Err(StoreError::UniqueViolation) => {
                return Err(AppError::Conflict(
                    "Coupon is already applied to this order".into(),
                ));
            }
            Err(err) => return Err(err.into()),
        }

        let discounts: Vec<_> = self
            .coupons
            .list_order_coupons(order.id)
            .await?
            .into_iter()
            .map(|c| c.discount)
            .collect();
        let payable = order_payable(order.total_amount, &discounts);

        let updated = self.coupons.update_order_payable(order.id, payable).await?;
        tracing::info!(order_id = %updated.id, code = %coupon.code, payable = %updated.payable_amount, "coupon attached to order");
        Ok(updated)
    }

    async fn resolve_valid_coupon(&self, code: &str) -> AppResult<Coupon> {
        let coupon = self
            .coupons
            .find_by_code(code)
            .await?
            .ok_or(AppError::NotFound("Coupon"))?;
        if coupon.is_expired(Utc::now()) {
            return Err(AppError::Expired);
        }
        Ok(coupon)
    }
}
