//! Persistence boundary. The managers only ever see these traits; the
//! Postgres adapters below them are constructed at process startup and
//! injected, and the integration tests swap in in-memory fakes.

pub mod cart;
pub mod catalog;
pub mod coupon;

pub use cart::PgCartStore;
pub use catalog::PgCatalogStore;
pub use coupon::PgCouponStore;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::StoreResult,
    models::{Cart, CartItem, Coupon, Order, Product, ProductVariant},
};

/// Read-only lookup of live catalog prices.
#[allow(async_fn_in_trait)]
pub trait CatalogStore {
    async fn get_product(&self, id: Uuid) -> StoreResult<Option<Product>>;
    async fn get_variant(&self, id: Uuid) -> StoreResult<Option<ProductVariant>>;
}

/// Carts and their items. Every mutation relies on the backing store's
/// constraints for the invariants that cannot survive a check-then-act
/// race: `create_item` must fail with `StoreError::UniqueViolation` when
/// the (cart, product, variant) triple already exists.
#[allow(async_fn_in_trait)]
pub trait CartStore {
    async fn find_cart(&self, cart_id: Uuid) -> StoreResult<Option<Cart>>;
    async fn find_cart_by_owner(&self, user_id: Uuid) -> StoreResult<Option<Cart>>;
    async fn create_cart(&self, user_id: Uuid) -> StoreResult<Cart>;
    async fn list_items(&self, cart_id: Uuid) -> StoreResult<Vec<CartItem>>;
    async fn create_item(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        variant_id: Option<Uuid>,
        qty: i32,
    ) -> StoreResult<CartItem>;
    async fn delete_item(&self, item_id: Uuid) -> StoreResult<()>;
    async fn delete_all_items(&self, cart_id: Uuid) -> StoreResult<u64>;
    async fn update_item_qty(&self, item_id: Uuid, qty: i32) -> StoreResult<CartItem>;
    /// Item together with its owning cart, for ownership checks.
    async fn find_item(&self, item_id: Uuid) -> StoreResult<Option<(CartItem, Cart)>>;
}

/// Coupons and their attachments to carts and orders.
#[allow(async_fn_in_trait)]
pub trait CouponStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Coupon>>;
    /// The coupon currently attached to the cart, if any.
    async fn find_cart_coupon(&self, cart_id: Uuid) -> StoreResult<Option<Coupon>>;
    /// Insert-or-replace keyed on the cart's uniqueness constraint.
    async fn upsert_cart_coupon(&self, cart_id: Uuid, coupon_id: Uuid) -> StoreResult<()>;
    async fn find_order(&self, order_id: Uuid) -> StoreResult<Option<Order>>;
    async fn list_order_coupons(&self, order_id: Uuid) -> StoreResult<Vec<Coupon>>;
    async fn create_order_coupon(&self, order_id: Uuid, coupon_id: Uuid) -> StoreResult<()>;
    async fn update_order_payable(&self, order_id: Uuid, payable: Decimal) -> StoreResult<Order>;
}
