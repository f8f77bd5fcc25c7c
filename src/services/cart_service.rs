use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, PricedCart},
    error::{AppError, AppResult, StoreError},
    middleware::auth::AuthUser,
    models::{Cart, CartItem},
    pricing::price_cart,
    services::load_cart_details,
    store::{CartStore, CatalogStore, CouponStore},
};

/// Orchestrates cart composition: no duplicate (product, variant) pair, an
/// item-count ceiling, and re-pricing through the pricing module on every
/// read. Stores come in through the constructor; the manager holds no other
/// state.
#[derive(Clone)]
pub struct CartManager<Cat, Crt, Cpn> {
    catalog: Cat,
    carts: Crt,
    coupons: Cpn,
    max_items: usize,
}

impl<Cat, Crt, Cpn> CartManager<Cat, Crt, Cpn>
where
    Cat: CatalogStore,
    Crt: CartStore,
    Cpn: CouponStore,
{
    pub fn new(catalog: Cat, carts: Crt, coupons: Cpn, max_items: usize) -> Self {
        Self {
            catalog,
            carts,
            coupons,
            max_items,
        }
    }

    /// Add a product (optionally a specific variant) to the caller's cart,
    /// creating the cart on first use. New items always start at quantity 1.
    pub async fn add_item(
        &self,
        user: &AuthUser,
        payload: AddToCartRequest,
    ) -> AppResult<PricedCart> {
        let product = self
            .catalog
            .get_product(payload.product_id)
            .await?
            .ok_or(AppError::NotFound("Product"))?;

        if let Some(variant_id) = payload.variant_id {
            let variant = self
                .catalog
                .get_variant(variant_id)
                .await?
                .ok_or(AppError::NotFound("Product variant"))?;
            if variant.product_id != product.id {
                return Err(AppError::InvalidArgument(
                    "Variant does not belong to the given product".into(),
                ));
            }
        }

        let cart = match self.carts.find_cart_by_owner(user.user_id).await? {
            Some(cart) => cart,
            None => match self.carts.create_cart(user.user_id).await {
                Ok(cart) => cart,
                // A concurrent first add won the one-cart-per-user race;
                // use the cart it created.
                Err(StoreError::UniqueViolation) => self
                    .carts
                    .find_cart_by_owner(user.user_id)
                    .await?
                    .ok_or(AppError::NotFound("Cart"))?,
                Err(err) => return Err(err.into()),
            },
        };

        let items = self.carts.list_items(cart.id).await?;
        if items
            .iter()
            .any(|i| i.product_id == payload.product_id && i.variant_id == payload.variant_id)
        {
            return Err(AppError::Conflict(
                "This product is already in your cart".into(),
            ));
        }
        if items.len() >= self.max_items {
            return Err(AppError::LimitExceeded(self.max_items));
        }

        // Two adds can race past the checks above; the store's uniqueness
        // constraint is the actual arbiter, so its violation is the same
        // duplicate-item conflict.
        match self
            .carts
            .create_item(cart.id, payload.product_id, payload.variant_id, 1)
            .await
        {
            Ok(_) => {}
            Err(StoreError::UniqueViolation) => {
                return Err(AppError::Conflict(
                    "This product is already in your cart".into(),
                ));
            }
            Err(err) => return Err(err.into()),
        }

        tracing::debug!(user_id = %user.user_id, product_id = %payload.product_id, "item added to cart");
        self.priced(cart).await
    }

    /// Remove one item from the caller's cart. An item id outside the
    /// caller's own cart reads as not-found, never as someone else's item.
    pub async fn remove_item(&self, user: &AuthUser, item_id: Uuid) -> AppResult<PricedCart> {
        let cart = self
            .carts
            .find_cart_by_owner(user.user_id)
            .await?
            .ok_or(AppError::NotFound("Cart"))?;

        let items = self.carts.list_items(cart.id).await?;
        if !items.iter().any(|i| i.id == item_id) {
            return Err(AppError::NotFound("Cart item"));
        }

        self.carts.delete_item(item_id).await?;
        self.priced(cart).await
    }

    /// Delete every item but keep the cart row itself.
    pub async fn clear_cart(&self, user: &AuthUser) -> AppResult<()> {
        let cart = self
            .carts
            .find_cart_by_owner(user.user_id)
            .await?
            .ok_or(AppError::NotFound("Cart"))?;

        let removed = self.carts.delete_all_items(cart.id).await?;
        tracing::debug!(user_id = %user.user_id, removed, "cart cleared");
        Ok(())
    }

    /// Overwrite an item's quantity. Returns the raw updated item, not a
    /// re-priced cart; quantity patches are the hot path and stay cheap.
    pub async fn update_quantity(
        &self,
        user: &AuthUser,
        item_id: Uuid,
        quantity: i32,
    ) -> AppResult<CartItem> {
        if quantity < 1 {
            return Err(AppError::InvalidArgument(
                "Quantity must be a positive integer".into(),
            ));
        }

        let (item, cart) = self
            .carts
            .find_item(item_id)
            .await?
            .filter(|(_, cart)| cart.user_id == user.user_id)
            .ok_or(AppError::NotFound("Cart item"))?;

        debug_assert_eq!(item.cart_id, cart.id);
        Ok(self.carts.update_item_qty(item.id, quantity).await?)
    }

    /// The caller's cart with subtotal/discount/total computed from live
    /// catalog prices and the currently attached coupon.
    pub async fn get_cart(&self, user: &AuthUser) -> AppResult<PricedCart> {
        let cart = self
            .carts
            .find_cart_by_owner(user.user_id)
            .await?
            .ok_or(AppError::NotFound("Cart"))?;
        self.priced(cart).await
    }

    async fn priced(&self, cart: Cart) -> AppResult<PricedCart> {
        let items = self.carts.list_items(cart.id).await?;
        let (details, line_items) = load_cart_details(&self.catalog, &items).await?;

        // Expiry is only enforced at attach time; an attached coupon keeps
        // pricing the cart until it is replaced.
        let coupon = self.coupons.find_cart_coupon(cart.id).await?;
        let totals = price_cart(&line_items, coupon.map(|c| c.discount));

        Ok(PricedCart {
            cart,
            items: details,
            totals,
        })
    }
}
