//! In-memory store fakes for driving the managers without Postgres. The
//! cart item fake enforces the same (cart, product, variant) uniqueness the
//! real schema does, so conflict paths behave identically.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use axum_cart_api::{
    error::{StoreError, StoreResult},
    middleware::auth::AuthUser,
    models::{Cart, CartItem, Coupon, Order, Product, ProductVariant},
    services::{CartManager, CouponManager},
    store::{CartStore, CatalogStore, CouponStore},
};

#[derive(Default)]
struct Inner {
    products: HashMap<Uuid, Product>,
    variants: HashMap<Uuid, ProductVariant>,
    carts: Vec<Cart>,
    items: Vec<CartItem>,
    coupons: Vec<Coupon>,
    cart_coupons: HashMap<Uuid, Uuid>,
    orders: HashMap<Uuid, Order>,
    order_coupons: Vec<(Uuid, Uuid)>,
}

#[derive(Clone, Default)]
pub struct MemStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_product(&self, name: &str, base_price: Decimal) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().products.insert(
            id,
            Product {
                id,
                name: name.to_string(),
                description: None,
                base_price,
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn add_variant(&self, product_id: Uuid, additional_price: Decimal) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().variants.insert(
            id,
            ProductVariant {
                id,
                product_id,
                name: "variant".to_string(),
                additional_price,
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn add_coupon(&self, code: &str, discount: Decimal, expiry_date: DateTime<Utc>) -> Coupon {
        let coupon = Coupon {
            id: Uuid::new_v4(),
            code: code.to_string(),
            discount,
            expiry_date,
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().coupons.push(coupon.clone());
        coupon
    }

    pub fn add_order(&self, user_id: Uuid, total_amount: Decimal) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().orders.insert(
            id,
            Order {
                id,
                user_id,
                total_amount,
                payable_amount: total_amount,
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn order_payable(&self, order_id: Uuid) -> Option<Decimal> {
        self.inner
            .lock()
            .unwrap()
            .orders
            .get(&order_id)
            .map(|o| o.payable_amount)
    }

    pub fn item_qty(&self, item_id: Uuid) -> Option<i32> {
        self.inner
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|i| i.id == item_id)
            .map(|i| i.item_qty)
    }
}

impl CatalogStore for MemStore {
    async fn get_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        Ok(self.inner.lock().unwrap().products.get(&id).cloned())
    }

    async fn get_variant(&self, id: Uuid) -> StoreResult<Option<ProductVariant>> {
        Ok(self.inner.lock().unwrap().variants.get(&id).cloned())
    }
}

impl CartStore for MemStore {
    async fn find_cart(&self, cart_id: Uuid) -> StoreResult<Option<Cart>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .carts
            .iter()
            .find(|c| c.id == cart_id)
            .cloned())
    }

    async fn find_cart_by_owner(&self, user_id: Uuid) -> StoreResult<Option<Cart>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .carts
            .iter()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn create_cart(&self, user_id: Uuid) -> StoreResult<Cart> {
        let mut inner = self.inner.lock().unwrap();
        if inner.carts.iter().any(|c| c.user_id == user_id) {
            return Err(StoreError::UniqueViolation);
        }
        let cart = Cart {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        };
        inner.carts.push(cart.clone());
        Ok(cart)
    }

    async fn list_items(&self, cart_id: Uuid) -> StoreResult<Vec<CartItem>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|i| i.cart_id == cart_id)
            .cloned()
            .collect())
    }

    async fn create_item(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        variant_id: Option<Uuid>,
        qty: i32,
    ) -> StoreResult<CartItem> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .items
            .iter()
            .any(|i| i.cart_id == cart_id && i.product_id == product_id && i.variant_id == variant_id)
        {
            return Err(StoreError::UniqueViolation);
        }
        let item = CartItem {
            id: Uuid::new_v4(),
            cart_id,
            product_id,
            variant_id,
            item_qty: qty,
            created_at: Utc::now(),
        };
        inner.items.push(item.clone());
        Ok(item)
    }

    async fn delete_item(&self, item_id: Uuid) -> StoreResult<()> {
        self.inner.lock().unwrap().items.retain(|i| i.id != item_id);
        Ok(())
    }

    async fn delete_all_items(&self, cart_id: Uuid) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.items.len();
        inner.items.retain(|i| i.cart_id != cart_id);
        Ok((before - inner.items.len()) as u64)
    }

    async fn update_item_qty(&self, item_id: Uuid, qty: i32) -> StoreResult<CartItem> {
        let mut inner = self.inner.lock().unwrap();
        let item = inner
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| StoreError::Backend(anyhow::anyhow!("no such item")))?;
        item.item_qty = qty;
        Ok(item.clone())
    }

    async fn find_item(&self, item_id: Uuid) -> StoreResult<Option<(CartItem, Cart)>> {
        let inner = self.inner.lock().unwrap();
        let item = match inner.items.iter().find(|i| i.id == item_id) {
            Some(item) => item.clone(),
            None => return Ok(None),
        };
        let cart = inner
            .carts
            .iter()
            .find(|c| c.id == item.cart_id)
            .cloned()
            .ok_or_else(|| StoreError::Backend(anyhow::anyhow!("orphaned item")))?;
        Ok(Some((item, cart)))
    }
}

impl CouponStore for MemStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Coupon>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .coupons
            .iter()
            .find(|c| c.code == code)
            .cloned())
    }

    async fn find_cart_coupon(&self, cart_id: Uuid) -> StoreResult<Option<Coupon>> {
        let inner = self.inner.lock().unwrap();
        let coupon_id = match inner.cart_coupons.get(&cart_id) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(inner.coupons.iter().find(|c| c.id == coupon_id).cloned())
    }

    async fn upsert_cart_coupon(&self, cart_id: Uuid, coupon_id: Uuid) -> StoreResult<()> {
        self.inner
            .lock()
            .unwrap()
            .cart_coupons
            .insert(cart_id, coupon_id);
        Ok(())
    }

    async fn find_order(&self, order_id: Uuid) -> StoreResult<Option<Order>> {
        Ok(self.inner.lock().unwrap().orders.get(&order_id).cloned())
    }

    async fn list_order_coupons(&self, order_id: Uuid) -> StoreResult<Vec<Coupon>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .order_coupons
            .iter()
            .filter(|(oid, _)| *oid == order_id)
            .filter_map(|(_, cid)| inner.coupons.iter().find(|c| c.id == *cid).cloned())
            .collect())
    }

    async fn create_order_coupon(&self, order_id: Uuid, coupon_id: Uuid) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .order_coupons
            .iter()
            .any(|(oid, cid)| *oid == order_id && *cid == coupon_id)
        {
            return Err(StoreError::UniqueViolation);
        }
        inner.order_coupons.push((order_id, coupon_id));
        Ok(())
    }

    async fn update_order_payable(&self, order_id: Uuid, payable: Decimal) -> StoreResult<Order> {
        let mut inner = self.inner.lock().unwrap();
        let order = inner
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| StoreError::Backend(anyhow::anyhow!("no such order")))?;
        order.payable_amount = payable;
        Ok(order.clone())
    }
}

pub fn cart_manager(store: &MemStore, max_items: usize) -> CartManager<MemStore, MemStore, MemStore> {
    CartManager::new(store.clone(), store.clone(), store.clone(), max_items)
}

pub fn coupon_manager(store: &MemStore) -> CouponManager<MemStore, MemStore, MemStore> {
    CouponManager::new(store.clone(), store.clone(), store.clone())
}

pub fn auth_user() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "user".to_string(),
    }
}

pub fn money(mantissa: i64) -> Decimal {
    Decimal::new(mantissa, 2)
}
