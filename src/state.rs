use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    services::{CartManager, CouponManager},
    store::{PgCartStore, PgCatalogStore, PgCouponStore},
};

pub type AppCartManager = CartManager<PgCatalogStore, PgCartStore, PgCouponStore>;
pub type AppCouponManager = CouponManager<PgCatalogStore, PgCartStore, PgCouponStore>;

/// Shared application state. The managers receive their store adapters
/// here, at construction; connection lifecycle stays with `main`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub cart: AppCartManager,
    pub coupons: AppCouponManager,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn, config: &AppConfig) -> Self {
        let catalog = PgCatalogStore::new(pool.clone());
        let carts = PgCartStore::new(orm.clone());
        let coupons = PgCouponStore::new(orm.clone());
        Self {
            cart: CartManager::new(
                catalog.clone(),
                carts.clone(),
                coupons.clone(),
                config.cart_max_items,
            ),
            coupons: CouponManager::new(catalog, carts, coupons),
            pool,
            orm,
        }
    }
}
