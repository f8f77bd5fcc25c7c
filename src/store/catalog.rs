use uuid::Uuid;

use crate::{
    db::DbPool,
    error::StoreResult,
    models::{Product, ProductVariant},
    store::CatalogStore,
};

/// Catalog reads go through plain sqlx; they are simple single-row lookups
/// and never mutate anything.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for PgCatalogStore {
    async fn get_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, base_price, created_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn get_variant(&self, id: Uuid) -> StoreResult<Option<ProductVariant>> {
        let variant = sqlx::query_as::<_, ProductVariant>(
            r#"
            SELECT id, product_id, name, additional_price, created_at
            FROM product_variants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(variant)
    }
}
