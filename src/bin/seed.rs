use axum_cart_api::{config::AppConfig, db::create_pool};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    seed_products(&pool).await?;
    seed_coupons(&pool).await?;

    println!("Seed completed.");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = vec![
        ("Axum Hoodie", "Warm hoodie for Rustaceans", Decimal::new(5500, 2), vec![("XL", Decimal::new(300, 2))]),
        ("Ferris Mug", "Coffee tastes better with Ferris", Decimal::new(1200, 2), vec![]),
        ("Rust Sticker Pack", "Decorate your laptop", Decimal::new(500, 2), vec![]),
        (
            "Crab Tee",
            "A tee with a crab on it",
            Decimal::new(2000, 2),
            vec![("L", Decimal::new(150, 2)), ("XL", Decimal::new(450, 2))],
        ),
    ];

    for (name, desc, base_price, variants) in products {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO products (id, name, description, base_price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .bind(base_price)
        .fetch_optional(pool)
        .await?;

        let product_id = match row {
            Some((id,)) => id,
            None => continue,
        };

        for (variant_name, additional_price) in variants {
            sqlx::query(
                r#"
                INSERT INTO product_variants (id, product_id, name, additional_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(product_id)
            .bind(variant_name)
            .bind(additional_price)
            .execute(pool)
            .await?;
        }
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_coupons(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let coupons = vec![
        ("WELCOME10", Decimal::from(10), Utc::now() + Duration::days(90)),
        ("SUMMER25", Decimal::from(25), Utc::now() + Duration::days(30)),
        ("EXPIRED5", Decimal::from(5), Utc::now() - Duration::days(1)),
    ];

    for (code, discount, expiry_date) in coupons {
        sqlx::query(
            r#"
            INSERT INTO coupons (id, code, discount, expiry_date)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(code)
        .bind(discount)
        .bind(expiry_date)
        .execute(pool)
        .await?;
    }

    println!("Seeded coupons");
    Ok(())
}
