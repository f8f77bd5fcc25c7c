mod common;

use axum_cart_api::{
    dto::cart::AddToCartRequest,
    error::AppError,
    pricing::CartTotals,
    store::CouponStore,
};
use chrono::{Duration, Utc};
use common::{auth_user, cart_manager, coupon_manager, money, MemStore};
use rust_decimal::Decimal;
use uuid::Uuid;

/// 20.00 x2 plus (15.50 + 4.50) x1 into a cart, so the subtotal is 60.00.
async fn seeded_cart(store: &MemStore) -> anyhow::Result<Uuid> {
    let manager = cart_manager(store, 10);
    let user = auth_user();

    let widget = store.add_product("Widget", money(2000));
    let gadget = store.add_product("Gadget", money(1550));
    let gadget_xl = store.add_variant(gadget, money(450));

    let cart = manager
        .add_item(
            &user,
            AddToCartRequest {
                product_id: widget,
                variant_id: None,
            },
        )
        .await?;
    manager.update_quantity(&user, cart.items[0].id, 2).await?;
    let cart = manager
        .add_item(
            &user,
            AddToCartRequest {
                product_id: gadget,
                variant_id: Some(gadget_xl),
            },
        )
        .await?;

    Ok(cart.cart.id)
}

#[tokio::test]
async fn applying_a_coupon_reprices_the_cart() -> anyhow::Result<()> {
    let store = MemStore::new();
    let cart_id = seeded_cart(&store).await?;
    let manager = coupon_manager(&store);

    store.add_coupon("TEN", Decimal::from(10), Utc::now() + Duration::days(7));

    let cart = manager.apply_to_cart(cart_id, "TEN").await?;
    assert_eq!(
        cart.totals,
        CartTotals::Discounted {
            subtotal: money(6000),
            discount_amount: money(600),
            total: money(5400),
        }
    );
    Ok(())
}

#[tokio::test]
async fn expired_coupon_is_rejected_everywhere() -> anyhow::Result<()> {
    let store = MemStore::new();
    let cart_id = seeded_cart(&store).await?;
    let order_id = store.add_order(Uuid::new_v4(), money(10000));
    let manager = coupon_manager(&store);

    store.add_coupon("OLD", Decimal::from(10), Utc::now() - Duration::hours(1));

    assert!(matches!(
        manager.apply_to_cart(cart_id, "OLD").await.unwrap_err(),
        AppError::Expired
    ));
    assert!(matches!(
        manager.apply_to_order(order_id, "OLD").await.unwrap_err(),
        AppError::Expired
    ));
    Ok(())
}

#[tokio::test]
async fn attached_coupon_keeps_pricing_the_cart_after_it_expires() -> anyhow::Result<()> {
    let store = MemStore::new();
    let manager = cart_manager(&store, 10);
    let user = auth_user();

    let widget = store.add_product("Widget", money(2000));
    let cart = manager
        .add_item(
            &user,
            AddToCartRequest {
                product_id: widget,
                variant_id: None,
            },
        )
        .await?;

    // Bind a coupon whose expiry has already passed, as if it expired
    // some time after a successful attach.
    let coupon = store.add_coupon("WAS_VALID", Decimal::from(10), Utc::now() - Duration::days(1));
    store.upsert_cart_coupon(cart.cart.id, coupon.id).await?;

    // Expiry is an attach-time gate only; the read path prices with
    // whatever is attached.
    let cart = manager.get_cart(&user).await?;
    assert_eq!(
        cart.totals,
        CartTotals::Discounted {
            subtotal: money(2000),
            discount_amount: money(200),
            total: money(1800),
        }
    );
    Ok(())
}

#[tokio::test]
async fn reapplying_the_same_coupon_to_a_cart_conflicts() -> anyhow::Result<()> {
    let store = MemStore::new();
    let cart_id = seeded_cart(&store).await?;
    let manager = coupon_manager(&store);

    store.add_coupon("TEN", Decimal::from(10), Utc::now() + Duration::days(7));

    manager.apply_to_cart(cart_id, "TEN").await?;
    let err = manager.apply_to_cart(cart_id, "TEN").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}

#[tokio::test]
async fn a_new_coupon_replaces_the_attached_one() -> anyhow::Result<()> {
    let store = MemStore::new();
    let cart_id = seeded_cart(&store).await?;
    let manager = coupon_manager(&store);

    store.add_coupon("TEN", Decimal::from(10), Utc::now() + Duration::days(7));
    store.add_coupon("HALF", Decimal::from(50), Utc::now() + Duration::days(7));

    manager.apply_to_cart(cart_id, "TEN").await?;
    let cart = manager.apply_to_cart(cart_id, "HALF").await?;

    // Only the replacement coupon prices the cart.
    assert_eq!(
        cart.totals,
        CartTotals::Discounted {
            subtotal: money(6000),
            discount_amount: money(3000),
            total: money(3000),
        }
    );

    // And the swap back is allowed again, since TEN is no longer attached.
    let cart = manager.apply_to_cart(cart_id, "TEN").await?;
    assert_eq!(cart.totals.total(), money(5400));
    Ok(())
}

#[tokio::test]
async fn order_payable_derives_from_every_attached_coupon() -> anyhow::Result<()> {
    let store = MemStore::new();
    let order_id = store.add_order(Uuid::new_v4(), Decimal::from(100));
    let manager = coupon_manager(&store);

    store.add_coupon("TEN", Decimal::from(10), Utc::now() + Duration::days(7));
    store.add_coupon("TWENTY", Decimal::from(20), Utc::now() + Duration::days(7));

    let order = manager.apply_to_order(order_id, "TEN").await?;
    assert_eq!(order.payable_amount, Decimal::from(90));
    assert_eq!(order.total_amount, Decimal::from(100));

    let order = manager.apply_to_order(order_id, "TWENTY").await?;
    assert_eq!(order.payable_amount, Decimal::from(72));
    // The gross total never moves.
    assert_eq!(order.total_amount, Decimal::from(100));
    Ok(())
}

#[tokio::test]
async fn reapplying_the_same_coupon_to_an_order_conflicts() -> anyhow::Result<()> {
    let store = MemStore::new();
    let order_id = store.add_order(Uuid::new_v4(), Decimal::from(100));
    let manager = coupon_manager(&store);

    store.add_coupon("TEN", Decimal::from(10), Utc::now() + Duration::days(7));

    let order = manager.apply_to_order(order_id, "TEN").await?;
    assert_eq!(order.payable_amount, Decimal::from(90));

    let err = manager.apply_to_order(order_id, "TEN").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The failed attach left the payable amount alone.
    assert_eq!(store.order_payable(order_id), Some(Decimal::from(90)));
    Ok(())
}

#[tokio::test]
async fn unknown_cart_order_or_coupon_is_not_found() -> anyhow::Result<()> {
    let store = MemStore::new();
    let cart_id = seeded_cart(&store).await?;
    let manager = coupon_manager(&store);

    assert!(matches!(
        manager.apply_to_cart(cart_id, "NOPE").await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        manager.apply_to_cart(Uuid::new_v4(), "NOPE").await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        manager.apply_to_order(Uuid::new_v4(), "NOPE").await.unwrap_err(),
        AppError::NotFound(_)
    ));
    Ok(())
}
