use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::{
        cart_coupons::{ActiveModel as CartCouponActive, Column as CartCouponCol, Entity as CartCoupons},
        coupons::{Column as CouponCol, Entity as Coupons, Model as CouponModel},
        order_coupons::{
            ActiveModel as OrderCouponActive, Column as OrderCouponCol, Entity as OrderCoupons,
        },
        orders::{Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::StoreResult,
    models::{Coupon, Order},
    store::CouponStore,
};

#[derive(Clone)]
pub struct PgCouponStore {
    orm: OrmConn,
}

impl PgCouponStore {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

impl CouponStore for PgCouponStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Coupon>> {
        let coupon = Coupons::find()
            .filter(CouponCol::Code.eq(code))
            .one(&self.orm)
            .await?;
        Ok(coupon.map(coupon_from_entity))
    }

    async fn find_cart_coupon(&self, cart_id: Uuid) -> StoreResult<Option<Coupon>> {
        let found = CartCoupons::find()
            .filter(CartCouponCol::CartId.eq(cart_id))
            .find_also_related(Coupons)
            .one(&self.orm)
            .await?;
        Ok(found.and_then(|(_, coupon)| coupon.map(coupon_from_entity)))
    }

    async fn upsert_cart_coupon(&self, cart_id: Uuid, coupon_id: Uuid) -> StoreResult<()> {
        // Keyed on the cart's unique constraint: a second attach replaces
        // the previous binding in a single statement.
        CartCoupons::insert(CartCouponActive {
            id: Set(Uuid::new_v4()),
            cart_id: Set(cart_id),
            coupon_id: Set(coupon_id),
            created_at: NotSet,
        })
        .on_conflict(
            OnConflict::column(CartCouponCol::CartId)
                .update_column(CartCouponCol::CouponId)
                .to_owned(),
        )
        .exec(&self.orm)
        .await?;
        Ok(())
    }

    async fn find_order(&self, order_id: Uuid) -> StoreResult<Option<Order>> {
        let order = Orders::find_by_id(order_id).one(&self.orm).await?;
        Ok(order.map(order_from_entity))
    }

    async fn list_order_coupons(&self, order_id: Uuid) -> StoreResult<Vec<Coupon>> {
        let rows = OrderCoupons::find()
            .filter(OrderCouponCol::OrderId.eq(order_id))
            .find_also_related(Coupons)
            .all(&self.orm)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(_, coupon)| coupon.map(coupon_from_entity))
            .collect())
    }

    async fn create_order_coupon(&self, order_id: Uuid, coupon_id: Uuid) -> StoreResult<()> {
        OrderCouponActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            coupon_id: Set(coupon_id),
            created_at: NotSet,
        }
        .insert(&self.orm)
        .await?;
        Ok(())
    }

    async fn update_order_payable(&self, order_id: Uuid, payable: Decimal) -> StoreResult<Order> {
        let updated = Orders::update_many()
            .col_expr(OrderCol::PayableAmount, Expr::value(payable))
            .filter(OrderCol::Id.eq(order_id))
            .exec_with_returning(&self.orm)
            .await?;
        let order = updated
            .into_iter()
            .next()
            .ok_or(sea_orm::DbErr::RecordNotUpdated)?;
        Ok(order_from_entity(order))
    }
}

fn coupon_from_entity(model: CouponModel) -> Coupon {
    Coupon {
        id: model.id,
        code: model.code,
        discount: model.discount,
        expiry_date: model.expiry_date.with_timezone(&Utc),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        total_amount: model.total_amount,
        payable_amount: model.payable_amount,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
