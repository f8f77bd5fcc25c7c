use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::coupons::{CreateCouponRequest, UpdateCouponRequest},
    entity::{
        coupons::{ActiveModel as CouponActive, Column as CouponCol, Entity as Coupons, Model as CouponModel},
        order_coupons::{Column as OrderCouponCol, Entity as OrderCoupons},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Coupon,
    routes::params::Pagination,
};

/// Coupon administration. These are catalog-side maintenance calls, so they
/// work the ORM connection directly rather than going through the cart
/// store boundary.
pub async fn create_coupon(
    orm: &OrmConn,
    user: &AuthUser,
    payload: CreateCouponRequest,
) -> AppResult<Coupon> {
    ensure_admin(user)?;

    let code = payload.code.trim();
    if code.is_empty() {
        return Err(AppError::InvalidArgument("Coupon code is required".into()));
    }
    validate_discount(payload.discount)?;

    let exists = Coupons::find()
        .filter(CouponCol::Code.eq(code))
        .one(orm)
        .await?;
    if exists.is_some() {
        return Err(AppError::Conflict("Coupon code already exists".into()));
    }

    let coupon = CouponActive {
        id: Set(Uuid::new_v4()),
        code: Set(code.to_string()),
        discount: Set(payload.discount),
        expiry_date: Set(payload.expiry_date.into()),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;

    Ok(coupon_from_entity(coupon))
}

pub async fn list_coupons(
    orm: &OrmConn,
    user: &AuthUser,
    pagination: &Pagination,
) -> AppResult<(Vec<Coupon>, i64)> {
    ensure_admin(user)?;

    let (_, limit, offset) = pagination.normalize();

    let finder = Coupons::find().order_by_desc(CouponCol::CreatedAt);
    let total = finder.clone().count(orm).await? as i64;
    let coupons = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(orm)
        .await?;

    Ok((coupons.into_iter().map(coupon_from_entity).collect(), total))
}

pub async fn get_coupon(orm: &OrmConn, user: &AuthUser, id: Uuid) -> AppResult<Coupon> {
    ensure_admin(user)?;

    let coupon = Coupons::find_by_id(id)
        .one(orm)
        .await?
        .ok_or(AppError::NotFound("Coupon"))?;
    Ok(coupon_from_entity(coupon))
}

pub async fn update_coupon(
    orm: &OrmConn,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCouponRequest,
) -> AppResult<Coupon> {
    ensure_admin(user)?;

    let existing = Coupons::find_by_id(id)
        .one(orm)
        .await?
        .ok_or(AppError::NotFound("Coupon"))?;

    let mut active: CouponActive = existing.into();

    if let Some(code) = payload.code {
        let code = code.trim().to_string();
        if code.is_empty() {
            return Err(AppError::InvalidArgument("Coupon code is required".into()));
        }
        let taken = Coupons::find()
            .filter(CouponCol::Code.eq(code.as_str()))
            .filter(CouponCol::Id.ne(id))
            .one(orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::Conflict("Coupon code already exists".into()));
        }
        active.code = Set(code);
    }
    if let Some(discount) = payload.discount {
        validate_discount(discount)?;
        active.discount = Set(discount);
    }
    if let Some(expiry_date) = payload.expiry_date {
        active.expiry_date = Set(expiry_date.into());
    }

    let updated = active.update(orm).await?;
    Ok(coupon_from_entity(updated))
}

pub async fn delete_coupon(orm: &OrmConn, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;

    let existing = Coupons::find_by_id(id)
        .one(orm)
        .await?
        .ok_or(AppError::NotFound("Coupon"))?;

    let used = OrderCoupons::find()
        .filter(OrderCouponCol::CouponId.eq(id))
        .count(orm)
        .await?;
    if used > 0 {
        return Err(AppError::Conflict(
            "Cannot delete coupon as it is applied to orders".into(),
        ));
    }

    Coupons::delete_by_id(existing.id).exec(orm).await?;
    Ok(())
}

fn validate_discount(discount: Decimal) -> AppResult<()> {
    if discount <= Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
        return Err(AppError::InvalidArgument(
            "Discount must be greater than 0 and at most 100".into(),
        ));
    }
    Ok(())
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
