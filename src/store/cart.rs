use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::{
        cart_items::{
            ActiveModel as CartItemActive, Column as CartItemCol, Entity as CartItems,
            Model as CartItemModel,
        },
        carts::{ActiveModel as CartActive, Column as CartCol, Entity as Carts, Model as CartModel},
    },
    error::StoreResult,
    models::{Cart, CartItem},
    store::CartStore,
};

#[derive(Clone)]
pub struct PgCartStore {
    orm: OrmConn,
}

impl PgCartStore {
    pub fn new(orm: OrmConn) -> Self {
        Self { orm }
    }
}

impl CartStore for PgCartStore {
    async fn find_cart(&self, cart_id: Uuid) -> StoreResult<Option<Cart>> {
        let cart = Carts::find_by_id(cart_id).one(&self.orm).await?;
        Ok(cart.map(cart_from_entity))
    }

    async fn find_cart_by_owner(&self, user_id: Uuid) -> StoreResult<Option<Cart>> {
        let cart = Carts::find()
            .filter(CartCol::UserId.eq(user_id))
            .one(&self.orm)
            .await?;
        Ok(cart.map(cart_from_entity))
    }

    async fn create_cart(&self, user_id: Uuid) -> StoreResult<Cart> {
        let cart = CartActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            created_at: NotSet,
        }
        .insert(&self.orm)
        .await?;
        Ok(cart_from_entity(cart))
    }

    async fn list_items(&self, cart_id: Uuid) -> StoreResult<Vec<CartItem>> {
        let items = CartItems::find()
            .filter(CartItemCol::CartId.eq(cart_id))
            .all(&self.orm)
            .await?;
        Ok(items.into_iter().map(item_from_entity).collect())
    }

    async fn create_item(
        &self,
        cart_id: Uuid,
        product_id: Uuid,
        variant_id: Option<Uuid>,
        qty: i32,
    ) -> StoreResult<CartItem> {
        let item = CartItemActive {
            id: Set(Uuid::new_v4()),
            cart_id: Set(cart_id),
            product_id: Set(product_id),
            variant_id: Set(variant_id),
            item_qty: Set(qty),
            created_at: NotSet,
        }
        .insert(&self.orm)
        .await?;
        Ok(item_from_entity(item))
    }

    async fn delete_item(&self, item_id: Uuid) -> StoreResult<()> {
        CartItems::delete_by_id(item_id).exec(&self.orm).await?;
        Ok(())
    }

    async fn delete_all_items(&self, cart_id: Uuid) -> StoreResult<u64> {
        let result = CartItems::delete_many()
            .filter(CartItemCol::CartId.eq(cart_id))
            .exec(&self.orm)
            .await?;
        Ok(result.rows_affected)
    }

    async fn update_item_qty(&self, item_id: Uuid, qty: i32) -> StoreResult<CartItem> {
        let updated = CartItems::update_many()
            .col_expr(CartItemCol::ItemQty, Expr::value(qty))
            .filter(CartItemCol::Id.eq(item_id))
            .exec_with_returning(&self.orm)
            .await?;
        // The manager has already resolved the item, so one row comes back.
        let item = updated
            .into_iter()
            .next()
            .ok_or(sea_orm::DbErr::RecordNotUpdated)?;
        Ok(item_from_entity(item))
    }

    async fn find_item(&self, item_id: Uuid) -> StoreResult<Option<(CartItem, Cart)>> {
        let found = CartItems::find_by_id(item_id)
            .find_also_related(Carts)
            .one(&self.orm)
            .await?;
        Ok(found.and_then(|(item, cart)| {
            cart.map(|cart| (item_from_entity(item), cart_from_entity(cart)))
        }))
    }
}

fn cart_from_entity(model: CartModel) -> Cart {
    Cart {
        id: model.id,
        user_id: model.user_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn item_from_entity(model: CartItemModel) -> CartItem {
    CartItem {
        id: model.id,
        cart_id: model.cart_id,
        product_id: model.product_id,
        variant_id: model.variant_id,
        item_qty: model.item_qty,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
