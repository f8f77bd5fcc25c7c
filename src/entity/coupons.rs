use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub discount: Decimal,
    pub expiry_date: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_coupons::Entity")]
    CartCoupons,
    #[sea_orm(has_many = "super::order_coupons::Entity")]
    OrderCoupons,
}

impl Related<super::cart_coupons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartCoupons.def()
    }
}

impl Related<super::order_coupons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderCoupons.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
