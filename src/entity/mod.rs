pub mod cart_coupons;
pub mod cart_items;
pub mod carts;
pub mod coupons;
pub mod order_coupons;
pub mod orders;
pub mod product_variants;
pub mod products;

pub use cart_coupons::Entity as CartCoupons;
pub use cart_items::Entity as CartItems;
pub use carts::Entity as Carts;
pub use coupons::Entity as Coupons;
pub use order_coupons::Entity as OrderCoupons;
pub use orders::Entity as Orders;
pub use product_variants::Entity as ProductVariants;
pub use products::Entity as Products;
