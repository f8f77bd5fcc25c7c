pub mod cart;
pub mod coupons;
pub mod products;
