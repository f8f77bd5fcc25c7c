use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddToCartRequest, CartItemDetail, PricedCart, UpdateQuantityRequest},
        coupons::{
            ApplyCouponToCartRequest, ApplyCouponToOrderRequest, CouponList, CreateCouponRequest,
            UpdateCouponRequest,
        },
        products::{ProductList, ProductWithVariants},
    },
    models::{Cart, CartItem, Coupon, Order, Product, ProductVariant},
    pricing::CartTotals,
    response::{ApiResponse, Meta},
    routes::{cart, coupons, health, params, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        cart::get_cart,
        cart::add_to_cart,
        cart::clear_cart,
        cart::update_quantity,
        cart::remove_item,
        coupons::create_coupon,
        coupons::list_coupons,
        coupons::get_coupon,
        coupons::update_coupon,
        coupons::delete_coupon,
        coupons::apply_to_cart,
        coupons::apply_to_order
    ),
    components(
        schemas(
            Product,
            ProductVariant,
            Cart,
            CartItem,
            Coupon,
            Order,
            CartTotals,
            PricedCart,
            CartItemDetail,
            AddToCartRequest,
            UpdateQuantityRequest,
            ApplyCouponToCartRequest,
            ApplyCouponToOrderRequest,
            CreateCouponRequest,
            UpdateCouponRequest,
            CouponList,
            ProductList,
            ProductWithVariants,
            params::Pagination,
            Meta,
            ApiResponse<PricedCart>,
            ApiResponse<CartItem>,
            ApiResponse<Coupon>,
            ApiResponse<CouponList>,
            ApiResponse<Order>,
            ApiResponse<ProductList>,
            ApiResponse<ProductWithVariants>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog read endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Coupons", description = "Coupon management and attachment endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
