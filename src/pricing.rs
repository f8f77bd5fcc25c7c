//! Pure cart/order pricing arithmetic. All money math goes through
//! `rust_decimal` so percentage discounts round exactly; nothing in here
//! touches a store or the clock.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// One priced, quantity-bearing unit of a cart.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub base_price: Decimal,
    pub variant_additional_price: Option<Decimal>,
    pub quantity: i32,
}

impl LineItem {
    fn line_total(&self) -> Decimal {
        let unit = self.base_price + self.variant_additional_price.unwrap_or(Decimal::ZERO);
        unit * Decimal::from(self.quantity)
    }
}

/// Priced cart result. The two shapes are deliberate: a cart with no coupon
/// surfaces only `total`, so callers can tell "no discount applied" apart
/// from "discount of zero".
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CartTotals {
    Discounted {
        subtotal: Decimal,
        discount_amount: Decimal,
        total: Decimal,
    },
    Plain {
        total: Decimal,
    },
}

impl CartTotals {
    pub fn total(&self) -> Decimal {
        match self {
            CartTotals::Discounted { total, .. } | CartTotals::Plain { total } => *total,
        }
    }
}

/// Compute subtotal/discount/total for a set of line items and an optional
/// percentage discount. Deterministic for identical inputs.
pub fn price_cart(items: &[LineItem], discount_percent: Option<Decimal>) -> CartTotals {
    let subtotal: Decimal = items.iter().map(LineItem::line_total).sum();

    match discount_percent {
        Some(percent) => {
            let discount_amount = subtotal * percent / Decimal::ONE_HUNDRED;
            CartTotals::Discounted {
                subtotal,
                discount_amount,
                total: subtotal - discount_amount,
            }
        }
        None => CartTotals::Plain { total: subtotal },
    }
}

/// Payable amount for an order: the immutable gross total reduced by each
/// attached coupon in turn. Depends only on the coupon set, not on the
/// order the coupons were attached in.
pub fn order_payable(total_amount: Decimal, discounts: &[Decimal]) -> Decimal {
    discounts.iter().fold(total_amount, |amount, percent| {
        amount - amount * *percent / Decimal::ONE_HUNDRED
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(mantissa: i64) -> Decimal {
        // Cents in, two-decimal-place value out.
        Decimal::new(mantissa, 2)
    }

    #[test]
    fn prices_items_with_variant_surcharge_and_discount() {
        let items = vec![
            LineItem {
                base_price: money(2000),
                variant_additional_price: None,
                quantity: 2,
            },
            LineItem {
                base_price: money(1550),
                variant_additional_price: Some(money(450)),
                quantity: 1,
            },
        ];

        let totals = price_cart(&items, Some(Decimal::from(10)));
        assert_eq!(
            totals,
            CartTotals::Discounted {
                subtotal: money(6000),
                discount_amount: money(600),
                total: money(5400),
            }
        );
    }

    #[test]
    fn no_coupon_yields_plain_total_equal_to_subtotal() {
        let items = vec![LineItem {
            base_price: money(999),
            variant_additional_price: None,
            quantity: 3,
        }];

        let totals = price_cart(&items, None);
        assert_eq!(totals, CartTotals::Plain { total: money(2997) });
    }

    #[test]
    fn empty_cart_totals_zero() {
        assert_eq!(price_cart(&[], None).total(), Decimal::ZERO);
    }

    #[test]
    fn full_discount_zeroes_the_total() {
        let items = vec![LineItem {
            base_price: money(1234),
            variant_additional_price: None,
            quantity: 1,
        }];

        let totals = price_cart(&items, Some(Decimal::from(100)));
        assert_eq!(totals.total(), Decimal::ZERO);
    }

    #[test]
    fn plain_totals_serialize_without_discount_fields() {
        let json = serde_json::to_value(CartTotals::Plain { total: money(100) }).unwrap();
        assert!(json.get("subtotal").is_none());
        assert!(json.get("discount_amount").is_none());
        assert_eq!(json.get("total").unwrap().as_str(), Some("1.00"));
    }

    #[test]
    fn order_payable_is_independent_of_attach_order() {
        let total = Decimal::from(100);
        let ten_then_twenty =
            order_payable(total, &[Decimal::from(10), Decimal::from(20)]);
        let twenty_then_ten =
            order_payable(total, &[Decimal::from(20), Decimal::from(10)]);

        assert_eq!(ten_then_twenty, Decimal::from(72));
        assert_eq!(ten_then_twenty, twenty_then_ten);
    }

    #[test]
    fn order_payable_without_coupons_is_the_gross_total() {
        assert_eq!(order_payable(money(12345), &[]), money(12345));
    }
}
