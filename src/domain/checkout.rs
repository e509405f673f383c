//! Totals and stock validation over fetched cart lines.

use rust_decimal::Decimal;

use crate::models::CartLine;

/// Order total as the sum of current unit price times quantity.
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(|line| line.product.price * Decimal::from(line.quantity))
        .sum()
}

/// Every under-stocked line, in cart order. Empty means the whole cart is
/// coverable by current stock.
pub fn stock_shortages(lines: &[CartLine]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| line.product.stock < line.quantity)
        .map(|line| format!("{}: only {} available", line.product.name, line.product.stock))
        .collect()
}

/// Two-decimal string rendering for client-facing amounts.
pub fn format_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CartProduct;
    use uuid::Uuid;

    fn line(name: &str, price: Decimal, quantity: i32, stock: i32) -> CartLine {
        CartLine {
            id: Uuid::new_v4(),
            quantity,
            product_id: 1,
            product: CartProduct {
                id: 1,
                name: name.into(),
                price,
                stock,
                image_url: None,
            },
        }
    }

    #[test]
    fn test_total_is_price_times_quantity() {
        let lines = vec![line("Widget", Decimal::new(1000, 2), 2, 5)];
        assert_eq!(format_amount(cart_total(&lines)), "20.00");
    }

    #[test]
    fn test_total_sums_across_lines() {
        let lines = vec![
            line("Widget", Decimal::new(1000, 2), 2, 5),
            line("Gadget", Decimal::new(250, 2), 3, 10),
        ];
        assert_eq!(cart_total(&lines), Decimal::new(2750, 2));
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        assert_eq!(cart_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_shortages_lists_every_offending_line() {
        let lines = vec![
            line("Widget", Decimal::new(1000, 2), 3, 1),
            line("Gadget", Decimal::new(250, 2), 2, 5),
            line("Gizmo", Decimal::new(500, 2), 4, 0),
        ];
        assert_eq!(
            stock_shortages(&lines),
            vec!["Widget: only 1 available", "Gizmo: only 0 available"]
        );
    }

    #[test]
    fn test_exact_stock_is_not_a_shortage() {
        let lines = vec![line("Widget", Decimal::new(1000, 2), 2, 2)];
        assert!(stock_shortages(&lines).is_empty());
    }

    #[test]
    fn test_format_amount_pads_decimals() {
        assert_eq!(format_amount(Decimal::new(5, 0)), "5.00");
        assert_eq!(format_amount(Decimal::new(1999, 2)), "19.99");
    }
}
