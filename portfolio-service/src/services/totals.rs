//! Shared totals engine for the line-item document families.
//!
//! Invoices, quotations and receipts all price the same way; keeping the
//! arithmetic in one place is what guarantees they cannot drift. Order of
//! operations: item amounts, subtotal, discount, then tax on the
//! post-discount base.

use rust_decimal::Decimal;

use crate::models::{DiscountType, NewLineItem};

/// One raw line item as supplied by the caller. Only description, quantity
/// and rate are trusted; the amount is always recomputed.
#[derive(Debug, Clone)]
pub struct ItemInput {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
}

/// Fully computed money fields for one document.
#[derive(Debug, Clone)]
pub struct DocumentTotals {
    pub items: Vec<NewLineItem>,
    pub subtotal: Decimal,
    pub discount_applied: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

/// Compute every derived money field from raw inputs.
///
/// `tax_rate` and a percentage `discount` are both expressed as percents
/// (10 means 10%). The applied discount is clamped to the subtotal so a
/// fixed discount larger than the document can never drive the total
/// negative. All intermediate results round to two decimal places.
pub fn compute(
    items: &[ItemInput],
    discount: Decimal,
    discount_type: DiscountType,
    tax_rate: Decimal,
) -> DocumentTotals {
    let hundred = Decimal::new(100, 0);

    let items: Vec<NewLineItem> = items
        .iter()
        .map(|item| NewLineItem {
            description: item.description.clone(),
            quantity: item.quantity,
            rate: item.rate,
            amount: (item.quantity * item.rate).round_dp(2),
        })
        .collect();

    let subtotal: Decimal = items.iter().map(|item| item.amount).sum();

    let discount_applied = match discount_type {
        DiscountType::Percentage => (subtotal * discount / hundred).round_dp(2),
        DiscountType::Fixed => discount.round_dp(2),
    }
    .min(subtotal)
    .max(Decimal::ZERO);

    let taxable = subtotal - discount_applied;
    let tax_amount = (taxable * tax_rate / hundred).round_dp(2);
    let total = taxable + tax_amount;

    DocumentTotals {
        items,
        subtotal,
        discount_applied,
        tax_amount,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn item(quantity: &str, rate: &str) -> ItemInput {
        ItemInput {
            description: "work".to_string(),
            quantity: d(quantity),
            rate: d(rate),
        }
    }

    #[test]
    fn amounts_are_recomputed_from_quantity_and_rate() {
        let totals = compute(
            &[item("3", "25.50"), item("2", "10")],
            Decimal::ZERO,
            DiscountType::Fixed,
            Decimal::ZERO,
        );
        assert_eq!(totals.items[0].amount, d("76.50"));
        assert_eq!(totals.items[1].amount, d("20"));
        assert_eq!(totals.subtotal, d("96.50"));
        assert_eq!(totals.total, d("96.50"));
    }

    #[test]
    fn tax_without_discount_matches_worked_example() {
        // subtotal=100, tax=10%, no discount -> 110
        let totals = compute(
            &[item("1", "100")],
            Decimal::ZERO,
            DiscountType::Percentage,
            d("10"),
        );
        assert_eq!(totals.subtotal, d("100"));
        assert_eq!(totals.tax_amount, d("10.00"));
        assert_eq!(totals.total, d("110.00"));
    }

    #[test]
    fn fixed_discount_matches_worked_example() {
        // subtotal=200, no tax, 20 fixed discount -> 180
        let totals = compute(
            &[item("2", "100")],
            d("20"),
            DiscountType::Fixed,
            Decimal::ZERO,
        );
        assert_eq!(totals.subtotal, d("200"));
        assert_eq!(totals.discount_applied, d("20.00"));
        assert_eq!(totals.total, d("180.00"));
    }

    #[test]
    fn percentage_discount_of_ten_on_hundred_is_ten() {
        let totals = compute(
            &[item("1", "100")],
            d("10"),
            DiscountType::Percentage,
            Decimal::ZERO,
        );
        assert_eq!(totals.discount_applied, d("10.00"));
        assert_eq!(totals.total, d("90.00"));
    }

    #[test]
    fn fixed_discount_of_ten_is_ten_regardless_of_subtotal() {
        for rate in ["50", "500", "5000"] {
            let totals = compute(
                &[item("1", rate)],
                d("10"),
                DiscountType::Fixed,
                Decimal::ZERO,
            );
            assert_eq!(totals.discount_applied, d("10.00"));
        }
    }

    #[test]
    fn tax_applies_to_post_discount_base() {
        // 100 - 20 = 80 taxable, 10% tax = 8, total 88
        let totals = compute(&[item("1", "100")], d("20"), DiscountType::Fixed, d("10"));
        assert_eq!(totals.tax_amount, d("8.00"));
        assert_eq!(totals.total, d("88.00"));
    }

    #[test]
    fn oversized_fixed_discount_is_clamped_to_subtotal() {
        let totals = compute(&[item("1", "30")], d("100"), DiscountType::Fixed, d("10"));
        assert_eq!(totals.discount_applied, d("30"));
        assert_eq!(totals.tax_amount, d("0.00"));
        assert_eq!(totals.total, d("0.00"));
    }

    #[test]
    fn empty_items_produce_zero_totals() {
        let totals = compute(&[], Decimal::ZERO, DiscountType::Percentage, d("10"));
        assert!(totals.items.is_empty());
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }
}
