//! Item filter policy - which line items participate in the printed bill

use shared::{FulfillmentType, LineItem};

/// Reserved sub-SKU for separate-packaging lines
///
/// Packaging lines are never shown as billable rows, whatever the
/// fulfillment type.
pub const SEPARATE_PACKAGING_SUB_SKU: &str = "PACKAGING";

/// Select the items eligible to appear on the printed bill
///
/// Dine-in bills must not include items never sent to the kitchen, so for
/// `DineIn` only lines with an assigned kitchen ticket number survive. All
/// other fulfillment types keep every line. Packaging lines are dropped
/// unconditionally.
///
/// Pure and deterministic; called once per totals render and once before
/// submission.
pub fn select_billable_items(items: &[LineItem], fulfillment: FulfillmentType) -> Vec<LineItem> {
    items
        .iter()
        .filter(|item| item.sub_sku_code != SEPARATE_PACKAGING_SUB_SKU)
        .filter(|item| fulfillment != FulfillmentType::DineIn || item.is_ticketed())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku: &str, sub_sku: &str, ticket: i64) -> LineItem {
        LineItem {
            sku_code: sku.to_string(),
            sub_sku_code: sub_sku.to_string(),
            quantity: 1,
            total_amount: 10.0,
            total_taxable: 9.0,
            total_tax: 1.0,
            kitchen_ticket_number: ticket,
        }
    }

    #[test]
    fn test_dine_in_drops_unticketed_items() {
        let items = vec![item("A", "1", 12), item("B", "1", 0), item("C", "1", 3)];
        let billable = select_billable_items(&items, FulfillmentType::DineIn);
        let skus: Vec<&str> = billable.iter().map(|i| i.sku_code.as_str()).collect();
        assert_eq!(skus, vec!["A", "C"]);
    }

    #[test]
    fn test_non_dine_in_keeps_unticketed_items() {
        let items = vec![item("A", "1", 0), item("B", "1", 7)];
        for ft in [
            FulfillmentType::TakeAway,
            FulfillmentType::DriveThrough,
            FulfillmentType::HomeDelivery,
        ] {
            assert_eq!(select_billable_items(&items, ft).len(), 2);
        }
    }

    #[test]
    fn test_packaging_lines_dropped_for_every_fulfillment_type() {
        let items = vec![
            item("A", "1", 5),
            item("PKG", SEPARATE_PACKAGING_SUB_SKU, 5),
        ];
        for ft in [
            FulfillmentType::DineIn,
            FulfillmentType::TakeAway,
            FulfillmentType::DriveThrough,
            FulfillmentType::HomeDelivery,
        ] {
            let billable = select_billable_items(&items, ft);
            assert_eq!(billable.len(), 1);
            assert_eq!(billable[0].sku_code, "A");
        }
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert!(select_billable_items(&[], FulfillmentType::DineIn).is_empty());
    }
}
