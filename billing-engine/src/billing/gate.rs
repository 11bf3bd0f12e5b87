//! Customer-info gate - when contact data must be collected before finalizing

use shared::FulfillmentType;

/// Whether customer contact data must be collected before finalization
///
/// Only takeaway orders gate, and only when no phone number is on file -
/// neither pre-supplied on the order nor previously entered this sequence.
/// Dine-in and delivery orders proceed directly.
pub fn requires_customer_info(fulfillment: FulfillmentType, existing_phone: Option<&str>) -> bool {
    if fulfillment != FulfillmentType::TakeAway {
        return false;
    }
    existing_phone.is_none_or(|phone| phone.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takeaway_without_phone_gates() {
        assert!(requires_customer_info(FulfillmentType::TakeAway, None));
    }

    #[test]
    fn test_takeaway_with_blank_phone_gates() {
        assert!(requires_customer_info(FulfillmentType::TakeAway, Some("")));
        assert!(requires_customer_info(FulfillmentType::TakeAway, Some("   ")));
    }

    #[test]
    fn test_takeaway_with_known_phone_short_circuits() {
        assert!(!requires_customer_info(
            FulfillmentType::TakeAway,
            Some("612345678")
        ));
    }

    #[test]
    fn test_other_fulfillment_types_never_gate() {
        for ft in [
            FulfillmentType::DineIn,
            FulfillmentType::DriveThrough,
            FulfillmentType::HomeDelivery,
        ] {
            assert!(!requires_customer_info(ft, None));
            assert!(!requires_customer_info(ft, Some("612345678")));
        }
    }
}
