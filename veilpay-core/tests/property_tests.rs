//! Property-based tests for veilpay-core
//!
//! Uses proptest to verify the split arithmetic and the field encoding
//! hold for arbitrary inputs

use proptest::prelude::*;

use veilpay_core::view::matches_search;
use veilpay_core::{Commitment, FieldHex, TransferRequest};

proptest! {
    /// Any in-range split conserves value and both outputs decode back
    /// to their original integers
    #[test]
    fn test_split_conserves_value(
        v1 in 0..=u64::MAX as u128,
        v2 in 0..=u64::MAX as u128,
        seed in any::<u128>()
    ) {
        let total = v1 + v2;
        let transfer = seed % (total + 1);
        let change = total - transfer;

        let inputs = [
            Commitment::new(v1.to_string(), "0xaa", "0x01", "alice"),
            Commitment::new(v2.to_string(), "0xbb", "0x02", "alice"),
        ];
        let request = TransferRequest::new(inputs, transfer, change, "bob".to_string());

        prop_assert_eq!(request.output_commitments[0].value.decode(), Some(transfer));
        prop_assert_eq!(request.output_commitments[1].value.decode(), Some(change));

        let outputs: u128 = request
            .output_commitments
            .iter()
            .map(|o| o.value.decode().unwrap())
            .sum();
        prop_assert_eq!(outputs, total);
    }

    /// The field encoding is always "0x" + exactly 32 lowercase hex
    /// digits, and round-trips
    #[test]
    fn test_field_hex_shape(value in any::<u128>()) {
        let encoded = FieldHex::encode(Some(value));
        let text = encoded.as_str();

        prop_assert_eq!(text.len(), 34);
        prop_assert!(text.starts_with("0x"));
        prop_assert!(text[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        prop_assert_eq!(encoded.decode(), Some(value));
    }

    /// The search matcher never panics and always matches a value
    /// against its own rendering
    #[test]
    fn test_search_matches_own_value(value in any::<u128>(), term in "\\PC*") {
        let commitment = Commitment::new(value.to_string(), "0xaa", "0x01", "alice");

        matches_search(&term, Some(&commitment));
        matches_search(&term, None);

        prop_assert!(matches_search(&value.to_string(), Some(&commitment)));
    }
}
