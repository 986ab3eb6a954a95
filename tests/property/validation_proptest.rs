//! Property-based tests for field validation helpers

use blog_api::shared::validation::{is_email, length_between, require_uuid, ValidationErrors};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_simple_addresses_are_emails(local in "[a-z0-9.]{1,16}", host in "[a-z]{1,12}", tld in "[a-z]{2,4}") {
        let address = format!("{local}@{host}.{tld}");
        prop_assert!(is_email(&address));
    }

    #[test]
    fn test_whitespace_is_never_an_email(before in "[a-z]{1,8}", after in "[a-z]{1,8}") {
        let address = format!("{before} {after}@example.com");
        prop_assert!(!is_email(&address));
    }

    #[test]
    fn test_length_counts_characters(count in 0usize..40) {
        let text = "ç".repeat(count);
        prop_assert!(length_between(&text, count, count));
    }

    #[test]
    fn test_require_uuid_accepts_any_uuid(bytes in any::<[u8; 16]>()) {
        let id = uuid::Uuid::from_bytes(bytes);
        let mut errors = ValidationErrors::new();

        let parsed = require_uuid(&mut errors, "id", Some(id.to_string().as_str()), "ID");

        prop_assert_eq!(parsed, Some(id));
        prop_assert!(errors.is_empty());
    }
}
