//! Property-based tests for pagination

use blog_api::shared::blog::pagination::MAX_LIMIT;
use blog_api::shared::blog::{Page, Pagination, PaginationQuery};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_window_is_always_in_range(page in any::<u32>(), limit in any::<u32>()) {
        let pagination = Pagination::new(page, limit);
        prop_assert!(pagination.page >= 1);
        prop_assert!((1..=MAX_LIMIT).contains(&pagination.limit));
        prop_assert!(pagination.offset() >= 0);
    }

    #[test]
    fn test_total_pages_cover_total(total in 0i64..1_000_000, limit in 1u32..=100) {
        let page = Page::<()>::new(Vec::new(), Pagination::new(1, limit), total);
        let limit = i64::from(limit);

        prop_assert!(page.total_pages * limit >= total);
        prop_assert!(page.total_pages == 0 || (page.total_pages - 1) * limit < total);
    }

    #[test]
    fn test_positive_numbers_are_accepted(page in 1u32..10_000, limit in 1u32..1_000) {
        let query = PaginationQuery {
            page: Some(page.to_string()),
            limit: Some(format!(" {limit} ")),
        };
        let pagination = query.validate().unwrap();

        prop_assert_eq!(pagination.page, page);
        prop_assert_eq!(pagination.limit, limit.min(MAX_LIMIT));
    }

    #[test]
    fn test_non_numeric_page_is_rejected(page in "[a-z]{1,8}") {
        let query = PaginationQuery { page: Some(page), limit: None };
        let errors = query.validate().unwrap_err();
        prop_assert_eq!(errors.messages(), vec!["page deve ser um número inteiro positivo".to_string()]);
    }
}
