//! Property-based tests for the result envelope

use blog_api::shared::{ApiResult, ApplicationException, ErrorKind, ErrorPayload};
use proptest::prelude::*;

fn any_kind() -> impl Strategy<Value = ErrorKind> {
    proptest::sample::select(ErrorKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_error_status_follows_kind(kind in any_kind(), message in "[a-zA-Z ]{1,40}") {
        let result = ApiResult::<()>::error_with(kind, message.as_str());
        prop_assert_eq!(result.status_code(), kind.status_code());
        prop_assert!(!result.is_success());
    }

    #[test]
    fn test_messages_keep_order(messages in proptest::collection::vec("[a-z]{1,12}", 2..6)) {
        let exception = ApplicationException::new(messages.clone(), ErrorKind::ValidationError);
        prop_assert_eq!(exception.get_messages(), ErrorPayload::Many(messages));
    }

    #[test]
    fn test_out_of_range_status_is_unknown(status in prop_oneof![0u16..400, 600u16..1000]) {
        let result = ApiResult::<()>::from_messages("Falha", Some(status));
        prop_assert_eq!(result, ApiResult::unknown());
    }

    #[test]
    fn test_envelope_json_shape(kind in any_kind()) {
        let json = serde_json::to_value(ApiResult::<()>::error(kind)).unwrap();
        prop_assert_eq!(&json["success"], &serde_json::json!(false));
        prop_assert!(json["data"].is_null());
        prop_assert_eq!(&json["error"], &serde_json::json!(kind.default_message()));
        prop_assert_eq!(&json["statusCode"], &serde_json::json!(kind.status_code()));
    }
}
