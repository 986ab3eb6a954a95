//! Envelope assertion macros
//!
//! Every response body is an `ApiResult` envelope whose `statusCode` must
//! match the HTTP status.

/// Assert a success envelope with the given status and return its `data`
#[macro_export]
macro_rules! assert_success {
    ($response:expr, $status:expr) => {{
        let response = &$response;
        let body: serde_json::Value = response.json();
        assert_eq!(
            response.status_code().as_u16(),
            $status,
            "unexpected status, body: {body}"
        );
        assert_eq!(body["success"], serde_json::json!(true), "body: {body}");
        assert_eq!(body["statusCode"], serde_json::json!($status));
        body["data"].clone()
    }};
}

/// Assert a failure envelope with the given status and error payload
#[macro_export]
macro_rules! assert_failure {
    ($response:expr, $status:expr, $error:expr) => {{
        let response = &$response;
        let body: serde_json::Value = response.json();
        assert_eq!(
            response.status_code().as_u16(),
            $status,
            "unexpected status, body: {body}"
        );
        assert_eq!(
            body,
            serde_json::json!({
                "success": false,
                "data": null,
                "error": $error,
                "statusCode": $status,
            })
        );
    }};
}
