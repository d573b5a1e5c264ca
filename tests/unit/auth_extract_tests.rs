//! Unit tests for launch-URL credential extraction.

use drop_farmer::auth::extract_auth_from_url;
use drop_farmer::AppError;

#[test]
fn extracts_payload_from_fragment() {
    let url = "https://web.telegram.org/k/#tgWebAppData=abc123&tgWebAppVersion=7.8";
    let payload = extract_auth_from_url(url).unwrap();
    assert_eq!(payload, "abc123");
}

#[test]
fn decodes_percent_encoded_payload() {
    let url = "https://t.me/app#tgWebAppData=query_id%3DAAF%26auth_date%3D1730000000";
    let payload = extract_auth_from_url(url).unwrap();
    assert_eq!(payload, "query_id=AAF&auth_date=1730000000");
}

#[test]
fn param_position_in_fragment_does_not_matter() {
    let url = "https://t.me/app#tgWebAppVersion=7.8&tgWebAppData=abc123";
    assert_eq!(extract_auth_from_url(url).unwrap(), "abc123");
}

#[test]
fn missing_fragment_is_extraction_error() {
    let err = extract_auth_from_url("https://example.com/path").unwrap_err();
    assert!(matches!(err, AppError::Extraction(_)));
}

#[test]
fn fragment_without_param_is_extraction_error() {
    let err = extract_auth_from_url("https://example.com/#tgWebAppVersion=7.8").unwrap_err();
    assert!(matches!(err, AppError::Extraction(_)));
}

#[test]
fn empty_param_is_extraction_error() {
    let err = extract_auth_from_url("https://example.com/#tgWebAppData=").unwrap_err();
    assert!(matches!(err, AppError::Extraction(_)));
}

#[test]
fn malformed_url_is_extraction_error_not_panic() {
    let err = extract_auth_from_url("not a url at all").unwrap_err();
    assert!(matches!(err, AppError::Extraction(_)));
    assert!(err.to_string().starts_with("extraction:"));
}

#[test]
fn query_string_param_does_not_count() {
    // The credential must travel in the fragment, not the query string.
    let err = extract_auth_from_url("https://example.com/?tgWebAppData=abc#other=1").unwrap_err();
    assert!(matches!(err, AppError::Extraction(_)));
}
