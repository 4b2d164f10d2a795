use axum::{body::Body, response::Response};

#[track_caller]
fn header_value<'a>(response: &'a Response<Body>, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("Headers missing {name}"))
        .to_str()
        .unwrap_or_else(|error| panic!("Header {name} is not valid text: {error}"))
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    assert_eq!(header_value(response, "content-type"), content_type);
}

/// Assert that an HTMX request is sent to `endpoint` after the response.
#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    assert_eq!(header_value(response, "hx-redirect"), endpoint);
}
