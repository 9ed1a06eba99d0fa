use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, RequestParts},
    http::{header::HeaderName, HeaderMap},
};

use crate::auth::Principal;

pub const DEFAULT_IDENTITY_HEADER: &str = "x-authenticated-uid";

/// Header set by the upstream authentication layer once it has verified the caller.
#[derive(Debug, Clone)]
pub struct IdentityHeader(pub HeaderName);

impl Default for IdentityHeader {
    fn default() -> Self {
        Self(HeaderName::from_static(DEFAULT_IDENTITY_HEADER))
    }
}

/// The caller of a request, `None` when no verified identity came with it.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<Principal>);

#[async_trait]
impl<B> FromRequest<B> for Caller
where
    B: Send,
{
    type Rejection = Infallible;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let header = req
            .extensions()
            .get::<IdentityHeader>()
            .cloned()
            .unwrap_or_default();

        Ok(Self(principal_from_headers(req.headers(), &header)))
    }
}

pub fn principal_from_headers(headers: &HeaderMap, header: &IdentityHeader) -> Option<Principal> {
    let uid = headers.get(&header.0)?.to_str().ok()?.trim();

    if uid.is_empty() {
        return None;
    }

    Some(Principal::new(uid))
}

#[test]
fn principal_from_header_test() {
    use axum::http::HeaderValue;

    let mut headers = HeaderMap::new();
    headers.insert(DEFAULT_IDENTITY_HEADER, HeaderValue::from_static(" u1 "));

    let principal = principal_from_headers(&headers, &IdentityHeader::default());
    assert_eq!(principal, Some(Principal::new("u1")));
}

#[test]
fn missing_or_blank_header_test() {
    use axum::http::HeaderValue;

    let header = IdentityHeader::default();

    let headers = HeaderMap::new();
    assert_eq!(principal_from_headers(&headers, &header), None);

    let mut headers = HeaderMap::new();
    headers.insert(DEFAULT_IDENTITY_HEADER, HeaderValue::from_static("   "));
    assert_eq!(principal_from_headers(&headers, &header), None);

    let mut headers = HeaderMap::new();
    headers.insert(
        DEFAULT_IDENTITY_HEADER,
        HeaderValue::from_bytes(&[0xfa, 0xfb]).unwrap(),
    );
    assert_eq!(principal_from_headers(&headers, &header), None);
}

#[test]
fn custom_header_test() {
    use axum::http::HeaderValue;

    let header = IdentityHeader(HeaderName::from_static("x-passenger"));

    let mut headers = HeaderMap::new();
    headers.insert(DEFAULT_IDENTITY_HEADER, HeaderValue::from_static("u1"));
    assert_eq!(principal_from_headers(&headers, &header), None);

    headers.insert("x-passenger", HeaderValue::from_static("u2"));
    assert_eq!(
        principal_from_headers(&headers, &header),
        Some(Principal::new("u2"))
    );
}
