//! Tests for HTTP request/response types.

use super::{HttpRequest, HttpResponse};

fn response(status: u16) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        http::HeaderMap::new(),
        Vec::new(),
    )
}

mod http_request {
    use super::*;

    #[test]
    fn post_creates_empty_post_request() {
        let url = url::Url::parse("https://example.com/hook").unwrap();
        let req = HttpRequest::post(url.clone());

        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.url, url);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn with_body_sets_body() {
        let url = url::Url::parse("https://example.com/").unwrap();
        let req = HttpRequest::post(url).with_body(b"{}".to_vec());

        assert_eq!(req.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn with_header_replaces_previous_value() {
        let url = url::Url::parse("https://example.com/").unwrap();
        let req = HttpRequest::post(url)
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("text/plain"),
            )
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );

        let values: Vec<_> = req
            .headers
            .get_all(http::header::CONTENT_TYPE)
            .iter()
            .collect();
        assert_eq!(values, ["application/json"]);
    }
}

mod http_response {
    use super::*;

    #[test]
    fn delivered_covers_200_through_204() {
        for status in 200..=204 {
            assert!(response(status).is_delivered(), "{status} should be delivered");
        }
    }

    #[test]
    fn other_2xx_are_not_delivered() {
        for status in [205, 206, 226] {
            assert!(!response(status).is_delivered(), "{status} should not be delivered");
        }
    }

    #[test]
    fn rate_limited_only_for_429() {
        assert!(response(429).is_rate_limited());
        assert!(!response(503).is_rate_limited());
        assert!(!response(200).is_rate_limited());
    }

    #[test]
    fn body_text_returns_utf8() {
        let resp = HttpResponse::new(
            http::StatusCode::BAD_REQUEST,
            http::HeaderMap::new(),
            br#"{"message":"Cannot send an empty message"}"#.to_vec(),
        );

        assert_eq!(
            resp.body_text(),
            Some(r#"{"message":"Cannot send an empty message"}"#)
        );
    }

    #[test]
    fn body_text_is_none_for_empty_or_invalid_utf8() {
        assert_eq!(response(204).body_text(), None);

        let resp = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            vec![0xff, 0xfe],
        );
        assert_eq!(resp.body_text(), None);
    }
}
