//! Tests for `ReqwestClient`.
//!
//! Construction and error mapping, plus full deliveries against a local
//! HTTP/1.1 server that replays canned responses.

use super::*;
use std::time::Duration;

mod reqwest_client {
    use super::*;

    #[test]
    fn new_and_default_are_constructible() {
        let client1 = ReqwestClient::new();
        let client2 = ReqwestClient::default();

        assert!(format!("{client1:?}").contains("ReqwestClient"));
        assert!(format!("{client2:?}").contains("ReqwestClient"));
    }

    #[test]
    fn with_timeout_builds_client() {
        let client = ReqwestClient::with_timeout(Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[test]
    fn from_client_accepts_custom_client() {
        let custom = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        let client = ReqwestClient::from_client(custom);

        let _ = format!("{client:?}");
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_to_invalid_host_returns_error_or_proxy_response() {
        let client = ReqwestClient::new();
        let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();
        let req = HttpRequest::post(url).with_body(b"{}".to_vec());

        let result = client.request(req).await;

        // Behind a proxy, DNS failure may surface as a gateway error response.
        match result {
            Err(HttpError::Connection(_) | HttpError::Timeout) => {}
            Ok(resp) if !resp.is_delivered() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }
}

mod end_to_end {
    use super::*;
    use crate::embed::Payload;
    use ::http::StatusCode;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;
    use url::Url;

    const NO_CONTENT: &str = "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n";
    const OK: &str = "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
    const RATE_LIMITED: &str = "HTTP/1.1 429 Too Many Requests\r\n\
        X-RateLimit-Remaining: 0\r\n\
        X-RateLimit-Reset-After: 0.05\r\n\
        Content-Length: 0\r\n\
        Connection: close\r\n\r\n";
    const FORBIDDEN: &str = "HTTP/1.1 403 Forbidden\r\n\
        Content-Type: text/plain\r\n\
        Content-Length: 9\r\n\
        Connection: close\r\n\r\nforbidden";

    /// One request as seen by the server. Header names are lowercased.
    #[derive(Debug)]
    struct Received {
        head: String,
        body: Vec<u8>,
    }

    impl Received {
        fn header(&self, name: &str) -> Option<&str> {
            self.head.lines().find_map(|line| {
                let (key, value) = line.split_once(':')?;
                (key.trim() == name).then_some(value.trim())
            })
        }
    }

    async fn read_request(stream: &mut TcpStream) -> Received {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let head_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the request head");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
        let content_length: usize = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map_or(0, |v| v.trim().parse().unwrap());

        while buf.len() < head_end + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the request body");
            buf.extend_from_slice(&chunk[..n]);
        }

        Received {
            head,
            body: buf[head_end..head_end + content_length].to_vec(),
        }
    }

    /// Serves one connection per reply, in order, then stops listening.
    async fn serve(replies: Vec<&'static str>) -> (Url, JoinHandle<Vec<Received>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let url = Url::parse(&format!("http://{addr}/api/webhooks/1/token")).unwrap();

        let handle = tokio::spawn(async move {
            let mut received = Vec::new();
            for reply in replies {
                let (mut stream, _) = listener.accept().await.unwrap();
                received.push(read_request(&mut stream).await);
                stream.write_all(reply.as_bytes()).await.unwrap();
                let _ = stream.shutdown().await;
            }
            received
        });

        (url, handle)
    }

    fn client() -> ReqwestClient {
        let inner = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        ReqwestClient::from_client(inner)
    }

    fn payload() -> Payload {
        let mut payload = Payload::new("Deploy", "finished", "");
        payload.add_field("Branch", "main", true).unwrap();
        payload
    }

    #[tokio::test]
    async fn response_maps_status_headers_and_body() {
        let (url, server) = serve(vec![FORBIDDEN]).await;

        let request = HttpRequest::post(url).with_body(b"{}".to_vec());
        let response = client().request(request).await.unwrap();

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.body_text(), Some("forbidden"));
        assert_eq!(
            response.headers.get("content-type").unwrap().to_str().unwrap(),
            "text/plain"
        );
        assert_eq!(server.await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn mixed_case_rate_limit_headers_are_read() {
        let (url, server) = serve(vec![RATE_LIMITED]).await;

        let request = HttpRequest::post(url).with_body(b"{}".to_vec());
        let response = client().request(request).await.unwrap();
        let limits = RateLimitHeaders::from_headers(&response.headers);

        assert!(response.is_rate_limited());
        assert_eq!(limits.remaining, Some(0));
        assert_eq!(limits.reset_after, Some(0.05));
        assert_eq!(limits.pause(), Duration::from_millis(50));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn no_content_is_delivered_with_one_post() {
        let (url, server) = serve(vec![NO_CONTENT]).await;
        let payload = payload();

        HttpWebhook::new(client())
            .send(&payload, &url)
            .await
            .unwrap();

        let received = server.await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].head.starts_with("post /api/webhooks/1/token "));
        assert_eq!(received[0].header("content-type"), Some("application/json"));
        assert_eq!(received[0].body, payload.to_json().unwrap());
    }

    #[tokio::test]
    async fn rate_limit_pauses_then_delivers_with_two_posts() {
        let (url, server) = serve(vec![RATE_LIMITED, OK]).await;
        let payload = payload();

        let start = Instant::now();
        HttpWebhook::new(client())
            .send(&payload, &url)
            .await
            .unwrap();
        let elapsed = start.elapsed();

        let received = server.await.unwrap();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].body, received[1].body);
        assert!(
            received
                .iter()
                .all(|r| r.header("content-type") == Some("application/json"))
        );
        assert!(elapsed >= Duration::from_millis(50), "elapsed {elapsed:?}");
    }

    #[tokio::test]
    async fn forbidden_is_terminal_after_one_post() {
        let (url, server) = serve(vec![FORBIDDEN]).await;

        let result = HttpWebhook::new(client()).send(&payload(), &url).await;

        match result {
            Err(DeliveryError::Status { status, body }) => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(body.as_deref(), Some("forbidden"));
            }
            other => panic!("expected terminal status error, got {other:?}"),
        }
        assert_eq!(server.await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn terminal_error_message_is_status_line() {
        let (url, server) = serve(vec![FORBIDDEN]).await;

        let error = HttpWebhook::new(client())
            .send(&payload(), &url)
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Error posting webhook: 403 Forbidden");
        server.await.unwrap();
    }
}
