//! Tests for the run module.

use super::*;
use embed_hook::config::Cli;
use embed_hook::webhook::DeliveryError;
use http::StatusCode;
use std::sync::Mutex;
use url::Url;

fn make_config(extra: &[&str]) -> ValidatedConfig {
    let mut args = vec![
        "embed-hook",
        "--url",
        "https://discord.com/api/webhooks/1/token",
        "--title",
        "Release",
    ];
    args.extend_from_slice(extra);
    let cli = Cli::parse_from_iter(args);
    ValidatedConfig::from_raw(&cli, None).unwrap()
}

/// Records what it was asked to send and answers with a scripted outcome.
struct MockSender {
    sent: Mutex<Vec<(Payload, Url)>>,
    reject_with: Option<StatusCode>,
}

impl MockSender {
    fn accepting() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_with: None,
        }
    }

    fn rejecting(status: StatusCode) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_with: Some(status),
        }
    }

    fn sent(&self) -> Vec<(Payload, Url)> {
        self.sent.lock().unwrap().clone()
    }
}

impl EmbedSender for MockSender {
    async fn send(&self, payload: &Payload, url: &Url) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((payload.clone(), url.clone()));
        match self.reject_with {
            Some(status) => Err(DeliveryError::Status { status, body: None }),
            None => Ok(()),
        }
    }
}

mod run_error {
    use super::*;

    #[test]
    fn delivery_error_is_transparent() {
        let error = RunError::from(DeliveryError::Status {
            status: StatusCode::FORBIDDEN,
            body: None,
        });
        assert_eq!(error.to_string(), "Error posting webhook: 403 Forbidden");
    }

    #[test]
    fn client_error_displays_source() {
        let error = RunError::Client(HttpError::Timeout);
        assert!(error.to_string().starts_with("Failed to create HTTP client"));
    }
}

mod deliver {
    use super::*;

    #[tokio::test]
    async fn sends_configured_payload_to_configured_url() {
        let config = make_config(&["--color", "#ff0000"]);
        let sender = MockSender::accepting();

        deliver(&sender, &config).await.unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, config.payload);
        assert_eq!(sent[0].1, config.url);
    }

    #[tokio::test]
    async fn rejection_becomes_delivery_error() {
        let config = make_config(&[]);
        let sender = MockSender::rejecting(StatusCode::BAD_REQUEST);

        let result = deliver(&sender, &config).await;

        assert!(matches!(
            result,
            Err(RunError::Delivery(DeliveryError::Status { status, .. }))
                if status == StatusCode::BAD_REQUEST
        ));
    }
}

mod execute {
    use super::*;

    #[tokio::test]
    async fn dry_run_does_not_touch_the_network() {
        // The URL host is unroutable; a real send would fail.
        let cli = Cli::parse_from_iter([
            "embed-hook",
            "--url",
            "http://invalid.invalid/hook",
            "--dry-run",
        ]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert!(execute(config).await.is_ok());
    }
}

mod render {
    use super::*;

    #[test]
    fn renders_pretty_json() {
        let mut payload = Payload::new("Title", "Body", "");
        payload.add_field("Version", "1.2.3", true).unwrap();

        let rendered = render_payload(&payload).unwrap();

        assert!(rendered.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["embeds"][0]["title"], "Title");
        assert_eq!(value["embeds"][0]["fields"][0]["inline"], true);
    }

    #[test]
    fn renders_empty_payload_with_embeds_key() {
        let rendered = render_payload(&Payload::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value, serde_json::json!({ "embeds": [] }));
    }
}
