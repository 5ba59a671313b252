// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Resend transactional email API.
//!
//! Composes the JSON send payload, carries arbitrary extra headers
//! (required for `Auto-Submitted` on auto-replies), and maps provider
//! failures into [`AtelierError::Dispatch`].

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::debug;

use atelier_core::{AtelierError, OutboundDispatcher, OutboundEmail};

/// Path of the send endpoint below the API base URL.
const SEND_PATH: &str = "/emails";

/// Outbound timeout. The classifier's correctness never depends on this
/// value; a slow provider only delays the invocation.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP dispatcher backed by the Resend API.
#[derive(Debug, Clone)]
pub struct ResendDispatcher {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct SendPayload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<&'a str, &'a str>,
}

impl ResendDispatcher {
    /// Creates a dispatcher with the given API key and base URL.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, AtelierError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer)
                .map_err(|e| AtelierError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| AtelierError::Dispatch {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl OutboundDispatcher for ResendDispatcher {
    fn name(&self) -> &str {
        "resend"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), AtelierError> {
        let payload = SendPayload {
            from: &email.sender,
            to: &email.to,
            subject: &email.subject,
            text: &email.text,
            html: email.html.as_deref(),
            reply_to: email.reply_to.as_deref(),
            headers: email
                .extra_headers
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
        };

        let url = format!("{}{}", self.base_url, SEND_PATH);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AtelierError::Dispatch {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, to = ?email.to, "send response received");

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AtelierError::Dispatch {
            message: format!("provider returned {status}: {body}"),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_email() -> OutboundEmail {
        OutboundEmail {
            to: vec!["jane@example.com".into()],
            sender: "atelier@heerawalla.com".into(),
            reply_to: Some("atelier@heerawalla.com".into()),
            subject: "Heerawalla - Your request has been received".into(),
            text: "Thank you for contacting Heerawalla.".into(),
            html: None,
            extra_headers: vec![("Auto-Submitted".into(), "auto-replied".into())],
        }
    }

    #[tokio::test]
    async fn send_posts_expected_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test_123"))
            .and(body_partial_json(serde_json::json!({
                "from": "atelier@heerawalla.com",
                "to": ["jane@example.com"],
                "subject": "Heerawalla - Your request has been received",
                "reply_to": "atelier@heerawalla.com",
                "headers": { "Auto-Submitted": "auto-replied" },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "email_1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = ResendDispatcher::new("re_test_123", &server.uri()).unwrap();
        dispatcher.send(&test_email()).await.unwrap();
    }

    #[tokio::test]
    async fn send_surfaces_provider_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_string("invalid recipient"))
            .mount(&server)
            .await;

        let dispatcher = ResendDispatcher::new("re_test_123", &server.uri()).unwrap();
        let err = dispatcher.send(&test_email()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("422"), "got: {msg}");
    }

    #[tokio::test]
    async fn empty_extra_headers_are_omitted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "email_2"
            })))
            .mount(&server)
            .await;

        let mut email = test_email();
        email.extra_headers.clear();
        let dispatcher = ResendDispatcher::new("re_test_123", &server.uri()).unwrap();
        dispatcher.send(&email).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("headers").is_none());
        assert!(body.get("html").is_none());
    }
}
