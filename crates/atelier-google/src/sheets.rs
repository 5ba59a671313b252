// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Sheets implementation of the tabular ledger.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use atelier_core::types::LedgerKind;
use atelier_core::{AtelierError, TabularLedger};

use crate::token::TokenCache;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Per-sheet spreadsheet ids; a `None` disables that ledger kind.
#[derive(Debug, Clone, Default)]
pub struct SheetIds {
    pub orders: Option<String>,
    pub quotes: Option<String>,
    pub contacts: Option<String>,
}

/// Append-only row store backed by the Sheets values API.
pub struct SheetsLedger {
    client: reqwest::Client,
    token: Arc<TokenCache>,
    base_url: String,
    sheet_ids: SheetIds,
}

impl SheetsLedger {
    pub fn new(
        token: Arc<TokenCache>,
        base_url: &str,
        sheet_ids: SheetIds,
    ) -> Result<Self, AtelierError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AtelierError::Ledger {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            sheet_ids,
        })
    }

    fn sheet_id(&self, kind: LedgerKind) -> Result<&str, AtelierError> {
        let id = match kind {
            LedgerKind::Orders => self.sheet_ids.orders.as_deref(),
            LedgerKind::Quotes => self.sheet_ids.quotes.as_deref(),
            LedgerKind::Contacts => self.sheet_ids.contacts.as_deref(),
        };
        id.ok_or_else(|| AtelierError::Ledger {
            message: format!("no spreadsheet configured for {kind} ledger"),
            source: None,
        })
    }
}

#[async_trait]
impl TabularLedger for SheetsLedger {
    async fn append(&self, kind: LedgerKind, row: Vec<String>) -> Result<(), AtelierError> {
        let sheet_id = self.sheet_id(kind)?;
        let bearer = self.token.bearer().await.map_err(|e| AtelierError::Ledger {
            message: format!("token unavailable: {e}"),
            source: None,
        })?;

        let url = format!(
            "{}/v4/spreadsheets/{}/values/A1:append",
            self.base_url, sheet_id
        );
        let body = serde_json::json!({ "values": [row] });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&bearer)
            .query(&[("valueInputOption", "RAW")])
            .json(&body)
            .send()
            .await
            .map_err(|e| AtelierError::Ledger {
                message: format!("row append failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, kind = %kind, "ledger append response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AtelierError::Ledger {
                message: format!("sheets API returned {status}: {body}"),
                source: None,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::OauthCredentials;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_token(server: &MockServer) -> Arc<TokenCache> {
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.test",
                "expires_in": 3600
            })))
            .mount(server)
            .await;
        Arc::new(
            TokenCache::new(OauthCredentials {
                client_id: "cid".into(),
                client_secret: "secret".into(),
                refresh_token: "rt".into(),
                token_url: format!("{}/token", server.uri()),
            })
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn append_posts_row_to_configured_sheet() {
        let server = MockServer::start().await;
        let token = mock_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets/sheet-1/values/A1:append"))
            .and(query_param("valueInputOption", "RAW"))
            .and(body_partial_json(serde_json::json!({
                "values": [["2026-02-03", "QR7T2K", "jane@example.com"]]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let ledger = SheetsLedger::new(
            token,
            &server.uri(),
            SheetIds {
                contacts: Some("sheet-1".into()),
                ..SheetIds::default()
            },
        )
        .unwrap();

        ledger
            .append(
                LedgerKind::Contacts,
                vec!["2026-02-03".into(), "QR7T2K".into(), "jane@example.com".into()],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unconfigured_kind_errors_without_http() {
        let server = MockServer::start().await;
        let token = mock_token(&server).await;

        let ledger = SheetsLedger::new(token, &server.uri(), SheetIds::default()).unwrap();
        let err = ledger.append(LedgerKind::Orders, vec![]).await.unwrap_err();
        assert!(err.to_string().contains("orders"), "got: {err}");
    }
}
