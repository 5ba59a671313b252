// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google People implementation of the contacts directory.
//!
//! Search-by-email then create-if-absent. The membership label travels as
//! a user-defined field so the directory side can filter without group
//! plumbing. Invoked best-effort by the router; failures are the
//! caller's to log.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use atelier_core::{AtelierError, ContactDirectory, EmailAddress};

use crate::token::TokenCache;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Contacts directory backed by the Google People API.
pub struct GoogleContacts {
    client: reqwest::Client,
    token: Arc<TokenCache>,
    base_url: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

impl GoogleContacts {
    pub fn new(token: Arc<TokenCache>, base_url: &str) -> Result<Self, AtelierError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AtelierError::Directory {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn search(&self, bearer: &str, email: &EmailAddress) -> Result<bool, AtelierError> {
        let url = format!("{}/v1/people:searchContacts", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(bearer)
            .query(&[("query", email.as_str()), ("readMask", "emailAddresses")])
            .send()
            .await
            .map_err(|e| AtelierError::Directory {
                message: format!("contact search failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AtelierError::Directory {
                message: format!("contact search returned {status}: {body}"),
                source: None,
            });
        }

        let found: SearchResponse =
            response.json().await.map_err(|e| AtelierError::Directory {
                message: format!("malformed search response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(!found.results.is_empty())
    }

    async fn create(
        &self,
        bearer: &str,
        email: &EmailAddress,
        name: &str,
        label: &str,
    ) -> Result<(), AtelierError> {
        let url = format!("{}/v1/people:createContact", self.base_url);
        let body = serde_json::json!({
            "names": [{ "unstructuredName": name }],
            "emailAddresses": [{ "value": email.as_str() }],
            "userDefined": [{ "key": "membership", "value": label }],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(bearer)
            .json(&body)
            .send()
            .await
            .map_err(|e| AtelierError::Directory {
                message: format!("contact create failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AtelierError::Directory {
                message: format!("contact create returned {status}: {body}"),
                source: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContactDirectory for GoogleContacts {
    async fn upsert(
        &self,
        email: &EmailAddress,
        name: &str,
        label: &str,
    ) -> Result<(), AtelierError> {
        let bearer = self.token.bearer().await.map_err(|e| AtelierError::Directory {
            message: format!("token unavailable: {e}"),
            source: None,
        })?;

        if self.search(&bearer, email).await? {
            debug!(email = %email, "contact already present, leaving as-is");
            return Ok(());
        }
        self.create(&bearer, email, name, label).await
    }
}
