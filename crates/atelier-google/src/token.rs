// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached OAuth access token with a simple init/expire/refresh lifecycle.
//!
//! The cache is read-checked-then-used with a time-based expiry margin.
//! Concurrent invocations under a cold cache may each trigger a redundant
//! refresh; that duplicates one HTTP call and nothing else, so it is
//! documented rather than locked away.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use atelier_core::AtelierError;

/// Tokens within this margin of expiry are treated as already expired.
const EXPIRY_MARGIN_SECS: i64 = 60;

const REFRESH_TIMEOUT: Duration = Duration::from_secs(15);

/// OAuth credentials for the refresh-token grant.
#[derive(Debug, Clone)]
pub struct OauthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub token_url: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Process-wide cached access token owned by the token-refresh component.
pub struct TokenCache {
    client: reqwest::Client,
    credentials: OauthCredentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(credentials: OauthCredentials) -> Result<Self, AtelierError> {
        let client = reqwest::Client::builder()
            .timeout(REFRESH_TIMEOUT)
            .build()
            .map_err(|e| AtelierError::Auth {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            credentials,
            cached: Mutex::new(None),
        })
    }

    /// Returns a currently valid access token, refreshing when the cache
    /// is cold or inside the expiry margin.
    pub async fn bearer(&self) -> Result<String, AtelierError> {
        {
            let cached = self.cached.lock().await;
            if let Some(token) = cached.as_ref() {
                if Utc::now() + chrono::TimeDelta::seconds(EXPIRY_MARGIN_SECS) < token.expires_at {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let fresh = self.refresh().await?;
        let access_token = fresh.access_token.clone();
        *self.cached.lock().await = Some(fresh);
        Ok(access_token)
    }

    async fn refresh(&self) -> Result<CachedToken, AtelierError> {
        debug!("refreshing Google access token");
        let response = self
            .client
            .post(&self.credentials.token_url)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("refresh_token", self.credentials.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AtelierError::Auth {
                message: format!("token refresh request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AtelierError::Auth {
                message: format!("token endpoint returned {status}: {body}"),
                source: None,
            });
        }

        let token: TokenResponse =
            response.json().await.map_err(|e| AtelierError::Auth {
                message: format!("malformed token response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Utc::now() + chrono::TimeDelta::seconds(token.expires_in),
        })
    }
}
