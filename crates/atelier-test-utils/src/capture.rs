// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capture dispatcher for deterministic testing.
//!
//! `CaptureDispatcher` implements `OutboundDispatcher` by recording every
//! message for later assertion, with an optional injected failure mode.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use atelier_core::{AtelierError, OutboundDispatcher, OutboundEmail};

/// A mock dispatcher that captures outbound messages.
#[derive(Default)]
pub struct CaptureDispatcher {
    sent: Mutex<Vec<OutboundEmail>>,
    failing: AtomicBool,
}

impl CaptureDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `send()` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All messages passed to `send()` so far.
    pub async fn sent_messages(&self) -> Vec<OutboundEmail> {
        self.sent.lock().await.clone()
    }

    /// Count of captured messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clears captured messages.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl OutboundDispatcher for CaptureDispatcher {
    fn name(&self) -> &str {
        "capture"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), AtelierError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AtelierError::Dispatch {
                message: "injected failure".into(),
                source: None,
            });
        }
        self.sent.lock().await.push(email.clone());
        Ok(())
    }
}
