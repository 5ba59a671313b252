// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The routing orchestrator: executes the classification decision against
//! the stores and the outbound dispatcher.
//!
//! Every inbound message resolves to exactly one terminal outcome. The
//! primary send for that outcome may fail (logged at error level and
//! swallowed so the mail transport never sees a hard failure); side
//! channels (rejects copy, directory sync, ledger append) are best-effort
//! and can never change the routed outcome.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use atelier_core::{
    ClassifiedEmail, ContactDirectory, CorrelationId, InboundEmail, KeyValueStore,
    OutboundDispatcher, OutboundEmail, TabularLedger,
};
use atelier_core::types::LedgerKind;
use atelier_mail::{decode_message, extract_reply, strip_reply_prefixes, with_correlation_tag};
use atelier_store::queries::{ack, origin, summary};
use atelier_store::{OriginRecord, RequestSummary};

use crate::classify::{Classification, SkipReason, classify};
use crate::config::RouterConfig;
use crate::templates;

/// Terminal outcome of processing one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Dropped without any action (unroutable input or missing thread
    /// state for an internal reply).
    Dropped(DropReason),
    /// Deliberately skipped: no-reply sink or auto/bulk mail.
    Skipped(SkipReason),
    /// Staff reply routed back to the thread's customer.
    InternalReply { correlation_id: CorrelationId },
    /// Unroutable external mail answered with the reject auto-reply.
    Rejected,
    /// Customer reply forwarded to the internal mailbox.
    ForwardAccepted {
        correlation_id: CorrelationId,
        /// True when the acknowledgment was sent by this invocation
        /// (false when the gate already held the key or acks are off).
        acknowledged: bool,
    },
}

/// Why a message was dropped with no outbound mail at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Empty From header or invalid sender address.
    Unroutable,
    /// Internal reply referencing an expired or unknown thread.
    MissingOrigin,
}

/// Routes inbound messages. One instance per process; each call to
/// [`Router::handle`] is an independent, stateless invocation.
pub struct Router {
    config: RouterConfig,
    dispatcher: Arc<dyn OutboundDispatcher>,
    kv: Arc<dyn KeyValueStore>,
    directory: Option<Arc<dyn ContactDirectory>>,
    ledger: Option<Arc<dyn TabularLedger>>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("has_directory", &self.directory.is_some())
            .field("has_ledger", &self.ledger.is_some())
            .finish_non_exhaustive()
    }
}

impl Router {
    pub fn new(
        config: RouterConfig,
        dispatcher: Arc<dyn OutboundDispatcher>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config,
            dispatcher,
            kv,
            directory: None,
            ledger: None,
        }
    }

    /// Attaches the best-effort contacts directory.
    pub fn with_directory(mut self, directory: Arc<dyn ContactDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Attaches the best-effort spreadsheet ledger.
    pub fn with_ledger(mut self, ledger: Arc<dyn TabularLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Processes one inbound message to its terminal outcome.
    ///
    /// Never returns an error: all failure handling is about not sending
    /// the wrong email and logging enough to diagnose after the fact.
    pub async fn handle(&self, inbound: &InboundEmail) -> RouteOutcome {
        let decoded = decode_message(&inbound.raw);

        match classify(&decoded, &inbound.envelope_to, &self.config) {
            Classification::Unroutable(reason) => {
                // Silent abort: there is no caller to notify and no
                // address to answer.
                debug!(?reason, "unroutable inbound message dropped");
                RouteOutcome::Dropped(DropReason::Unroutable)
            }
            Classification::Skip(SkipReason::NoReplySink) => {
                info!("message addressed to no-reply sink, skipping");
                RouteOutcome::Skipped(SkipReason::NoReplySink)
            }
            Classification::Skip(SkipReason::AutoOrBulk) => {
                // Terminal, and deliberately content-free in the log.
                info!("auto-generated or bulk message, skipping");
                RouteOutcome::Skipped(SkipReason::AutoOrBulk)
            }
            Classification::Classified(email) => self.route(inbound, email).await,
        }
    }

    async fn route(&self, inbound: &InboundEmail, email: ClassifiedEmail) -> RouteOutcome {
        // Every external email carrying an ID refreshes the Origin
        // Record so the customer's latest reply-from address stays
        // current. Internal senders never touch it.
        if let Some(id) = &email.correlation_id {
            if !email.is_internal_sender {
                let record = OriginRecord {
                    email: email.sender.to_string(),
                    name: email.sender_name.clone(),
                };
                if let Err(e) = origin::record_origin(self.kv.as_ref(), id, &record).await {
                    warn!(correlation_id = %id, error = %e, "origin record refresh failed");
                }
            }
        }

        if email.is_internal_sender {
            if let Some(id) = email.correlation_id.clone() {
                return self.route_internal_reply(&email, id).await;
            }
        }

        if email.is_forwarded {
            return self.route_reject(inbound, &email).await;
        }
        let Some(id) = email.correlation_id.clone() else {
            return self.route_reject(inbound, &email).await;
        };

        self.route_forward_accepted(&email, id).await
    }

    /// Staff reply: look up the thread's customer and send them the
    /// extracted reply body. Never guesses a recipient.
    async fn route_internal_reply(
        &self,
        email: &ClassifiedEmail,
        id: CorrelationId,
    ) -> RouteOutcome {
        let origin = match origin::lookup_origin(self.kv.as_ref(), &id).await {
            Ok(Some(origin)) => origin,
            Ok(None) => {
                warn!(correlation_id = %id, "no origin record for internal reply, cannot route");
                return RouteOutcome::Dropped(DropReason::MissingOrigin);
            }
            Err(e) => {
                warn!(correlation_id = %id, error = %e, "origin lookup failed, cannot route");
                return RouteOutcome::Dropped(DropReason::MissingOrigin);
            }
        };

        let reply = extract_reply(&email.body);
        let outbound = OutboundEmail {
            to: vec![origin.email.clone()],
            sender: self.config.outbound_address.clone(),
            reply_to: Some(self.config.reply_to.clone()),
            subject: with_correlation_tag(&email.subject, &id),
            text: reply.text,
            html: None,
            extra_headers: Vec::new(),
        };

        info!(
            correlation_id = %id,
            to = %origin.email,
            trimmed = reply.trimmed,
            "routing internal reply to thread origin"
        );
        if let Err(e) = self.dispatcher.send(&outbound).await {
            error!(correlation_id = %id, error = %e, "internal reply dispatch failed");
        }
        RouteOutcome::InternalReply { correlation_id: id }
    }

    /// External mail with no usable thread: best-effort raw copy to the
    /// rejects mailbox, then the "please submit via the website"
    /// auto-reply (marked Auto-Submitted to break autoresponder loops).
    async fn route_reject(&self, inbound: &InboundEmail, email: &ClassifiedEmail) -> RouteOutcome {
        if let Some(rejects_to) = &self.config.forward_rejects_to {
            let copy = OutboundEmail {
                to: vec![rejects_to.clone()],
                sender: self.config.outbound_address.clone(),
                reply_to: None,
                subject: format!("Rejected: {}", email.subject),
                text: inbound.raw.clone(),
                html: None,
                extra_headers: Vec::new(),
            };
            if let Err(e) = self.dispatcher.send(&copy).await {
                warn!(error = %e, "rejects-mailbox copy failed");
            }
        }

        if self.config.send_reject {
            let reject = OutboundEmail {
                to: vec![email.sender.to_string()],
                sender: self.config.outbound_address.clone(),
                reply_to: Some(self.config.reply_to.clone()),
                subject: templates::REJECT_SUBJECT.to_string(),
                text: templates::reject_text(),
                html: Some(templates::reject_html()),
                extra_headers: vec![("Auto-Submitted".into(), "auto-replied".into())],
            };
            info!(to = %email.sender, forwarded = email.is_forwarded, "sending reject auto-reply");
            if let Err(e) = self.dispatcher.send(&reject).await {
                error!(to = %email.sender, error = %e, "reject dispatch failed");
            }
        } else {
            info!(to = %email.sender, "reject replies disabled, dropping silently");
        }
        RouteOutcome::Rejected
    }

    /// Accepted customer reply: forward to the internal mailbox with any
    /// stored original-request context, then acknowledge once per thread.
    async fn route_forward_accepted(
        &self,
        email: &ClassifiedEmail,
        id: CorrelationId,
    ) -> RouteOutcome {
        let reply = extract_reply(&email.body);

        let mut forward_body = reply.text.clone();
        match summary::lookup_summary(self.kv.as_ref(), &id).await {
            Ok(Some(stored)) => {
                forward_body.push_str("\n\n");
                forward_body.push_str(templates::FORWARD_SUMMARY_SEPARATOR);
                forward_body.push('\n');
                if !stored.subject.is_empty() {
                    forward_body.push_str(&format!("Subject: {}\n", stored.subject));
                }
                forward_body.push_str(&stored.body);
            }
            Ok(None) => {
                // First message on a thread submitted by email has no
                // stored summary yet; snapshot this one for later
                // forwards.
                let snapshot = RequestSummary {
                    subject: strip_reply_prefixes(&email.subject).to_string(),
                    body: reply.text.clone(),
                    email: email.sender.to_string(),
                    name: email.sender_name.clone(),
                };
                if let Err(e) = summary::record_summary(self.kv.as_ref(), &id, snapshot).await {
                    warn!(correlation_id = %id, error = %e, "request summary snapshot failed");
                }
            }
            Err(e) => {
                warn!(correlation_id = %id, error = %e, "request summary lookup failed");
            }
        }

        let forward = OutboundEmail {
            to: vec![self.config.forward_to.clone()],
            sender: self.config.outbound_address.clone(),
            reply_to: Some(self.config.reply_to.clone()),
            subject: with_correlation_tag(&email.subject, &id),
            text: forward_body,
            html: None,
            extra_headers: Vec::new(),
        };
        info!(
            correlation_id = %id,
            from = %email.sender,
            trimmed = reply.trimmed,
            "forwarding accepted customer email"
        );
        if let Err(e) = self.dispatcher.send(&forward).await {
            error!(correlation_id = %id, error = %e, "forward dispatch failed");
        }

        self.sync_side_channels(email, &id).await;

        let acknowledged = if self.config.send_ack {
            self.acknowledge_once(email, &id).await
        } else {
            debug!(correlation_id = %id, "acknowledgments disabled");
            false
        };

        RouteOutcome::ForwardAccepted {
            correlation_id: id,
            acknowledged,
        }
    }

    /// Best-effort directory sync and ledger append. Failures are logged
    /// and never affect the routed outcome.
    async fn sync_side_channels(&self, email: &ClassifiedEmail, id: &CorrelationId) {
        if let Some(directory) = &self.directory {
            if let Err(e) = directory
                .upsert(&email.sender, &email.sender_name, &self.config.contact_label)
                .await
            {
                warn!(correlation_id = %id, error = %e, "contact directory sync failed");
            }
        }

        if let Some(ledger) = &self.ledger {
            let row = vec![
                chrono::Utc::now().to_rfc3339(),
                id.as_str().to_string(),
                email.sender.to_string(),
                email.sender_name.clone(),
                email.subject.clone(),
            ];
            if let Err(e) = ledger.append(LedgerKind::Contacts, row).await {
                warn!(correlation_id = %id, error = %e, "ledger append failed");
            }
        }
    }

    /// Sends the standard acknowledgment unless the gate already holds
    /// the key. The check-then-set pair is not atomic; a rare duplicate
    /// acknowledgment is accepted.
    async fn acknowledge_once(&self, email: &ClassifiedEmail, id: &CorrelationId) -> bool {
        match ack::already_acknowledged(self.kv.as_ref(), id).await {
            Ok(true) => {
                info!(correlation_id = %id, "acknowledgment already sent for this thread");
                return false;
            }
            Ok(false) => {}
            Err(e) => {
                // Prefer a possible duplicate over a missing first
                // acknowledgment.
                warn!(correlation_id = %id, error = %e, "acknowledgment gate check failed");
            }
        }

        let label = id.body_label();
        let ack_email = OutboundEmail {
            to: vec![email.sender.to_string()],
            sender: self.config.outbound_address.clone(),
            reply_to: Some(self.config.reply_to.clone()),
            subject: with_correlation_tag(templates::ACK_SUBJECT, id),
            text: templates::ack_text(&label),
            html: Some(templates::ack_html(&label)),
            extra_headers: vec![("Auto-Submitted".into(), "auto-replied".into())],
        };

        info!(correlation_id = %id, to = %email.sender, "sending acknowledgment");
        if let Err(e) = self.dispatcher.send(&ack_email).await {
            error!(correlation_id = %id, error = %e, "acknowledgment dispatch failed");
            return false;
        }
        if let Err(e) = ack::mark_acknowledged(self.kv.as_ref(), id).await {
            warn!(correlation_id = %id, error = %e, "acknowledgment gate mark failed");
        }
        true
    }
}
