// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end routing scenarios against the capture dispatcher and the
//! in-memory store.

use std::sync::Arc;

use atelier_core::CorrelationId;
use atelier_router::{DropReason, RouteOutcome, Router, RouterConfig, SkipReason};
use atelier_store::queries::{ack, origin, summary};
use atelier_store::{MemoryKv, OriginRecord, RequestSummary};
use atelier_test_utils::{CaptureDispatcher, inbound, raw_email, raw_email_with_headers};

fn test_config() -> RouterConfig {
    RouterConfig {
        forward_to: "owner@heerawalla.com".to_string(),
        internal_senders: vec!["staff@heerawalla.com".to_string()],
        ..RouterConfig::default()
    }
}

fn build_router(config: RouterConfig) -> (Router, Arc<CaptureDispatcher>, Arc<MemoryKv>) {
    let dispatcher = Arc::new(CaptureDispatcher::new());
    let kv = Arc::new(MemoryKv::new());
    let router = Router::new(config, dispatcher.clone(), kv.clone());
    (router, dispatcher, kv)
}

fn qr7t2k() -> CorrelationId {
    CorrelationId::parse("QR7T2K").unwrap()
}

#[tokio::test]
async fn customer_reply_forwards_and_acknowledges_once() {
    let (router, dispatcher, kv) = build_router(test_config());

    let raw = raw_email(
        "customer@example.com",
        "atelier@heerawalla.com",
        "Re: My ring [HW-REQ:QR7T2K]",
        "Thanks!\n\nOn Mon, Jan 1, 2024, Staff <atelier@heerawalla.com> wrote:\n> original text",
    );
    let outcome = router.handle(&inbound(raw.clone(), "atelier@heerawalla.com")).await;

    assert_eq!(
        outcome,
        RouteOutcome::ForwardAccepted {
            correlation_id: qr7t2k(),
            acknowledged: true,
        }
    );

    let sent = dispatcher.sent_messages().await;
    assert_eq!(sent.len(), 2, "forward plus exactly one acknowledgment");

    let forward = &sent[0];
    assert_eq!(forward.to, vec!["owner@heerawalla.com"]);
    assert_eq!(forward.subject, "Re: My ring [HW-REQ:QR7T2K]");
    assert!(forward.text.starts_with("Thanks!"), "got: {}", forward.text);
    assert!(
        !forward.text.contains("original text"),
        "quoted thread must not be forwarded"
    );

    let ack_mail = &sent[1];
    assert_eq!(ack_mail.to, vec!["customer@example.com"]);
    assert!(ack_mail.subject.contains("[HW-REQ:QR7T2K]"));
    assert!(
        ack_mail
            .extra_headers
            .iter()
            .any(|(k, v)| k == "Auto-Submitted" && v == "auto-replied"),
        "acknowledgment must be marked auto-replied"
    );

    // The origin record now points at the customer.
    let record = origin::lookup_origin(kv.as_ref(), &qr7t2k())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.email, "customer@example.com");

    // A second identical delivery forwards again but the gate suppresses
    // a duplicate acknowledgment.
    dispatcher.clear_sent().await;
    let outcome = router.handle(&inbound(raw, "atelier@heerawalla.com")).await;
    assert_eq!(
        outcome,
        RouteOutcome::ForwardAccepted {
            correlation_id: qr7t2k(),
            acknowledged: false,
        }
    );
    let sent = dispatcher.sent_messages().await;
    assert_eq!(sent.len(), 1, "second delivery must not re-acknowledge");
    assert_eq!(sent[0].to, vec!["owner@heerawalla.com"]);
}

#[tokio::test]
async fn internal_reply_routes_to_origin_without_mutating_it() {
    let (router, dispatcher, kv) = build_router(test_config());

    let stored = OriginRecord {
        email: "customer@example.com".to_string(),
        name: "Jane".to_string(),
    };
    origin::record_origin(kv.as_ref(), &qr7t2k(), &stored).await.unwrap();

    let raw = raw_email(
        "Atelier <atelier@heerawalla.com>",
        "atelier@heerawalla.com",
        "Re: My ring HW-REQ:QR7T2K",
        "Your ring is ready for a fitting.\n\nOn Mon, Jane wrote:\n> when will it be done?",
    );
    let outcome = router.handle(&inbound(raw, "atelier@heerawalla.com")).await;

    assert_eq!(
        outcome,
        RouteOutcome::InternalReply {
            correlation_id: qr7t2k()
        }
    );

    let sent = dispatcher.sent_messages().await;
    assert_eq!(sent.len(), 1, "exactly one email to the customer");
    assert_eq!(sent[0].to, vec!["customer@example.com"]);
    assert_eq!(sent[0].text, "Your ring is ready for a fitting.");
    assert!(sent[0].subject.contains("HW-REQ:QR7T2K"));

    // Internal replies never redefine whose thread this is.
    let record = origin::lookup_origin(kv.as_ref(), &qr7t2k())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record, stored);
}

#[tokio::test]
async fn internal_reply_to_expired_thread_sends_nothing() {
    let (router, dispatcher, _kv) = build_router(test_config());

    let raw = raw_email(
        "staff@heerawalla.com",
        "atelier@heerawalla.com",
        "Re: old thread [HW-REQ:EXPIRD]",
        "Following up on this.",
    );
    let outcome = router.handle(&inbound(raw, "atelier@heerawalla.com")).await;

    assert_eq!(outcome, RouteOutcome::Dropped(DropReason::MissingOrigin));
    assert_eq!(dispatcher.sent_count().await, 0, "never guess a recipient");
}

#[tokio::test]
async fn forwarded_subject_without_id_is_rejected() {
    let mut config = test_config();
    config.forward_rejects_to = Some("rejects@heerawalla.com".to_string());
    let (router, dispatcher, _kv) = build_router(config);

    let raw = raw_email(
        "someone@example.com",
        "atelier@heerawalla.com",
        "Fwd: interesting",
        "Check this out.",
    );
    let outcome = router.handle(&inbound(raw, "atelier@heerawalla.com")).await;

    assert_eq!(outcome, RouteOutcome::Rejected);
    let sent = dispatcher.sent_messages().await;
    assert_eq!(sent.len(), 2, "rejects copy plus the reject auto-reply");

    assert_eq!(sent[0].to, vec!["rejects@heerawalla.com"]);
    assert!(sent[0].subject.starts_with("Rejected:"));

    let reject = &sent[1];
    assert_eq!(reject.to, vec!["someone@example.com"]);
    assert_eq!(reject.subject, "Heerawalla - Please submit your request via our website");
    assert!(
        reject
            .extra_headers
            .iter()
            .any(|(k, v)| k == "Auto-Submitted" && v == "auto-replied"),
        "reject must be marked auto-replied to prevent reply loops"
    );
}

#[tokio::test]
async fn external_mail_without_id_is_rejected_without_copy_when_unconfigured() {
    let (router, dispatcher, _kv) = build_router(test_config());

    let raw = raw_email(
        "someone@example.com",
        "atelier@heerawalla.com",
        "hello there",
        "I want to buy a ring directly over email.",
    );
    let outcome = router.handle(&inbound(raw, "atelier@heerawalla.com")).await;

    assert_eq!(outcome, RouteOutcome::Rejected);
    let sent = dispatcher.sent_messages().await;
    assert_eq!(sent.len(), 1, "only the reject auto-reply");
    assert_eq!(sent[0].to, vec!["someone@example.com"]);
}

#[tokio::test]
async fn reject_reply_can_be_disabled() {
    let mut config = test_config();
    config.send_reject = false;
    let (router, dispatcher, _kv) = build_router(config);

    let raw = raw_email(
        "someone@example.com",
        "atelier@heerawalla.com",
        "hello",
        "no id here",
    );
    let outcome = router.handle(&inbound(raw, "atelier@heerawalla.com")).await;
    assert_eq!(outcome, RouteOutcome::Rejected);
    assert_eq!(dispatcher.sent_count().await, 0);
}

#[tokio::test]
async fn no_reply_sink_and_auto_mail_are_skipped_silently() {
    let (router, dispatcher, _kv) = build_router(test_config());

    let raw = raw_email(
        "customer@example.com",
        "no-reply@heerawalla.com",
        "anything",
        "body",
    );
    let outcome = router.handle(&inbound(raw, "no-reply@heerawalla.com")).await;
    assert_eq!(outcome, RouteOutcome::Skipped(SkipReason::NoReplySink));

    let raw = raw_email_with_headers(
        "list@deals.example.com",
        "atelier@heerawalla.com",
        "Big sale",
        "buy now",
        &[("Precedence", "bulk")],
    );
    let outcome = router.handle(&inbound(raw, "atelier@heerawalla.com")).await;
    assert_eq!(outcome, RouteOutcome::Skipped(SkipReason::AutoOrBulk));

    assert_eq!(dispatcher.sent_count().await, 0);
}

#[tokio::test]
async fn empty_from_is_dropped_silently() {
    let (router, dispatcher, _kv) = build_router(test_config());

    let raw = "To: atelier@heerawalla.com\r\nSubject: hi\r\n\r\nbody".to_string();
    let outcome = router.handle(&inbound(raw, "atelier@heerawalla.com")).await;

    assert_eq!(outcome, RouteOutcome::Dropped(DropReason::Unroutable));
    assert_eq!(dispatcher.sent_count().await, 0);
}

#[tokio::test]
async fn stored_summary_is_appended_to_forward() {
    let (router, dispatcher, kv) = build_router(test_config());

    let stored = RequestSummary {
        subject: "Custom sapphire ring".to_string(),
        body: "I would like a sapphire ring in white gold, size 6.".to_string(),
        email: "customer@example.com".to_string(),
        name: "Jane".to_string(),
    };
    summary::record_summary(kv.as_ref(), &qr7t2k(), stored).await.unwrap();

    let raw = raw_email(
        "customer@example.com",
        "atelier@heerawalla.com",
        "Re: My ring [HW-REQ:QR7T2K]",
        "Any update?",
    );
    router.handle(&inbound(raw, "atelier@heerawalla.com")).await;

    let sent = dispatcher.sent_messages().await;
    let forward = &sent[0];
    assert!(forward.text.starts_with("Any update?"));
    assert!(forward.text.contains("--- Original request ---"));
    assert!(forward.text.contains("sapphire ring in white gold"));
}

#[tokio::test]
async fn origin_record_tracks_latest_external_sender() {
    let (router, _dispatcher, kv) = build_router(test_config());

    let first = raw_email(
        "jane@example.com",
        "atelier@heerawalla.com",
        "Re: ring [HW-REQ:QR7T2K]",
        "From my work address.",
    );
    router.handle(&inbound(first, "atelier@heerawalla.com")).await;

    let second = raw_email(
        "jane.personal@example.net",
        "atelier@heerawalla.com",
        "Re: ring [HW-REQ:QR7T2K]",
        "Now from my personal address.",
    );
    router.handle(&inbound(second, "atelier@heerawalla.com")).await;

    let record = origin::lookup_origin(kv.as_ref(), &qr7t2k())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.email, "jane.personal@example.net");
}

#[tokio::test]
async fn failed_acknowledgment_leaves_gate_open_for_redelivery() {
    let (router, dispatcher, kv) = build_router(test_config());

    let raw = raw_email(
        "customer@example.com",
        "atelier@heerawalla.com",
        "Re: ring [HW-REQ:QR7T2K]",
        "First contact.",
    );

    dispatcher.set_failing(true);
    let outcome = router.handle(&inbound(raw.clone(), "atelier@heerawalla.com")).await;
    assert_eq!(
        outcome,
        RouteOutcome::ForwardAccepted {
            correlation_id: qr7t2k(),
            acknowledged: false,
        }
    );
    assert!(!ack::already_acknowledged(kv.as_ref(), &qr7t2k()).await.unwrap());

    // Transport redelivery with a healthy provider acknowledges.
    dispatcher.set_failing(false);
    let outcome = router.handle(&inbound(raw, "atelier@heerawalla.com")).await;
    assert_eq!(
        outcome,
        RouteOutcome::ForwardAccepted {
            correlation_id: qr7t2k(),
            acknowledged: true,
        }
    );
    assert!(ack::already_acknowledged(kv.as_ref(), &qr7t2k()).await.unwrap());
}

#[tokio::test]
async fn body_label_alone_is_enough_to_thread() {
    let (router, dispatcher, kv) = build_router(test_config());

    let raw = raw_email(
        "customer@example.com",
        "atelier@heerawalla.com",
        "following up",
        "Checking in on my request.\n\nHeerawalla Request ID: qr7t2k",
    );
    let outcome = router.handle(&inbound(raw, "atelier@heerawalla.com")).await;

    assert!(matches!(outcome, RouteOutcome::ForwardAccepted { .. }));
    let sent = dispatcher.sent_messages().await;
    assert!(sent[0].subject.contains("[HW-REQ:QR7T2K]"));
    assert!(
        origin::lookup_origin(kv.as_ref(), &qr7t2k())
            .await
            .unwrap()
            .is_some()
    );
}
