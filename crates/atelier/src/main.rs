// SPDX-FileCopyrightText: 2026 Heerawalla Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heerawalla atelier mail router - binary entry point.
//!
//! `atelier process` reads one raw message (file or stdin), classifies
//! it, and executes the routed outcome against the configured
//! collaborators. `atelier mint` generates a fresh correlation ID for
//! the intake side; `atelier check` validates configuration.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use atelier_config::AtelierConfig;
use atelier_core::{AtelierError, CorrelationId, InboundEmail};
use atelier_dispatch::ResendDispatcher;
use atelier_google::{GoogleContacts, OauthCredentials, SheetIds, SheetsLedger, TokenCache};
use atelier_router::{RouteOutcome, Router, RouterConfig};
use atelier_store::MemoryKv;

/// Heerawalla atelier mail router.
#[derive(Parser, Debug)]
#[command(name = "atelier", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Route one raw message read from a file or stdin.
    Process {
        /// Path to the raw message; stdin when omitted.
        file: Option<PathBuf>,
        /// Envelope recipient; falls back to the To header when omitted.
        #[arg(long)]
        envelope_to: Option<String>,
    },
    /// Mint a fresh correlation ID.
    Mint,
    /// Validate the configuration and exit.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match atelier_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            atelier_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.atelier.log_level);

    match cli.command {
        Some(Commands::Process { file, envelope_to }) => {
            if let Err(e) = run_process(&config, file, envelope_to).await {
                eprintln!("atelier process: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Mint) => {
            let id = CorrelationId::mint();
            println!("{}", id.as_str());
            println!("subject tag: {}", id.subject_tag());
            println!("body label:  {}", id.body_label());
        }
        Some(Commands::Check) => {
            println!(
                "atelier: config ok (forward_to={}, ack={}, reject={})",
                config.mail.forward_to, config.mail.send_ack, config.mail.send_reject
            );
        }
        None => {
            println!("atelier: use --help for available commands");
        }
    }
}

/// Routes one raw message through the full pipeline.
async fn run_process(
    config: &AtelierConfig,
    file: Option<PathBuf>,
    envelope_to: Option<String>,
) -> Result<(), AtelierError> {
    let raw = match &file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| AtelierError::Config(format!("cannot read {}: {e}", path.display())))?,
        None => std::io::read_to_string(std::io::stdin())
            .map_err(|e| AtelierError::Config(format!("cannot read stdin: {e}")))?,
    };

    let router = build_router(config)?;
    let inbound = InboundEmail {
        raw,
        envelope_to: envelope_to.unwrap_or_default(),
    };

    let outcome = router.handle(&inbound).await;
    info!(outcome = outcome_label(&outcome), "invocation complete");
    println!("{}", outcome_label(&outcome));
    Ok(())
}

/// Wires the router from the loaded configuration.
///
/// The CLI harness runs against the in-memory store; the edge deployment
/// binds the platform's KV namespace behind the same trait.
fn build_router(config: &AtelierConfig) -> Result<Router, AtelierError> {
    let api_key = config.resend.api_key.as_deref().ok_or_else(|| {
        AtelierError::Config("resend.api_key is required to process mail".to_string())
    })?;
    let dispatcher = Arc::new(ResendDispatcher::new(api_key, &config.resend.base_url)?);
    let kv = Arc::new(MemoryKv::new());

    let router_config = RouterConfig {
        forward_to: config.mail.forward_to.clone(),
        forward_rejects_to: config.mail.forward_rejects_to.clone(),
        reply_to: config.mail.reply_to.clone(),
        outbound_address: config.mail.outbound_address.clone(),
        no_reply_address: config.mail.no_reply_address.clone(),
        internal_senders: config.mail.internal_senders.clone(),
        send_ack: config.mail.send_ack,
        send_reject: config.mail.send_reject,
        contact_label: config.google.contact_label_subscribed.clone(),
    };

    let mut router = Router::new(router_config, dispatcher, kv);

    let google = &config.google;
    if let (Some(client_id), Some(client_secret), Some(refresh_token)) = (
        google.client_id.clone(),
        google.client_secret.clone(),
        google.refresh_token.clone(),
    ) {
        let token = Arc::new(TokenCache::new(OauthCredentials {
            client_id,
            client_secret,
            refresh_token,
            token_url: google.token_url.clone(),
        })?);
        router = router
            .with_directory(Arc::new(GoogleContacts::new(
                token.clone(),
                &google.people_base_url,
            )?))
            .with_ledger(Arc::new(SheetsLedger::new(
                token,
                &google.sheets_base_url,
                SheetIds {
                    orders: google.order_sheet_id.clone(),
                    quotes: google.quote_sheet_id.clone(),
                    contacts: google.contacts_sheet_id.clone(),
                },
            )?));
    }

    Ok(router)
}

fn outcome_label(outcome: &RouteOutcome) -> &'static str {
    match outcome {
        RouteOutcome::Dropped(_) => "dropped",
        RouteOutcome::Skipped(_) => "skipped",
        RouteOutcome::InternalReply { .. } => "internal-reply",
        RouteOutcome::Rejected => "rejected",
        RouteOutcome::ForwardAccepted { .. } => "forward-accepted",
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("atelier={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
