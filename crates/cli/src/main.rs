//! Operator CLI for the Steeple content backend.
//!
//! Every command works against the same library surface the web handlers
//! use: `resolve` and `check` run the fallback facade, `defaults` inspects
//! the bundled payloads, `submit` and `donate` exercise the write paths.
//! Envelopes print as JSON on stdout; logs go to stderr so output pipes
//! cleanly into `jq`.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use futures_util::future::join_all;
use serde_json::Value;
use steeple_forms::{FormsService, shape_contact, shape_visit};
use steeple_giving::{PaymentsClient, intent_form};
use steeple_registry::DefaultPayloadRegistry;
use steeple_resolver::SiteContent;
use steeple_store::{ContentSource, StoreClient, UnconfiguredStore};
use steeple_types::{
    ContactMessage, ContentKind, DonationRequest, GivingFrequency, PlannedVisit, ResolvedContent, SubmissionReceipt,
};
use steeple_util::{redact_json, redact_sensitive};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "steeple", version, about = "Operator tool for the Steeple content backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve one content kind and print its envelope
    Resolve {
        /// Content kind (events, ministries, ministry-detail, giving-page,
        /// site-settings, service-times, sermons, announcements)
        kind: ContentKind,
        /// Row filter for slug-addressed kinds (ministry-detail)
        #[arg(long)]
        slug: Option<String>,
        /// Row cap for list kinds
        #[arg(long)]
        limit: Option<usize>,
        /// Print the envelope on one line
        #[arg(long)]
        compact: bool,
    },
    /// Print bundled default payloads
    Defaults {
        /// One kind; omit for the whole bundle keyed by kind
        kind: Option<ContentKind>,
    },
    /// Resolve every kind concurrently and summarize provenance
    Check,
    /// Shape and store a form submission
    Submit {
        #[command(subcommand)]
        form: SubmitCommands,
    },
    /// Open a payment intent with the processor
    Donate {
        /// Amount in minor currency units (2500 = $25.00)
        #[arg(long)]
        amount: u64,
        #[arg(long, default_value = "usd")]
        currency: String,
        /// Fund code from the giving page
        #[arg(long, default_value = "general")]
        fund: String,
        /// Receipt email for the donor
        #[arg(long)]
        email: Option<String>,
        /// Monthly recurring instead of one-time
        #[arg(long)]
        monthly: bool,
        /// Print the shaped request, redacted, without sending it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SubmitCommands {
    /// Contact-form message
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: String,
        /// Print the shaped row, redacted, without sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Planned-visit note
    Visit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Planned date, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        party_size: Option<u32>,
        #[arg(long)]
        children: Option<u32>,
        #[arg(long)]
        questions: Option<String>,
        /// Print the shaped row, redacted, without sending it
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            kind,
            slug,
            limit,
            compact,
        } => run_resolve(kind, slug, limit, compact).await,
        Commands::Defaults { kind } => run_defaults(kind),
        Commands::Check => run_check().await,
        Commands::Submit { form } => run_submit(form).await,
        Commands::Donate {
            amount,
            currency,
            fund,
            email,
            monthly,
            dry_run,
        } => run_donate(amount, currency, fund, email, monthly, dry_run).await,
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Wire the facade the way a web handler would: a configured store client
/// when the environment provides credentials, the inert stand-in otherwise.
fn site_content() -> Result<SiteContent> {
    let defaults = DefaultPayloadRegistry::from_config().context("defaults bundle failed to load")?;
    let source: Arc<dyn ContentSource> = match StoreClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(error) => {
            warn!(reason = %error, "store not configured, serving bundled defaults");
            Arc::new(UnconfiguredStore)
        }
    };
    Ok(SiteContent::new(source, Arc::new(defaults)))
}

async fn run_resolve(kind: ContentKind, slug: Option<String>, limit: Option<usize>, compact: bool) -> Result<()> {
    let site = site_content()?;
    let resolved = site.resolve_json(kind, slug.as_deref(), limit).await;
    print_envelope(&resolved, compact)
}

fn run_defaults(kind: Option<ContentKind>) -> Result<()> {
    let defaults = DefaultPayloadRegistry::from_config().context("defaults bundle failed to load")?;
    let payload = match kind {
        Some(kind) => defaults.payload(kind).clone(),
        None => {
            let mut bundle = serde_json::Map::new();
            for kind in ContentKind::ALL {
                bundle.insert(kind.as_str().to_string(), defaults.payload(kind).clone());
            }
            Value::Object(bundle)
        }
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

async fn run_check() -> Result<()> {
    let site = site_content()?;
    let resolutions = join_all(ContentKind::ALL.map(|kind| site.resolve_json(kind, None, None))).await;

    println!("{:<16} {:<15} {}", "kind", "source", "message");
    let mut degraded = 0usize;
    for (kind, resolved) in ContentKind::ALL.iter().zip(&resolutions) {
        if resolved.is_degraded() {
            degraded += 1;
        }
        println!("{:<16} {:<15} {}", kind.as_str(), resolved.source.as_str(), resolved.message);
    }

    match degraded {
        0 => println!("\nall {} kinds served live", ContentKind::ALL.len()),
        n => println!("\n{n} of {} kinds degraded to bundled defaults", ContentKind::ALL.len()),
    }
    Ok(())
}

async fn run_submit(form: SubmitCommands) -> Result<()> {
    match form {
        SubmitCommands::Contact {
            name,
            email,
            phone,
            subject,
            message,
            dry_run,
        } => {
            let contact = ContactMessage {
                name,
                email,
                phone,
                subject,
                message,
            };
            if dry_run {
                let row = shape_contact(&contact).map_err(anyhow::Error::msg)?;
                return print_shaped_row(&row);
            }
            let receipt = forms_service()?.submit_contact(&contact).await;
            print_receipt(&receipt)
        }
        SubmitCommands::Visit {
            name,
            email,
            date,
            party_size,
            children,
            questions,
            dry_run,
        } => {
            let visit = PlannedVisit {
                name,
                email,
                visit_date: date,
                party_size,
                children,
                questions,
            };
            if dry_run {
                let row = shape_visit(&visit).map_err(anyhow::Error::msg)?;
                return print_shaped_row(&row);
            }
            let receipt = forms_service()?.submit_planned_visit(&visit).await;
            print_receipt(&receipt)
        }
    }
}

/// Submissions need a real store; there is no fallback to write into.
fn forms_service() -> Result<FormsService> {
    let client = StoreClient::from_env().context("submissions need STEEPLE_STORE_URL and STEEPLE_STORE_KEY")?;
    Ok(FormsService::new(Arc::new(client)))
}

async fn run_donate(
    amount: u64,
    currency: String,
    fund: String,
    email: Option<String>,
    monthly: bool,
    dry_run: bool,
) -> Result<()> {
    let request = DonationRequest {
        amount_minor: amount,
        currency,
        fund,
        frequency: if monthly {
            GivingFrequency::Monthly
        } else {
            GivingFrequency::OneTime
        },
        donor_email: email,
    };

    if dry_run {
        let form = intent_form(&request)?;
        println!("POST /v1/payment_intents");
        for (key, value) in &form {
            println!("  {key}={}", redact_sensitive(value));
        }
        return Ok(());
    }

    let client =
        PaymentsClient::from_env().context("donations need STEEPLE_PAYMENTS_BASE and STEEPLE_PAYMENTS_SECRET")?;
    let intent = client.create_payment_intent(&request).await?;
    // client_secret never prints
    println!(
        "created intent {} for {} {} ({})",
        intent.id, intent.amount, intent.currency, intent.status
    );
    Ok(())
}

fn print_envelope(resolved: &ResolvedContent<Value>, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(resolved)?
    } else {
        serde_json::to_string_pretty(resolved)?
    };
    println!("{rendered}");
    Ok(())
}

fn print_shaped_row(row: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&redact_json(row))?);
    Ok(())
}

fn print_receipt(receipt: &SubmissionReceipt) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(receipt)?);
    if receipt.accepted {
        Ok(())
    } else {
        anyhow::bail!("submission declined: {}", receipt.message)
    }
}
