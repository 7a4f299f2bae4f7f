use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use facturador::config::{Config, LogFormat};
use facturador::core::numeric::parse_lenient;
use facturador::credit_notes::{CreditNoteDraft, CreditNoteService};
use facturador::invoices::{DataEnvelope, InvoiceDraft, InvoiceService, LineItem};

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate an invoice draft and print the create-invoice payload
    Invoice {
        #[arg(help = "Draft JSON file, or - for stdin")]
        path: String,
    },

    /// Validate a credit-note draft and print the create-credit-note request
    CreditNote {
        #[arg(help = "Draft JSON file, or - for stdin")]
        path: String,
    },

    /// Compute a single row
    Line {
        #[arg(long)]
        quantity: String,

        #[arg(long)]
        unit_price: String,

        #[arg(long, default_value = "0")]
        discount: String,

        #[arg(long, help = "IVA percentage (defaults to the configured rate)")]
        iva: Option<String>,

        #[arg(long, default_value = "0")]
        ico: String,

        #[arg(long, help = "Row is excluded from IVA")]
        exempt: bool,
    },
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("facturador={}", config.app.log_level).into());

    // Logs go to stderr; stdout carries the JSON output
    let (json_layer, text_layer) = match config.app.log_format {
        LogFormat::Json => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
            None,
        ),
        LogFormat::Text => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read draft from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
    }
}

fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    init_tracing(&config);

    let args = Args::parse();
    tracing::debug!(env = %config.app.env, currency = %config.billing.currency, "Starting");

    let output = match args.command {
        Command::Invoice { path } => {
            let draft: InvoiceDraft = serde_json::from_str(&read_input(&path)?)
                .context("Invoice draft is not valid JSON")?;
            let service = InvoiceService::new(config.billing.clone());
            let payload = service.prepare_payload(&draft)?;
            let calculation = service.calculate(&draft);

            json!({
                "request": DataEnvelope::new(&payload),
                "totals": service.format_totals(&calculation),
            })
        }
        Command::CreditNote { path } => {
            let draft: CreditNoteDraft = serde_json::from_str(&read_input(&path)?)
                .context("Credit note draft is not valid JSON")?;
            let service = CreditNoteService::new(config.billing.clone());
            let request = service.prepare_request(&draft)?;
            let calculation = service.calculate(&draft);

            json!({
                "request": request,
                "totals": service.format_totals(&calculation),
            })
        }
        Command::Line {
            quantity,
            unit_price,
            discount,
            iva,
            ico,
            exempt,
        } => {
            let tax_percent = iva
                .as_deref()
                .map(parse_lenient)
                .unwrap_or(config.billing.default_tax_percent);
            let item = LineItem::new(parse_lenient(&quantity), parse_lenient(&unit_price))
                .with_discount(parse_lenient(&discount))
                .with_tax(tax_percent)
                .with_secondary_tax(parse_lenient(&ico))
                .exempt(exempt);
            let result = facturador::compute_line_item(&item);

            json!({
                "result": result,
                "line_total": config.billing.currency.format_amount(result.line_total),
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
