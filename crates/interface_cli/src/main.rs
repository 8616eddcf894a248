//! timebill - command-line driver for the invoicing core
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! timebill migrate
//!
//! # Show a customer's unbilled entries
//! timebill unbilled CUS-018f3a4e-...
//!
//! # Create an invoice from the unbilled entries and render the document
//! timebill generate CUS-018f3a4e-... --tax-rate 23.00 --locale polish
//! ```
//!
//! # Environment Variables
//!
//! * `TIMEBILL_DATABASE_URL` - SQLite connection string
//! * `TIMEBILL_INVOICES_DIR` - output directory for rendered documents
//! * `TIMEBILL_LOG_LEVEL` - log level: trace, debug, info, warn, error
//! * `TIMEBILL_SELLER__NAME` (etc.) - seller profile printed on documents

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use chrono::{Days, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{CustomerId, TaxRate};
use infra_db::{
    create_pool_from_url, run_migrations, CustomerRepository, DatabasePool, EntryRepository,
    InvoiceRepository, NewInvoiceRequest,
};
use render_pdf::{FontConfig, Locale, RenderContext};

mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "timebill", version, about = "Small-business invoicing core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply database migrations
    Migrate,
    /// List a customer's unbilled entries
    Unbilled {
        /// Customer identifier (CUS-<uuid> or bare uuid)
        customer_id: String,
    },
    /// Create an invoice from a customer's unbilled entries and render it
    Generate {
        /// Customer identifier (CUS-<uuid> or bare uuid)
        customer_id: String,
        /// Tax rate as a percentage, e.g. 23.00 (config default otherwise)
        #[arg(long)]
        tax_rate: Option<Decimal>,
        /// Days until the invoice is due (config default otherwise)
        #[arg(long)]
        due_days: Option<u64>,
        /// Document template: generic or polish
        #[arg(long, default_value = "generic")]
        locale: Locale,
        /// Invoice number override; generated when absent
        #[arg(long)]
        number: Option<String>,
        /// Free-text notes printed on the invoice
        #[arg(long)]
        notes: Option<String>,
        /// Free-text payment terms printed on the invoice
        #[arg(long)]
        terms: Option<String>,
        /// Output path for the document (default: <invoices_dir>/invoice_<number>.pdf)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.log_level);

    let cli = Cli::parse();

    let pool = create_pool_from_url(&config.database_url)
        .await
        .context("connecting to database")?;

    match cli.command {
        Command::Migrate => {
            run_migrations(&pool).await?;
            println!("Database ready.");
        }
        Command::Unbilled { customer_id } => {
            run_migrations(&pool).await?;
            show_unbilled(&pool, &customer_id).await?;
        }
        Command::Generate {
            customer_id,
            tax_rate,
            due_days,
            locale,
            number,
            notes,
            terms,
            output,
        } => {
            run_migrations(&pool).await?;
            generate_invoice(
                &pool,
                &config,
                GenerateArgs {
                    customer_id,
                    tax_rate,
                    due_days,
                    locale,
                    number,
                    notes,
                    terms,
                    output,
                },
            )
            .await?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

fn parse_customer_id(raw: &str) -> anyhow::Result<CustomerId> {
    CustomerId::from_str(raw).with_context(|| format!("invalid customer id '{raw}'"))
}

async fn show_unbilled(pool: &DatabasePool, customer_id: &str) -> anyhow::Result<()> {
    let customer_id = parse_customer_id(customer_id)?;
    let customers = CustomerRepository::new(pool.clone());
    let entries = EntryRepository::new(pool.clone());

    let customer = customers.find_by_id(customer_id).await?;
    let unbilled = entries.find_unbilled_for_customer(customer_id).await?;

    if unbilled.is_empty() {
        println!("No unbilled entries for {}.", customer.name);
        return Ok(());
    }

    println!("Unbilled entries for {}:", customer.name);
    let mut total_hours = Decimal::ZERO;
    let mut total_minor = 0i64;
    for entry in &unbilled {
        let amount = entry.amount(&customer)?;
        total_hours += entry.hours;
        total_minor += amount.minor();
        println!(
            "  {}  {:>6.2} h  {:>12}  {}",
            entry.date_worked,
            entry.hours,
            amount.to_string(),
            entry.description
        );
    }
    let total = core_kernel::Money::from_minor(total_minor, customer.currency);
    println!("Total: {} entries, {:.2} h, {}", unbilled.len(), total_hours, total);

    Ok(())
}

struct GenerateArgs {
    customer_id: String,
    tax_rate: Option<Decimal>,
    due_days: Option<u64>,
    locale: Locale,
    number: Option<String>,
    notes: Option<String>,
    terms: Option<String>,
    output: Option<PathBuf>,
}

async fn generate_invoice(
    pool: &DatabasePool,
    config: &AppConfig,
    args: GenerateArgs,
) -> anyhow::Result<()> {
    let customer_id = parse_customer_id(&args.customer_id)?;
    let customers = CustomerRepository::new(pool.clone());
    let invoices = InvoiceRepository::new(pool.clone());

    let tax_percent = match args.tax_rate {
        Some(rate) => rate,
        None => Decimal::try_from(config.default_tax_rate_percent)
            .context("invalid default tax rate in configuration")?,
    };
    let tax_rate = TaxRate::from_percentage(tax_percent)
        .with_context(|| format!("invalid tax rate {tax_percent}"))?;

    let issue_date = Utc::now().date_naive();
    let due_days = args.due_days.unwrap_or(config.default_due_days);
    let due_date = issue_date.checked_add_days(Days::new(due_days));

    let priced = invoices
        .create_from_unbilled(NewInvoiceRequest {
            customer_id,
            tax_rate,
            issue_date,
            due_date,
            notes: args.notes,
            terms: args.terms,
            invoice_number: args.number,
        })
        .await?;

    let customer = customers.find_by_id(customer_id).await?;
    let invoice = &priced.invoice;

    let output = args.output.unwrap_or_else(|| {
        let file_name = format!("invoice_{}.pdf", invoice.invoice_number.replace('/', "_"));
        config.invoices_dir.join(file_name)
    });

    let ctx = RenderContext {
        locale: args.locale,
        seller: config.seller.clone(),
        header_image: config.assets.header_image.clone(),
        fonts: FontConfig {
            regular: config.assets.font_regular.clone(),
            bold: config.assets.font_bold.clone(),
        },
        generated_at: Utc::now(),
    };
    render_pdf::render_to_file(&output, invoice, &customer, &priced.line_items, &ctx)?;
    invoices
        .set_document_path(invoice.id, &output.to_string_lossy())
        .await?;

    println!(
        "Created invoice {} for {}: {} entries, subtotal {}, tax {}, total {}",
        invoice.invoice_number,
        customer.name,
        priced.line_items.len(),
        invoice.subtotal,
        invoice.tax_amount,
        invoice.total_amount
    );
    println!("Document written to {}", output.display());

    Ok(())
}
