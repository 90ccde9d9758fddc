use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use invoice_app::config::DEFAULT_CONFIG_FILE;
use invoice_app::exporter::TextExporter;
use invoice_app::{AppConfig, InvoiceSession, build_registry, csv_loader, logging, preview};
use invoice_core::controller::Effect;
use invoice_core::{FormField, InvoiceEvent, Notification, NotificationKind};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Invoice generator.
///
/// Form fields persist between runs in the configured store; line items are
/// read from a CSV file for each preview or export.
#[derive(Debug, Parser)]
#[command(name = "invoice")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Store backend (`sqlite` or `memory`). Overrides the config file.
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Store connection string. For SQLite this is a file path or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Log filter, e.g. `debug` or `invoice_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the saved form fields and the empty-form totals.
    Show,
    /// Edit one form field (saved immediately).
    Set {
        /// Field key, e.g. `clientName` or `taxRate`.
        field: String,
        value: String,
    },
    /// Validate and print the invoice.
    Preview {
        /// Line-item CSV (`description,quantity,rate`).
        #[arg(long)]
        items: PathBuf,
    },
    /// Validate and write the paginated invoice to a text file.
    Export {
        #[arg(long)]
        items: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Save the current form fields.
    Save,
    /// Restore defaults and clear saved data.
    Reset,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    logging::init_default_logging();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(backend) = cli.backend {
        config.store.backend = backend;
    }
    if let Some(db) = cli.db {
        config.store.connection_string = db;
    }
    if let Some(level) = cli.log_level.or(config.logging.level.clone()) {
        logging::set_log_level(&level)?;
    }
    if let Some(file) = cli.log_file.or(config.logging.file.clone()) {
        logging::enable_file_logging(&file)?;
    }

    debug!("connecting to {} backend", config.store.backend);
    let today = chrono::Local::now().date_naive();
    let mut session = InvoiceSession::open(
        &build_registry(),
        &config.store_config(),
        config.form_defaults(),
        today,
    )
    .await
    .context("cannot open form store")?;

    let notifications = match cli.command {
        Command::Show => {
            show(&session);
            Vec::new()
        }
        Command::Set { field, value } => {
            let field = FormField::from_key(&field).with_context(|| {
                let keys: Vec<&str> = FormField::ALL.iter().map(FormField::key).collect();
                format!("unknown field '{field}'; expected one of: {}", keys.join(", "))
            })?;
            let outcome = session
                .dispatch(InvoiceEvent::FieldEdited { field, value })
                .await;
            info!(field = field.key(), "field updated");
            outcome.notifications
        }
        Command::Preview { items } => {
            let rows = csv_loader::load_from_file(&items)?;
            session.load_line_items(rows);
            let outcome = session.dispatch(InvoiceEvent::PreviewRequested).await;
            if outcome.has_effect(&Effect::ShowPreview) {
                print!("{}", preview::render_text(&session.controller().document()));
            }
            outcome.notifications
        }
        Command::Export { items, out_dir } => {
            let rows = csv_loader::load_from_file(&items)?;
            session.load_line_items(rows);
            let (summary, notifications) = session.export(&TextExporter::new(out_dir)).await;
            if let Some(summary) = summary {
                println!("{} ({} page(s))", summary.path.display(), summary.pages);
            }
            notifications
        }
        Command::Save => session.dispatch(InvoiceEvent::SaveRequested).await.notifications,
        Command::Reset => session.dispatch(InvoiceEvent::ResetRequested).await.notifications,
    };

    Ok(report(&notifications))
}

fn show(session: &InvoiceSession) {
    let controller = session.controller();
    for (field, value) in controller.snapshot().iter() {
        println!("{:<16} {:<18} {}", field.key(), field.label(), value);
    }
    let document = controller.document();
    println!();
    println!("Subtotal: {}", document.subtotal_text());
    println!("Tax:      {}", document.tax_amount_text());
    println!("Total:    {}", document.total_text());
}

/// Prints notifications; any error makes the exit status non-zero.
fn report(notifications: &[Notification]) -> ExitCode {
    let mut failed = false;
    for notification in notifications {
        match notification.kind {
            NotificationKind::Error => {
                failed = true;
                eprintln!("error: {}", notification.message);
            }
            kind => println!("{}: {}", kind.as_str(), notification.message),
        }
    }
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
