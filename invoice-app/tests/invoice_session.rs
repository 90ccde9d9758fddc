//! End-to-end runs of the invoice session against on-disk fixtures and a
//! file-backed SQLite store.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use invoice_app::exporter::TextExporter;
use invoice_app::{AppConfig, InvoiceSession, build_registry, csv_loader};
use invoice_core::controller::Effect;
use invoice_core::store::StoreConfig;
use invoice_core::{FormField, InvoiceEvent, NotificationKind};
use pretty_assertions::assert_eq;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("line_items.csv")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn sqlite_config(dir: &Path) -> StoreConfig {
    StoreConfig::new("sqlite", dir.join("invoice.db").display().to_string())
}

fn app_config() -> AppConfig {
    AppConfig::from_toml_str(
        "currency = \"$\"\n[company]\nname = \"Acme Studio\"\n",
        Path::new("inline.toml"),
    )
    .unwrap()
}

async fn open(dir: &Path) -> InvoiceSession {
    InvoiceSession::open(
        &build_registry(),
        &sqlite_config(dir),
        app_config().form_defaults(),
        today(),
    )
    .await
    .expect("sqlite session should open")
}

async fn edit(session: &mut InvoiceSession, field: FormField, value: &str) {
    session
        .dispatch(InvoiceEvent::FieldEdited {
            field,
            value: value.to_string(),
        })
        .await;
}

#[test]
fn fixture_rows_load_verbatim() {
    let rows = csv_loader::load_from_file(&fixture_path()).expect("fixture should load");

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].description, "Logo design");
    assert_eq!(rows[1].rate, "40");
    assert_eq!(rows[2].quantity, "abc");
}

#[tokio::test]
async fn fields_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut session = open(dir.path()).await;
        edit(&mut session, FormField::ClientName, "Jane Doe").await;
        edit(&mut session, FormField::TaxRate, "10").await;
    }

    let session = open(dir.path()).await;
    let snapshot = session.controller().snapshot();

    assert_eq!(snapshot.get(FormField::ClientName), "Jane Doe");
    assert_eq!(snapshot.get(FormField::TaxRate), "10");
    assert_eq!(snapshot.get(FormField::CompanyName), "Acme Studio");
}

#[tokio::test]
async fn fixture_totals_skip_invalid_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path()).await;
    edit(&mut session, FormField::TaxRate, "10").await;

    session.load_line_items(csv_loader::load_from_file(&fixture_path()).unwrap());
    let document = session.controller().document();

    assert_eq!(document.subtotal_text(), "$370.00");
    assert_eq!(document.tax_amount_text(), "$37.00");
    assert_eq!(document.total_text(), "$407.00");
    assert_eq!(document.lines().len(), 3);
    assert_eq!(document.lines()[2].amount, "$0.00");
}

#[tokio::test]
async fn preview_needs_a_client() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path()).await;
    session.load_line_items(csv_loader::load_from_file(&fixture_path()).unwrap());

    let blocked = session.dispatch(InvoiceEvent::PreviewRequested).await;
    edit(&mut session, FormField::ClientName, "Jane Doe").await;
    let shown = session.dispatch(InvoiceEvent::PreviewRequested).await;

    assert!(!blocked.has_effect(&Effect::ShowPreview));
    assert_eq!(blocked.notifications[0].kind, NotificationKind::Error);
    assert!(shown.has_effect(&Effect::ShowPreview));
}

#[tokio::test]
async fn export_writes_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path()).await;
    edit(&mut session, FormField::ClientName, "Jane  Doe").await;
    session.load_line_items(csv_loader::load_from_file(&fixture_path()).unwrap());

    let (summary, notifications) = session.export(&TextExporter::new(out_dir.path())).await;

    let summary = summary.expect("export should succeed");
    assert_eq!(summary.path, out_dir.path().join("INV-20250601-001_Jane_Doe.txt"));
    assert_eq!(summary.pages, 1);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "Export generated successfully!");

    let written = std::fs::read_to_string(&summary.path).unwrap();
    assert!(written.contains("Acme Studio"));
    assert!(written.contains("Logo design"));
    assert!(written.contains("$370.00"));
}

#[tokio::test]
async fn export_with_slash_in_client_stays_in_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path()).await;
    edit(&mut session, FormField::ClientName, "Smith/Jones Ltd").await;
    session.load_line_items(csv_loader::load_from_file(&fixture_path()).unwrap());

    let (summary, notifications) = session.export(&TextExporter::new(out_dir.path())).await;

    let summary = summary.expect("export should succeed");
    assert_eq!(
        summary.path,
        out_dir.path().join("INV-20250601-001_Smith_Jones_Ltd.txt")
    );
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert!(summary.path.exists());
}

#[tokio::test]
async fn failed_export_reports_error_and_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path()).await;
    edit(&mut session, FormField::ClientName, "Jane Doe").await;
    session.load_line_items(csv_loader::load_from_file(&fixture_path()).unwrap());
    let before = session.controller().snapshot().clone();

    let (summary, notifications) = session
        .export(&TextExporter::new(dir.path().join("missing")))
        .await;

    assert!(summary.is_none());
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(notifications[0].message, "Error generating export. Please try again.");
    assert_eq!(session.controller().snapshot(), &before);
}

#[tokio::test]
async fn reset_forgets_saved_fields() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut session = open(dir.path()).await;
        edit(&mut session, FormField::Notes, "Net 30").await;
        session.dispatch(InvoiceEvent::ResetRequested).await;
    }

    let session = open(dir.path()).await;

    assert_eq!(session.controller().snapshot().get(FormField::Notes), "");
}
