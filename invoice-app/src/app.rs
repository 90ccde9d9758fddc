use chrono::NaiveDate;
use invoice_core::controller::Effect;
use invoice_core::export::{
    DocumentExporter, ExportSummary, PageLayout, export_document, export_notification,
};
use invoice_core::store::{BackendRegistry, MemoryRepositoryFactory, StoreConfig};
use invoice_core::{
    FormDefaults, FormStateStore, InvoiceController, InvoiceEvent, Notification, Outcome,
    RepositoryError,
};
use invoice_store_sqlite::SqliteRepositoryFactory;
use tracing::{debug, error, info};

use crate::csv_loader::LineItemRow;

/// Every storage backend this binary knows about.
pub fn build_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry
        .register(Box::new(MemoryRepositoryFactory))
        .register(Box::new(SqliteRepositoryFactory));
    registry
}

/// A controller bound to persistent form state.
///
/// Persistence effects returned by the controller are carried out here;
/// presentation effects are left to the caller.
pub struct InvoiceSession {
    controller: InvoiceController,
    store: FormStateStore,
}

impl InvoiceSession {
    /// Opens the configured store and restores any saved form fields on top
    /// of the defaults for `today`.
    pub async fn open(
        registry: &BackendRegistry,
        store_config: &StoreConfig,
        defaults: FormDefaults,
        today: NaiveDate,
    ) -> Result<Self, RepositoryError> {
        debug!(backend = %store_config.backend, "opening form store");
        let store = registry.open_form_store(store_config).await?;
        Ok(Self::with_store(store, defaults, today).await)
    }

    pub async fn with_store(
        store: FormStateStore,
        defaults: FormDefaults,
        today: NaiveDate,
    ) -> Self {
        let mut controller = InvoiceController::new(defaults, today);
        store.load(controller.snapshot_mut()).await;
        Self { controller, store }
    }

    pub fn controller(&self) -> &InvoiceController {
        &self.controller
    }

    /// Handles `event` and applies its persistence effects.
    pub async fn dispatch(
        &mut self,
        event: InvoiceEvent,
    ) -> Outcome {
        let mut outcome = self.controller.handle(event);
        self.apply_persistence(&mut outcome).await;
        outcome
    }

    pub fn load_line_items(
        &mut self,
        rows: Vec<LineItemRow>,
    ) -> Outcome {
        info!(rows = rows.len(), "line items loaded");
        self.controller
            .replace_line_items(rows.into_iter().map(LineItemRow::into_cells))
    }

    /// Validates, then exports through `exporter`.
    ///
    /// Returns the validation errors when blocked, otherwise the single
    /// export success or failure notification.
    pub async fn export<E: DocumentExporter>(
        &mut self,
        exporter: &E,
    ) -> (Option<ExportSummary>, Vec<Notification>) {
        let outcome = self.dispatch(InvoiceEvent::ExportRequested).await;
        let file_stem = outcome.effects.iter().find_map(|effect| match effect {
            Effect::Export { file_stem } => Some(file_stem.clone()),
            _ => None,
        });
        let Some(file_stem) = file_stem else {
            return (None, outcome.notifications);
        };

        let document = self.controller.document();
        let result = export_document(exporter, &document, &file_stem, PageLayout::A4).await;
        let notification = export_notification(&result);
        (result.ok(), vec![notification])
    }

    async fn apply_persistence(
        &self,
        outcome: &mut Outcome,
    ) {
        for effect in &outcome.effects {
            let result = match effect {
                Effect::SaveSnapshot => self.store.save(self.controller.snapshot()).await,
                Effect::ClearSnapshot => self.store.clear().await,
                _ => continue,
            };
            if let Err(e) = result {
                error!(?effect, error = %e, "form state not persisted");
                outcome
                    .notifications
                    .push(Notification::error(format!("Could not update saved form data: {e}")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use invoice_core::controller::{RESET_MESSAGE, SAVED_MESSAGE};
    use invoice_core::store::MemoryRepository;
    use invoice_core::{FormField, NotificationKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn memory_config() -> StoreConfig {
        StoreConfig::default()
    }

    async fn session() -> InvoiceSession {
        InvoiceSession::open(&build_registry(), &memory_config(), FormDefaults::default(), today())
            .await
            .unwrap()
    }

    #[test]
    fn registry_knows_memory_and_sqlite() {
        assert_eq!(build_registry().backends(), vec!["memory", "sqlite"]);
    }

    #[tokio::test]
    async fn unknown_backend_fails_to_open() {
        let config = StoreConfig::new("postgres", "");

        let result = InvoiceSession::open(&build_registry(), &config, FormDefaults::default(), today()).await;

        assert!(matches!(result, Err(RepositoryError::Configuration(_))));
    }

    #[tokio::test]
    async fn field_edit_is_persisted() {
        let store = FormStateStore::new(Box::new(MemoryRepository::new()));
        let mut session = InvoiceSession::with_store(store, FormDefaults::default(), today()).await;

        session
            .dispatch(InvoiceEvent::FieldEdited {
                field: FormField::ClientName,
                value: "Jane Doe".to_string(),
            })
            .await;

        let mut restored = invoice_core::FormSnapshot::new();
        assert!(session.store.load(&mut restored).await > 0);
        assert_eq!(restored.get(FormField::ClientName), "Jane Doe");
    }

    #[tokio::test]
    async fn save_and_reset_notify() {
        let mut session = session().await;

        let saved = session.dispatch(InvoiceEvent::SaveRequested).await;
        let reset = session.dispatch(InvoiceEvent::ResetRequested).await;

        assert_eq!(saved.notifications, vec![Notification::success(SAVED_MESSAGE)]);
        assert_eq!(reset.notifications, vec![Notification::success(RESET_MESSAGE)]);
    }

    #[tokio::test]
    async fn reset_clears_saved_state() {
        let store = FormStateStore::new(Box::new(MemoryRepository::new()));
        let mut session = InvoiceSession::with_store(store, FormDefaults::default(), today()).await;
        session
            .dispatch(InvoiceEvent::FieldEdited {
                field: FormField::Notes,
                value: "keep me".to_string(),
            })
            .await;

        session.dispatch(InvoiceEvent::ResetRequested).await;

        let mut restored = invoice_core::FormSnapshot::new();
        assert_eq!(session.store.load(&mut restored).await, 0);
        assert_eq!(session.controller().snapshot().get(FormField::Notes), "");
    }

    #[tokio::test]
    async fn blocked_export_returns_validation_errors() {
        let mut session = session().await;
        let exporter = crate::exporter::TextExporter::new("does-not-matter");

        let (summary, notifications) = session.export(&exporter).await;

        assert!(summary.is_none());
        assert!(!notifications.is_empty());
        assert!(notifications.iter().all(|n| n.kind == NotificationKind::Error));
    }
}
