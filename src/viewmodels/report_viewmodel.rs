// ============================================================================
// REPORT VIEWMODEL - Reportes de asistencia/permisos y exportación PDF
// ============================================================================

use std::rc::Rc;

use crate::errors::ValidationError;
use crate::models::admin::{ReportFilter, ReportKind};
use crate::models::leave::parse_date;
use crate::services::traits::AdminApi;
use crate::state::{ChangeNotifier, ReportState};

use super::admin_viewmodel::load_error_message;

/// Valida el periodo antes de cualquier petición
pub fn build_filter(start: &str, end: &str, kind: ReportKind) -> Result<ReportFilter, ValidationError> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err(ValidationError::MissingPeriod);
    }
    let start_date = parse_date(start).ok_or(ValidationError::InvalidDate)?;
    let end_date = parse_date(end).ok_or(ValidationError::InvalidDate)?;
    if end_date < start_date {
        return Err(ValidationError::EndBeforeStart);
    }
    Ok(ReportFilter {
        start_date,
        end_date,
        kind,
    })
}

/// PDF listo para descargar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ReportViewModel {
    state: ReportState,
    api: Rc<dyn AdminApi>,
    notifier: ChangeNotifier,
}

impl ReportViewModel {
    pub fn new(state: ReportState, api: Rc<dyn AdminApi>, notifier: ChangeNotifier) -> Self {
        Self { state, api, notifier }
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn set_start_date(&self, value: String) {
        *self.state.start_date.borrow_mut() = value;
    }

    pub fn set_end_date(&self, value: String) {
        *self.state.end_date.borrow_mut() = value;
    }

    pub fn set_kind(&self, kind: ReportKind) {
        *self.state.kind.borrow_mut() = kind;
        self.state.rows.borrow_mut().clear();
        self.notifier.notify();
    }

    fn current_filter(&self) -> Result<ReportFilter, ValidationError> {
        build_filter(
            &self.state.get_start_date(),
            &self.state.get_end_date(),
            self.state.get_kind(),
        )
    }

    pub async fn load(&self) -> bool {
        let filter = match self.current_filter() {
            Ok(filter) => filter,
            Err(e) => {
                *self.state.error.borrow_mut() = Some(e.to_string());
                self.notifier.notify();
                return false;
            }
        };

        *self.state.loading.borrow_mut() = true;
        *self.state.error.borrow_mut() = None;
        self.notifier.notify();

        let result = self.api.report(&filter).await;
        let ok = match result {
            Ok(rows) => {
                log::info!("📑 [LAPORAN] {} filas ({})", rows.len(), filter.kind.as_wire());
                *self.state.rows.borrow_mut() = rows;
                true
            }
            Err(e) => {
                log::error!("❌ [LAPORAN] {}", e);
                *self.state.error.borrow_mut() = Some(load_error_message(&e).to_string());
                false
            }
        };
        *self.state.loading.borrow_mut() = false;
        self.notifier.notify();
        ok
    }

    /// Descarga el PDF del backend; la vista lo guarda como archivo
    pub async fn export_pdf(&self) -> Option<PdfExport> {
        let filter = match self.current_filter() {
            Ok(filter) => filter,
            Err(e) => {
                *self.state.error.borrow_mut() = Some(e.to_string());
                self.notifier.notify();
                return None;
            }
        };

        *self.state.exporting.borrow_mut() = true;
        *self.state.error.borrow_mut() = None;
        self.notifier.notify();

        let result = self.api.export_report_pdf(&filter).await;
        *self.state.exporting.borrow_mut() = false;

        let export = match result {
            Ok(bytes) => Some(PdfExport {
                file_name: filter.pdf_file_name(),
                bytes,
            }),
            Err(e) => {
                log::error!("❌ [LAPORAN] PDF: {}", e);
                *self.state.error.borrow_mut() = Some("Gagal download PDF".to_string());
                None
            }
        };
        self.notifier.notify();
        export
    }
}
