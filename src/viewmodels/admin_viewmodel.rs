// ============================================================================
// ADMIN VIEWMODEL - Dashboard diario, decisiones de permisos y token QR
// ============================================================================

use std::rc::Rc;

use crate::errors::ApiError;
use crate::models::leave::LeaveStatus;
use crate::services::traits::AdminApi;
use crate::state::{Banner, ChangeNotifier, DashboardState};

pub const ACCESS_DENIED: &str = "Akses Ditolak! Anda login sebagai Karyawan Biasa, bukan Admin.";
pub const LOAD_FAILED: &str = "Gagal memuat data. Pastikan server backend menyala.";
const TOKEN_FAILED: &str = "Gagal membuat token QR.";
const DECISION_FAILED: &str = "Gagal memperbarui status cuti.";

/// Mensaje de error de carga: 403 tiene uno propio
pub fn load_error_message(error: &ApiError) -> &'static str {
    match error.status() {
        Some(403) => ACCESS_DENIED,
        _ => LOAD_FAILED,
    }
}

#[derive(Clone)]
pub struct AdminViewModel {
    state: DashboardState,
    api: Rc<dyn AdminApi>,
    notifier: ChangeNotifier,
}

impl AdminViewModel {
    pub fn new(state: DashboardState, api: Rc<dyn AdminApi>, notifier: ChangeNotifier) -> Self {
        Self { state, api, notifier }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Estadísticas + solicitudes de permiso
    pub async fn load(&self) {
        *self.state.loading.borrow_mut() = true;
        *self.state.error.borrow_mut() = None;
        self.notifier.notify();

        let result = async {
            let stats = self.api.daily_stats().await?;
            let leaves = self.api.pending_leaves().await?;
            Ok::<_, ApiError>((stats, leaves))
        }
        .await;

        match result {
            Ok((stats, leaves)) => {
                log::info!("📊 [ADMIN] {} empleados, {} solicitudes", stats.total_employees, leaves.len());
                *self.state.stats.borrow_mut() = stats;
                *self.state.leaves.borrow_mut() = leaves;
            }
            Err(e) => {
                log::error!("❌ [ADMIN] {}", e);
                *self.state.error.borrow_mut() = Some(load_error_message(&e).to_string());
            }
        }
        *self.state.loading.borrow_mut() = false;
        self.notifier.notify();
    }

    /// Aprueba o rechaza; la lista local se actualiza sin recargar
    pub async fn decide(&self, id: u64, status: LeaveStatus) -> bool {
        let result = self.api.decide_leave(id, status).await;
        match result {
            Ok(()) => {
                if let Some(leave) = self.state.leaves.borrow_mut().iter_mut().find(|l| l.id == id) {
                    leave.status = status;
                }
                *self.state.banner.borrow_mut() = Some(Banner::success(format!(
                    "Status cuti diperbarui: {}",
                    status.label()
                )));
                self.notifier.notify();
                true
            }
            Err(e) => {
                log::error!("❌ [ADMIN] Decisión {} falló: {}", id, e);
                *self.state.banner.borrow_mut() = Some(Banner::error(
                    e.backend_message().unwrap_or(DECISION_FAILED).to_string(),
                ));
                self.notifier.notify();
                false
            }
        }
    }

    pub async fn generate_token(&self) -> bool {
        *self.state.token_error.borrow_mut() = None;
        let result = self.api.generate_token().await;
        let ok = match result {
            Ok(token) => {
                log::info!("🔑 [ADMIN] Token QR generado (expira {:?})", token.expires_at);
                *self.state.token.borrow_mut() = Some(token);
                true
            }
            Err(e) => {
                log::error!("❌ [ADMIN] {}", e);
                *self.state.token_error.borrow_mut() =
                    Some(e.backend_message().unwrap_or(TOKEN_FAILED).to_string());
                false
            }
        };
        self.notifier.notify();
        ok
    }

    pub fn dismiss_banner(&self) {
        *self.state.banner.borrow_mut() = None;
        self.notifier.notify();
    }

    pub fn pending_count(&self) -> usize {
        self.state
            .leaves
            .borrow()
            .iter()
            .filter(|l| l.status == LeaveStatus::Pending)
            .count()
    }
}
