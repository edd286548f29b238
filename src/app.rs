// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Construye servicios + viewmodels, restaura la sesión y re-renderiza #app en
// cada cambio de estado. El modal de asistencia vive en #modal-root y solo se
// reconstruye cuando cambia el intento o el modo (la cámara no se reinicia).
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, set_inner_html, ElementBuilder};
use crate::models::auth::Role;
use crate::services::{ApiClient, BrowserGeolocation, NotificationPoller, SessionStore};
use crate::state::{AcquisitionMode, AppState, Screen};
use crate::utils::qr_ffi;
use crate::viewmodels::{
    AdminViewModel, AttendanceViewModel, LeaveViewModel, NotificationViewModel, ReportViewModel,
    RosterViewModel, SessionViewModel,
};
use crate::views::{render_app, render_attendance_modal, update_attendance_modal};

/// Todo lo que una vista necesita: estado + viewmodels
#[derive(Clone)]
pub struct AppContext {
    pub state: AppState,
    pub session: SessionViewModel,
    pub attendance: AttendanceViewModel,
    pub leave: LeaveViewModel,
    pub admin: AdminViewModel,
    pub roster: RosterViewModel,
    pub reports: ReportViewModel,
    pub notifications: NotificationViewModel,
}

impl AppContext {
    /// Cableado de producción: un único ApiClient compartido por todas las interfaces
    pub fn browser(state: AppState) -> Self {
        let api = Rc::new(ApiClient::new());
        let geolocation = Rc::new(BrowserGeolocation::new());
        let notifier = state.notifier();

        Self {
            session: SessionViewModel::new(state.clone(), api.clone(), SessionStore::browser()),
            attendance: AttendanceViewModel::new(
                state.attendance.clone(),
                api.clone(),
                geolocation,
                notifier.clone(),
            ),
            leave: LeaveViewModel::new(state.leave.clone(), api.clone(), notifier.clone()),
            admin: AdminViewModel::new(state.admin.dashboard.clone(), api.clone(), notifier.clone()),
            roster: RosterViewModel::new(state.admin.roster.clone(), api.clone(), notifier.clone()),
            reports: ReportViewModel::new(state.admin.reports.clone(), api.clone(), notifier.clone()),
            notifications: NotificationViewModel::new(state.notifications.clone(), api, notifier),
            state,
        }
    }

    /// Carga inicial de la pantalla activa
    pub fn load_screen(&self, screen: Screen) {
        let ctx = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match screen {
                Screen::Dashboard => ctx.attendance.refresh_history().await,
                Screen::LeaveRequests => ctx.leave.load().await,
                Screen::AdminDashboard => ctx.admin.load().await,
                Screen::Employees => ctx.roster.load().await,
                Screen::Reports | Screen::Settings | Screen::Login | Screen::Register => {}
            }
        });
    }

    /// Navegación desde el menú: cambia de pantalla y dispara su carga
    pub fn go_to(&self, screen: Screen) {
        self.state.navigate(screen);
        self.load_screen(screen);
    }
}

/// Clave del modal renderizado: (intento, modo)
type ModalKey = (u64, AcquisitionMode);

/// Aplicación principal
pub struct App {
    ctx: AppContext,
    root: Element,
    modal_root: Element,
    modal_key: Option<ModalKey>,
    poller: NotificationPoller,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let modal_root = match get_element_by_id("modal-root") {
            Some(element) => element,
            None => {
                let element = ElementBuilder::new("div")?.id("modal-root")?.build();
                if let Some(parent) = root.parent_element() {
                    append_child(&parent, &element)?;
                }
                element
            }
        };

        let state = AppState::new();
        let ctx = AppContext::browser(state.clone());

        // Sesión guardada → pantalla inicial según el rol
        if let Some(role) = ctx.session.restore() {
            log::info!("💾 [APP] Sesión restaurada ({})", role.label());
            ctx.load_screen(Screen::home_for(role));
        }

        // Suscribirse a cambios de estado para re-renderizar automáticamente
        state.subscribe_to_changes(crate::schedule_rerender);

        Ok(Self {
            ctx,
            root,
            modal_root,
            modal_key: None,
            poller: NotificationPoller::new(),
        })
    }

    /// Renderizar aplicación
    pub fn render(&mut self) -> Result<(), JsValue> {
        set_inner_html(&self.root, "");
        let view = render_app(&self.ctx)?;
        append_child(&self.root, &view)?;

        self.sync_modal()?;
        self.sync_poller(self.ctx.state.session.role());
        Ok(())
    }

    /// Reconstruye el modal solo cuando cambia (intento, modo); si no, actualización incremental
    fn sync_modal(&mut self) -> Result<(), JsValue> {
        let state = &self.ctx.state.attendance;
        let key = state.get_modal().map(|m| (state.current_attempt(), m.mode));

        if key != self.modal_key {
            if matches!(self.modal_key, Some((_, AcquisitionMode::Camera))) {
                qr_ffi::stop_qr_scanner();
            }
            set_inner_html(&self.modal_root, "");
            if let Some(modal) = state.get_modal() {
                let element = render_attendance_modal(&self.ctx, modal)?;
                append_child(&self.modal_root, &element)?;
            }
            self.modal_key = key;
        }

        if self.modal_key.is_some() {
            update_attendance_modal(&self.ctx)?;
        }
        Ok(())
    }

    /// Polling de notificaciones atado a la sesión
    fn sync_poller(&mut self, role: Option<Role>) {
        match role {
            Some(_) => {
                let vm = self.ctx.notifications.clone();
                self.poller
                    .ensure_started(CONFIG.notification_poll_interval_ms(), move || {
                        let vm = vm.clone();
                        wasm_bindgen_futures::spawn_local(async move { vm.poll().await });
                    });
            }
            None => self.poller.stop(),
        }
    }
}
