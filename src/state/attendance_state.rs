// ============================================================================
// ATTENDANCE STATE - Estado del flujo de asistencia y del historial
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::attendance::{AttendanceAction, AttendanceRecord, TodayStatus};

/// Fases del flujo de envío
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    #[default]
    Idle,
    LocationPending,
    Submitting,
    Succeeded,
    RecoverableFailure,
    FatalFailure,
}

impl WorkflowPhase {
    /// Hay un intento en curso (no se aceptan otros envíos)
    pub fn is_busy(&self) -> bool {
        matches!(self, WorkflowPhase::LocationPending | WorkflowPhase::Submitting)
    }
}

/// Método de captura del token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionMode {
    Camera,
    Manual,
}

/// Modal abierto (solo uno a la vez)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceModal {
    pub action: AttendanceAction,
    pub mode: AcquisitionMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
    Info,
}

/// Mensaje visible fuera del modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: BannerKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: BannerKind::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: BannerKind::Info, message: message.into() }
    }
}

#[derive(Clone, Default)]
pub struct AttendanceState {
    pub phase: Rc<RefCell<WorkflowPhase>>,
    pub modal: Rc<RefCell<Option<AttendanceModal>>>,
    pub token_input: Rc<RefCell<String>>,
    pub modal_error: Rc<RefCell<Option<String>>>,
    pub banner: Rc<RefCell<Option<Banner>>>,
    pub history: Rc<RefCell<Vec<AttendanceRecord>>>,
    pub today: Rc<RefCell<TodayStatus>>,
    pub history_error: Rc<RefCell<Option<String>>>,
    pub history_loading: Rc<RefCell<bool>>,
    /// Se incrementa en cada apertura/cancelación; invalida resultados tardíos
    pub attempt: Rc<RefCell<u64>>,
}

impl AttendanceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_phase(&self) -> WorkflowPhase {
        *self.phase.borrow()
    }

    pub fn set_phase(&self, phase: WorkflowPhase) {
        *self.phase.borrow_mut() = phase;
    }

    pub fn get_modal(&self) -> Option<AttendanceModal> {
        *self.modal.borrow()
    }

    pub fn set_modal(&self, modal: Option<AttendanceModal>) {
        *self.modal.borrow_mut() = modal;
    }

    pub fn get_token_input(&self) -> String {
        self.token_input.borrow().clone()
    }

    pub fn set_token_input(&self, value: String) {
        *self.token_input.borrow_mut() = value;
    }

    pub fn get_modal_error(&self) -> Option<String> {
        self.modal_error.borrow().clone()
    }

    pub fn set_modal_error(&self, error: Option<String>) {
        *self.modal_error.borrow_mut() = error;
    }

    pub fn get_banner(&self) -> Option<Banner> {
        self.banner.borrow().clone()
    }

    pub fn set_banner(&self, banner: Option<Banner>) {
        *self.banner.borrow_mut() = banner;
    }

    pub fn get_history(&self) -> Vec<AttendanceRecord> {
        self.history.borrow().clone()
    }

    pub fn get_today(&self) -> TodayStatus {
        self.today.borrow().clone()
    }

    pub fn get_history_error(&self) -> Option<String> {
        self.history_error.borrow().clone()
    }

    pub fn is_history_loading(&self) -> bool {
        *self.history_loading.borrow()
    }

    pub fn current_attempt(&self) -> u64 {
        *self.attempt.borrow()
    }

    /// Nuevo intento; devuelve su número
    pub fn next_attempt(&self) -> u64 {
        let mut attempt = self.attempt.borrow_mut();
        *attempt += 1;
        *attempt
    }

    /// Limpia todo al cerrar sesión
    pub fn reset(&self) {
        self.set_phase(WorkflowPhase::Idle);
        self.set_modal(None);
        self.set_token_input(String::new());
        self.set_modal_error(None);
        self.set_banner(None);
        self.history.borrow_mut().clear();
        *self.today.borrow_mut() = TodayStatus::default();
        *self.history_error.borrow_mut() = None;
        self.next_attempt();
    }
}
