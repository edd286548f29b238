// ============================================================================
// ADMIN STATE - Dashboard diario, plantilla y reportes
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::admin::{AdminLeave, DailyStats, GeneratedToken, ReportKind, ReportRow};
use crate::models::employee::{Employee, NewEmployee};
use crate::state::attendance_state::Banner;

#[derive(Clone, Default)]
pub struct DashboardState {
    pub stats: Rc<RefCell<DailyStats>>,
    pub leaves: Rc<RefCell<Vec<AdminLeave>>>,
    pub error: Rc<RefCell<Option<String>>>,
    pub banner: Rc<RefCell<Option<Banner>>>,
    pub token: Rc<RefCell<Option<GeneratedToken>>>,
    pub token_error: Rc<RefCell<Option<String>>>,
    pub loading: Rc<RefCell<bool>>,
}

impl DashboardState {
    pub fn get_stats(&self) -> DailyStats {
        self.stats.borrow().clone()
    }

    pub fn get_leaves(&self) -> Vec<AdminLeave> {
        self.leaves.borrow().clone()
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn get_banner(&self) -> Option<Banner> {
        self.banner.borrow().clone()
    }

    pub fn get_token(&self) -> Option<GeneratedToken> {
        self.token.borrow().clone()
    }

    pub fn get_token_error(&self) -> Option<String> {
        self.token_error.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }
}

#[derive(Clone, Default)]
pub struct RosterState {
    pub employees: Rc<RefCell<Vec<Employee>>>,
    pub query: Rc<RefCell<String>>,
    pub draft: Rc<RefCell<NewEmployee>>,
    pub form_open: Rc<RefCell<bool>>,
    pub form_error: Rc<RefCell<Option<String>>>,
    pub error: Rc<RefCell<Option<String>>>,
    pub banner: Rc<RefCell<Option<Banner>>>,
    pub loading: Rc<RefCell<bool>>,
}

impl RosterState {
    pub fn get_query(&self) -> String {
        self.query.borrow().clone()
    }

    /// Empleados que coinciden con la búsqueda actual
    pub fn filtered(&self) -> Vec<Employee> {
        let query = self.query.borrow();
        self.employees
            .borrow()
            .iter()
            .filter(|e| e.matches(&query))
            .cloned()
            .collect()
    }

    pub fn get_draft(&self) -> NewEmployee {
        self.draft.borrow().clone()
    }

    pub fn is_form_open(&self) -> bool {
        *self.form_open.borrow()
    }

    pub fn get_form_error(&self) -> Option<String> {
        self.form_error.borrow().clone()
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn get_banner(&self) -> Option<Banner> {
        self.banner.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }
}

#[derive(Clone, Default)]
pub struct ReportState {
    pub start_date: Rc<RefCell<String>>,
    pub end_date: Rc<RefCell<String>>,
    pub kind: Rc<RefCell<ReportKind>>,
    pub rows: Rc<RefCell<Vec<ReportRow>>>,
    pub error: Rc<RefCell<Option<String>>>,
    pub loading: Rc<RefCell<bool>>,
    pub exporting: Rc<RefCell<bool>>,
}

impl ReportState {
    pub fn get_start_date(&self) -> String {
        self.start_date.borrow().clone()
    }

    pub fn get_end_date(&self) -> String {
        self.end_date.borrow().clone()
    }

    pub fn get_kind(&self) -> ReportKind {
        *self.kind.borrow()
    }

    pub fn get_rows(&self) -> Vec<ReportRow> {
        self.rows.borrow().clone()
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn is_exporting(&self) -> bool {
        *self.exporting.borrow()
    }
}

/// Todo el estado de administración
#[derive(Clone, Default)]
pub struct AdminState {
    pub dashboard: DashboardState,
    pub roster: RosterState,
    pub reports: ReportState,
}

impl AdminState {
    pub fn new() -> Self {
        Self::default()
    }
}
