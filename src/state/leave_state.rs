use std::cell::RefCell;
use std::rc::Rc;

use crate::models::leave::{LeaveDraft, LeaveRequest};
use crate::state::attendance_state::Banner;

/// Estado de la pantalla de permisos del empleado
#[derive(Clone, Default)]
pub struct LeaveState {
    pub requests: Rc<RefCell<Vec<LeaveRequest>>>,
    pub draft: Rc<RefCell<LeaveDraft>>,
    pub form_open: Rc<RefCell<bool>>,
    pub form_error: Rc<RefCell<Option<String>>>,
    pub banner: Rc<RefCell<Option<Banner>>>,
    pub loading: Rc<RefCell<bool>>,
    pub submitting: Rc<RefCell<bool>>,
}

impl LeaveState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_requests(&self) -> Vec<LeaveRequest> {
        self.requests.borrow().clone()
    }

    pub fn get_draft(&self) -> LeaveDraft {
        self.draft.borrow().clone()
    }

    pub fn is_form_open(&self) -> bool {
        *self.form_open.borrow()
    }

    pub fn get_form_error(&self) -> Option<String> {
        self.form_error.borrow().clone()
    }

    pub fn get_banner(&self) -> Option<Banner> {
        self.banner.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    pub fn reset(&self) {
        self.requests.borrow_mut().clear();
        *self.draft.borrow_mut() = LeaveDraft::default();
        *self.form_open.borrow_mut() = false;
        *self.form_error.borrow_mut() = None;
        *self.banner.borrow_mut() = None;
    }
}
