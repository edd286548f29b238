// ============================================================================
// SESSION STATE - Contexto de sesión + formularios de login/registro
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::auth::{Role, SessionIdentity};

/// Formulario de registro tal como lo escribe el usuario
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub division_id: String,
    pub position_id: String,
    pub join_date: String,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            password_confirmation: String::new(),
            division_id: "1".to_string(),
            position_id: "2".to_string(),
            join_date: String::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionState {
    pub identity: Rc<RefCell<Option<SessionIdentity>>>,
    pub login_email: Rc<RefCell<String>>,
    pub login_password: Rc<RefCell<String>>,
    pub login_error: Rc<RefCell<Option<String>>>,
    pub register_form: Rc<RefCell<RegisterForm>>,
    pub register_error: Rc<RefCell<Option<String>>>,
    /// Mensaje informativo en la pantalla de login (registro ok, sesión expirada...)
    pub notice: Rc<RefCell<Option<String>>>,
    pub busy: Rc<RefCell<bool>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot de la sesión actual
    pub fn get_identity(&self) -> Option<SessionIdentity> {
        self.identity.borrow().clone()
    }

    pub fn set_identity(&self, identity: Option<SessionIdentity>) {
        *self.identity.borrow_mut() = identity;
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.borrow().as_ref().map(|i| i.profile.role)
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.borrow().is_some()
    }

    pub fn get_login_error(&self) -> Option<String> {
        self.login_error.borrow().clone()
    }

    pub fn set_login_error(&self, error: Option<String>) {
        *self.login_error.borrow_mut() = error;
    }

    pub fn get_register_error(&self) -> Option<String> {
        self.register_error.borrow().clone()
    }

    pub fn set_register_error(&self, error: Option<String>) {
        *self.register_error.borrow_mut() = error;
    }

    pub fn get_notice(&self) -> Option<String> {
        self.notice.borrow().clone()
    }

    pub fn set_notice(&self, notice: Option<String>) {
        *self.notice.borrow_mut() = notice;
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    pub fn set_busy(&self, busy: bool) {
        *self.busy.borrow_mut() = busy;
    }
}
