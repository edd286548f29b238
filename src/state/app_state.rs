// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::auth::Role;
use crate::state::{
    AdminState, AttendanceState, ChangeNotifier, LeaveState, NotificationState, SessionState,
};

/// Pantallas de la aplicación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
    LeaveRequests,
    AdminDashboard,
    Employees,
    Reports,
    Settings,
}

impl Screen {
    /// Pantalla inicial según el rol
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Screen::AdminDashboard,
            Role::Employee => Screen::Dashboard,
        }
    }

    /// Menú lateral por rol
    pub fn menu_for(role: Role) -> &'static [Screen] {
        match role {
            Role::Admin => &[
                Screen::AdminDashboard,
                Screen::Employees,
                Screen::Reports,
                Screen::Settings,
            ],
            Role::Employee => &[Screen::Dashboard, Screen::LeaveRequests, Screen::Settings],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Register => "Registrasi",
            Screen::Dashboard => "Dashboard",
            Screen::LeaveRequests => "Permohonan Cuti",
            Screen::AdminDashboard => "Dashboard Admin",
            Screen::Employees => "Data Karyawan",
            Screen::Reports => "Laporan Harian",
            Screen::Settings => "Settings",
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Screen::Login | Screen::Register)
    }
}

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub attendance: AttendanceState,
    pub leave: LeaveState,
    pub admin: AdminState,
    pub notifications: NotificationState,

    pub screen: Rc<RefCell<Screen>>,
    pub sidebar_open: Rc<RefCell<bool>>,

    notifier: ChangeNotifier,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            attendance: AttendanceState::new(),
            leave: LeaveState::new(),
            admin: AdminState::new(),
            notifications: NotificationState::new(),
            screen: Rc::new(RefCell::new(Screen::Login)),
            sidebar_open: Rc::new(RefCell::new(false)),
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn notifier(&self) -> ChangeNotifier {
        self.notifier.clone()
    }

    /// Suscribirse a cambios de estado (la App re-renderiza)
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.notifier.subscribe(callback);
    }

    pub fn get_screen(&self) -> Screen {
        *self.screen.borrow()
    }

    /// Pantalla efectiva: sin sesión solo hay pantallas públicas
    pub fn current_screen(&self) -> Screen {
        let screen = self.get_screen();
        match self.session.role() {
            None if screen.is_public() => screen,
            None => Screen::Login,
            Some(role) if screen.is_public() => Screen::home_for(role),
            Some(_) => screen,
        }
    }

    pub fn navigate(&self, screen: Screen) {
        log::info!("🧭 [NAV] {:?}", screen);
        *self.screen.borrow_mut() = screen;
        *self.sidebar_open.borrow_mut() = false;
        self.notifier.notify();
    }

    pub fn toggle_sidebar(&self) {
        let open = !*self.sidebar_open.borrow();
        *self.sidebar_open.borrow_mut() = open;
        self.notifier.notify();
    }

    pub fn is_sidebar_open(&self) -> bool {
        *self.sidebar_open.borrow()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{SessionIdentity, UserProfile};

    fn login_as(state: &AppState, role: Role) {
        state.session.set_identity(Some(SessionIdentity {
            auth_token: "t".into(),
            profile: UserProfile {
                name: "Uji".into(),
                email: "uji@damirich.id".into(),
                role,
                attendance_token: None,
            },
        }));
    }

    #[test]
    fn menus_per_role() {
        assert_eq!(Screen::menu_for(Role::Employee)[0], Screen::Dashboard);
        assert!(Screen::menu_for(Role::Admin).contains(&Screen::Reports));
        assert!(!Screen::menu_for(Role::Employee).contains(&Screen::Employees));
    }

    #[test]
    fn without_session_only_public_screens() {
        let state = AppState::new();
        state.navigate(Screen::Reports);
        assert_eq!(state.current_screen(), Screen::Login);
        state.navigate(Screen::Register);
        assert_eq!(state.current_screen(), Screen::Register);
    }

    #[test]
    fn logged_in_user_skips_login_screen() {
        let state = AppState::new();
        login_as(&state, Role::Admin);
        assert_eq!(state.current_screen(), Screen::AdminDashboard);
        state.navigate(Screen::Employees);
        assert_eq!(state.current_screen(), Screen::Employees);
    }
}
