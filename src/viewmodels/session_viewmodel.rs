// ============================================================================
// SESSION VIEWMODEL - Login, registro, restauración y logout
// ============================================================================
// Única vía para crear/destruir la SessionIdentity.
// ============================================================================

use std::rc::Rc;

use crate::errors::{ApiError, ValidationError};
use crate::models::auth::{LoginRequest, RegisterRequest, Role, SessionIdentity, UserProfile};
use crate::models::leave::parse_date;
use crate::services::session_store::SessionStore;
use crate::services::traits::AuthApi;
use crate::state::{AppState, RegisterForm, Screen};

const LOGIN_FALLBACK: &str = "Email atau password salah.";
const TOKEN_MISSING: &str = "Token tidak ditemukan";
const USER_MISSING: &str = "Data pengguna tidak ditemukan";
const REGISTER_FALLBACK: &str = "Terjadi kesalahan. Cek koneksi server.";
const REGISTER_SUCCESS: &str = "Registrasi berhasil! Silakan login.";

/// ViewModel de sesión - SOLO lógica de negocio
#[derive(Clone)]
pub struct SessionViewModel {
    app: AppState,
    api: Rc<dyn AuthApi>,
    store: SessionStore,
}

impl SessionViewModel {
    pub fn new(app: AppState, api: Rc<dyn AuthApi>, store: SessionStore) -> Self {
        Self { app, api, store }
    }

    /// Restaura la sesión guardada al arrancar.
    /// Perfil corrupto → claves borradas, login forzado con aviso.
    pub fn restore(&self) -> Option<Role> {
        let role = match self.store.load() {
            Ok(Some(identity)) => {
                log::info!("💾 [SESSION] Sesión restaurada para {}", identity.profile.email);
                let role = identity.profile.role;
                self.api.set_bearer(Some(identity.auth_token.clone()));
                self.app.session.set_identity(Some(identity));
                *self.app.screen.borrow_mut() = Screen::home_for(role);
                Some(role)
            }
            Ok(None) => None,
            Err(error) => {
                log::error!("❌ [SESSION] {}", error);
                self.app.session.set_identity(None);
                self.app.session.set_notice(Some(error.to_string()));
                *self.app.screen.borrow_mut() = Screen::Login;
                None
            }
        };
        self.app.notifier().notify();
        role
    }

    pub fn set_login_email(&self, email: String) {
        *self.app.session.login_email.borrow_mut() = email;
    }

    pub fn set_login_password(&self, password: String) {
        *self.app.session.login_password.borrow_mut() = password;
    }

    pub fn update_register_form<F: FnOnce(&mut RegisterForm)>(&self, update: F) {
        update(&mut self.app.session.register_form.borrow_mut());
    }

    pub async fn login(&self) -> Result<Role, String> {
        if self.app.session.is_busy() {
            return Err("Sedang memproses...".to_string());
        }
        let email = self.app.session.login_email.borrow().trim().to_string();
        let password = self.app.session.login_password.borrow().clone();

        if email.is_empty() || password.is_empty() {
            let message = ValidationError::MissingCredentials.to_string();
            self.app.session.set_login_error(Some(message.clone()));
            self.app.notifier().notify();
            return Err(message);
        }

        self.app.session.set_busy(true);
        self.app.session.set_login_error(None);
        self.app.session.set_notice(None);
        self.app.notifier().notify();

        let result = self.api.login(&LoginRequest { email, password }).await;
        let result = result
            .map_err(|e| e.backend_message().unwrap_or(LOGIN_FALLBACK).to_string())
            .and_then(|response| {
                let token = response
                    .access_token
                    .filter(|t| !t.trim().is_empty())
                    .ok_or_else(|| TOKEN_MISSING.to_string())?;
                let user = response.user.ok_or_else(|| USER_MISSING.to_string())?;
                Ok(SessionIdentity {
                    auth_token: token,
                    profile: UserProfile::from(user),
                })
            });

        self.app.session.set_busy(false);

        match result {
            Ok(identity) => {
                let role = identity.profile.role;
                if let Err(e) = self.store.save(&identity) {
                    log::error!("❌ [SESSION] Error guardando sesión: {}", e);
                }
                self.api.set_bearer(Some(identity.auth_token.clone()));
                self.app.session.set_identity(Some(identity));
                *self.app.session.login_password.borrow_mut() = String::new();
                log::info!("✅ [AUTH] Login correcto ({:?})", role);
                self.app.navigate(Screen::home_for(role));
                Ok(role)
            }
            Err(message) => {
                log::warn!("⚠️ [AUTH] Login fallido: {}", message);
                self.app.session.set_login_error(Some(message.clone()));
                self.app.notifier().notify();
                Err(message)
            }
        }
    }

    fn validate_register(form: &RegisterForm) -> Result<RegisterRequest, ValidationError> {
        let required = [
            &form.name,
            &form.email,
            &form.password,
            &form.password_confirmation,
            &form.join_date,
        ];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err(ValidationError::MissingFields);
        }
        if form.password != form.password_confirmation {
            return Err(ValidationError::PasswordMismatch);
        }
        let divisi_id = form.division_id.trim().parse().map_err(|_| ValidationError::MissingFields)?;
        let posisi_id = form.position_id.trim().parse().map_err(|_| ValidationError::MissingFields)?;
        let join_date = parse_date(&form.join_date).ok_or(ValidationError::InvalidDate)?;

        Ok(RegisterRequest {
            nama: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
            password_confirmation: form.password_confirmation.clone(),
            divisi_id,
            posisi_id,
            tanggal_masuk: join_date.format("%Y-%m-%d").to_string(),
        })
    }

    pub async fn register(&self) -> Result<(), String> {
        let form = self.app.session.register_form.borrow().clone();
        let request = match Self::validate_register(&form) {
            Ok(request) => request,
            Err(e) => {
                self.app.session.set_register_error(Some(e.to_string()));
                self.app.notifier().notify();
                return Err(e.to_string());
            }
        };

        self.app.session.set_busy(true);
        self.app.session.set_register_error(None);
        self.app.notifier().notify();

        let result = self.api.register(&request).await;
        self.app.session.set_busy(false);

        match result {
            Ok(message) => {
                log::info!("✅ [AUTH] Registro completado para {}", request.email);
                *self.app.session.register_form.borrow_mut() = RegisterForm::default();
                self.app.session.set_notice(Some(
                    message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| REGISTER_SUCCESS.to_string()),
                ));
                self.app.navigate(Screen::Login);
                Ok(())
            }
            Err(error) => {
                let message = match &error {
                    ApiError::Http { .. } => error
                        .backend_message()
                        .unwrap_or(REGISTER_FALLBACK)
                        .to_string(),
                    _ => REGISTER_FALLBACK.to_string(),
                };
                self.app.session.set_register_error(Some(message.clone()));
                self.app.notifier().notify();
                Err(message)
            }
        }
    }

    /// Cierra sesión: borra claves, token y estado en memoria
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            log::error!("❌ [SESSION] Error limpiando storage: {}", e);
        }
        self.api.set_bearer(None);
        self.app.session.set_identity(None);
        self.app.session.set_login_error(None);
        self.app.attendance.reset();
        self.app.leave.reset();
        self.app.notifications.reset();
        log::info!("👋 [SESSION] Logout completado");
        self.app.navigate(Screen::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{LoginResponse, RawUser};
    use crate::services::session_store::{KeyValueStore, MemoryStorage, AUTH_TOKEN_KEY, USER_INFO_KEY};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeAuthApi {
        bearer: RefCell<Option<String>>,
        login_result: RefCell<Option<Result<LoginResponse, ApiError>>>,
        register_result: RefCell<Option<Result<Option<String>, ApiError>>>,
        register_calls: RefCell<Vec<RegisterRequest>>,
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeAuthApi {
        fn set_bearer(&self, token: Option<String>) {
            *self.bearer.borrow_mut() = token;
        }

        async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, ApiError> {
            self.login_result
                .borrow_mut()
                .take()
                .unwrap_or(Err(ApiError::Network("offline".into())))
        }

        async fn register(&self, request: &RegisterRequest) -> Result<Option<String>, ApiError> {
            self.register_calls.borrow_mut().push(request.clone());
            self.register_result.borrow_mut().take().unwrap_or(Ok(None))
        }
    }

    fn login_response(posisi: serde_json::Value, token: Option<&str>) -> LoginResponse {
        let user: RawUser =
            serde_json::from_value(json!({"nama": "Rina Wati", "email": "rina@damirich.id", "posisi_id": posisi}))
                .unwrap();
        LoginResponse {
            access_token: token.map(str::to_string),
            user: Some(user),
        }
    }

    fn setup() -> (SessionViewModel, Rc<FakeAuthApi>, MemoryStorage, AppState) {
        let app = AppState::new();
        let api = Rc::new(FakeAuthApi::default());
        let memory = MemoryStorage::default();
        let store = SessionStore::new(Rc::new(memory.clone()));
        let vm = SessionViewModel::new(app.clone(), api.clone(), store);
        (vm, api, memory, app)
    }

    #[test]
    fn admin_login_lands_on_admin_dashboard() {
        let (vm, api, memory, app) = setup();
        *api.login_result.borrow_mut() = Some(Ok(login_response(json!("1"), Some("tok-1"))));
        vm.set_login_email("rina@damirich.id".into());
        vm.set_login_password("rahasia".into());

        assert_eq!(block_on(vm.login()), Ok(Role::Admin));
        assert_eq!(app.current_screen(), Screen::AdminDashboard);
        assert_eq!(api.bearer.borrow().as_deref(), Some("tok-1"));
        assert_eq!(memory.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
        assert!(memory.get(USER_INFO_KEY).unwrap().is_some());
    }

    #[test]
    fn employee_login_lands_on_dashboard() {
        let (vm, api, _, app) = setup();
        *api.login_result.borrow_mut() = Some(Ok(login_response(json!(3), Some("tok-2"))));
        vm.set_login_email("a@b.id".into());
        vm.set_login_password("x".into());
        assert_eq!(block_on(vm.login()), Ok(Role::Employee));
        assert_eq!(app.current_screen(), Screen::Dashboard);
    }

    #[test]
    fn missing_access_token_is_an_error() {
        let (vm, api, memory, app) = setup();
        *api.login_result.borrow_mut() = Some(Ok(login_response(json!(3), None)));
        vm.set_login_email("a@b.id".into());
        vm.set_login_password("x".into());
        assert_eq!(block_on(vm.login()), Err(TOKEN_MISSING.to_string()));
        assert!(!app.session.is_logged_in());
        assert_eq!(memory.get(AUTH_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn empty_credentials_rejected_locally() {
        let (vm, api, _, app) = setup();
        *api.login_result.borrow_mut() = Some(Ok(login_response(json!(1), Some("t"))));
        assert!(block_on(vm.login()).is_err());
        // la respuesta programada sigue sin consumir
        assert!(api.login_result.borrow().is_some());
        assert_eq!(
            app.session.get_login_error(),
            Some(ValidationError::MissingCredentials.to_string())
        );
    }

    #[test]
    fn backend_login_error_message_or_fallback() {
        let (vm, api, _, app) = setup();
        vm.set_login_email("a@b.id".into());
        vm.set_login_password("x".into());
        *api.login_result.borrow_mut() = Some(Err(ApiError::Http { status: 401, message: "Akun dinonaktifkan".into() }));
        block_on(vm.login()).unwrap_err();
        assert_eq!(app.session.get_login_error().as_deref(), Some("Akun dinonaktifkan"));

        block_on(vm.login()).unwrap_err();
        assert_eq!(app.session.get_login_error().as_deref(), Some(LOGIN_FALLBACK));
    }

    #[test]
    fn restore_round_trip_and_corruption() {
        let (vm, api, memory, app) = setup();
        *api.login_result.borrow_mut() = Some(Ok(login_response(json!(1), Some("tok"))));
        vm.set_login_email("a@b.id".into());
        vm.set_login_password("x".into());
        block_on(vm.login()).unwrap();

        let fresh = AppState::new();
        let restored = SessionViewModel::new(fresh.clone(), api.clone(), SessionStore::new(Rc::new(memory.clone())));
        assert_eq!(restored.restore(), Some(Role::Admin));
        assert_eq!(fresh.session.get_identity(), app.session.get_identity());

        memory.set(USER_INFO_KEY, "{rusak").unwrap();
        let broken = AppState::new();
        let vm = SessionViewModel::new(broken.clone(), api, SessionStore::new(Rc::new(memory.clone())));
        assert_eq!(vm.restore(), None);
        assert_eq!(broken.current_screen(), Screen::Login);
        assert!(broken.session.get_notice().is_some());
        assert_eq!(memory.get(AUTH_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn logout_clears_everything() {
        let (vm, api, memory, app) = setup();
        *api.login_result.borrow_mut() = Some(Ok(login_response(json!(2), Some("tok"))));
        vm.set_login_email("a@b.id".into());
        vm.set_login_password("x".into());
        block_on(vm.login()).unwrap();
        app.attendance.set_token_input("ABC".into());

        vm.logout();
        assert!(!app.session.is_logged_in());
        assert_eq!(api.bearer.borrow().clone(), None);
        assert_eq!(memory.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert_eq!(app.attendance.get_token_input(), "");
        assert_eq!(app.current_screen(), Screen::Login);
    }

    fn filled_form() -> RegisterForm {
        RegisterForm {
            name: "Budi Santoso".into(),
            email: "budi@damirich.id".into(),
            password: "rahasia123".into(),
            password_confirmation: "rahasia123".into(),
            division_id: "2".into(),
            position_id: "2".into(),
            join_date: "2026-10-01".into(),
        }
    }

    #[test]
    fn register_validates_before_request() {
        let (vm, api, _, app) = setup();
        vm.update_register_form(|f| {
            *f = filled_form();
            f.password_confirmation = "beda".into();
        });
        assert_eq!(block_on(vm.register()), Err(ValidationError::PasswordMismatch.to_string()));

        vm.update_register_form(|f| f.email.clear());
        assert_eq!(block_on(vm.register()), Err(ValidationError::MissingFields.to_string()));
        assert!(api.register_calls.borrow().is_empty());
        assert!(app.session.get_register_error().is_some());
    }

    #[test]
    fn register_success_goes_to_login_with_notice() {
        let (vm, api, _, app) = setup();
        app.navigate(Screen::Register);
        vm.update_register_form(|f| *f = filled_form());
        block_on(vm.register()).unwrap();

        let sent = api.register_calls.borrow();
        assert_eq!(sent[0].divisi_id, 2);
        assert_eq!(sent[0].tanggal_masuk, "2026-10-01");
        assert_eq!(app.current_screen(), Screen::Login);
        assert_eq!(app.session.get_notice().as_deref(), Some(REGISTER_SUCCESS));
    }

    #[test]
    fn register_joins_backend_field_errors() {
        let (vm, api, _, app) = setup();
        *api.register_result.borrow_mut() = Some(Err(ApiError::from_response(
            422,
            r#"{"errors":{"email":["Email sudah dipakai."],"nama":["Nama wajib."]}}"#,
        )));
        vm.update_register_form(|f| *f = filled_form());
        block_on(vm.register()).unwrap_err();
        assert_eq!(
            app.session.get_register_error().as_deref(),
            Some("Email sudah dipakai.; Nama wajib.")
        );
    }
}
