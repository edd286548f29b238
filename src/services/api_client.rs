// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP y parsea respuestas.
// El token Bearer se comparte entre clones (se fija al login, se borra al logout).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::Serialize;
use serde_json::{json, Value};
use web_sys::AbortController;

use crate::config::CONFIG;
use crate::errors::ApiError;
use crate::models::admin::{
    parse_admin_leaves, parse_report_rows, AdminLeave, DailyStats, GeneratedToken, LeaveDecision,
    ReportFilter, ReportRow,
};
use crate::models::attendance::{
    parse_history, AttendanceRecord, SubmissionRequest, SubmissionResponse,
};
use crate::models::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::models::employee::{parse_employee_list, Employee, NewEmployee};
use crate::models::leave::{parse_leave_list, LeaveRequest, LeaveStatus, NewLeaveRequest};
use crate::models::notification::{parse_notifications, Notification};
use crate::services::traits::{AdminApi, AttendanceApi, AuthApi, LeaveApi, NotificationApi};

/// Cliente API (stateless salvo por el token compartido)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
    token: Rc<RefCell<Option<String>>>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.backend_url())
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms: CONFIG.network_timeout_seconds.saturating_mul(1000),
            token: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Cabeceras comunes + Bearer. Sin token → `MissingSession`.
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.token.borrow().clone().ok_or(ApiError::MissingSession)?;
        Ok(builder
            .header("Accept", "application/json")
            .header("Authorization", &format!("Bearer {}", token)))
    }

    /// Aborta la petición si supera el timeout de red.
    /// El `Timeout` devuelto debe vivir hasta recibir la respuesta.
    fn with_deadline(&self, builder: RequestBuilder) -> (RequestBuilder, Option<Timeout>) {
        match AbortController::new() {
            Ok(controller) => {
                let signal = controller.signal();
                let timer = Timeout::new(self.timeout_ms, move || {
                    log::warn!("⏱️ [API] Timeout de red, abortando petición");
                    controller.abort();
                });
                (builder.abort_signal(Some(&signal)), Some(timer))
            }
            Err(_) => (builder, None),
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let (builder, _deadline) = self.with_deadline(builder);
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    async fn send_json<B: Serialize>(&self, builder: RequestBuilder, body: &B) -> Result<Value, ApiError> {
        let (builder, _deadline) = self.with_deadline(builder);
        let response = builder
            .json(body)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let builder = self.authorized(Request::get(&self.url(path)))?;
        self.send(builder).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let builder = self.authorized(Request::post(&self.url(path)))?;
        self.send_json(builder, body).await
    }

    async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let builder = self.authorized(Request::put(&self.url(path)))?;
        self.send_json(builder, body).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let builder = self.authorized(Request::delete(&self.url(path)))?;
        self.send(builder).await
    }

    /// Petición sin sesión (login / registro)
    async fn post_public<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let builder = Request::post(&self.url(path)).header("Accept", "application/json");
        self.send_json(builder, body).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Lee el cuerpo completo; estados no-2xx se convierten en `ApiError::Http`
async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !(200..300).contains(&status) {
        log::warn!("⚠️ [API] HTTP {} {}", status, response.url());
        return Err(ApiError::from_response(status, &text));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    fn set_bearer(&self, token: Option<String>) {
        self.set_token(token);
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 [AUTH] Login para {}", request.email);
        let body = self.post_public("/login", request).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Option<String>, ApiError> {
        log::info!("📝 [AUTH] Registro de {}", request.email);
        let body = self.post_public("/register", request).await?;
        Ok(message_of(&body))
    }
}

#[async_trait(?Send)]
impl AttendanceApi for ApiClient {
    async fn fetch_history(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        let body = self.get("/absensi/riwayat").await?;
        let records = parse_history(&body);
        log::info!("📋 [RIWAYAT] {} registros", records.len());
        Ok(records)
    }

    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResponse, ApiError> {
        let path = format!("/absensi/{}", request.action.path());
        log::info!("📤 [ABSEN] POST {}", path);
        let body = self.post(&path, request).await?;
        Ok(SubmissionResponse {
            message: message_of(&body),
        })
    }
}

#[async_trait(?Send)]
impl LeaveApi for ApiClient {
    async fn list_leaves(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        let body = self.get("/leave-request").await?;
        Ok(parse_leave_list(&body))
    }

    async fn create_leave(&self, request: &NewLeaveRequest) -> Result<(), ApiError> {
        self.post("/leave-request", request).await.map(|_| ())
    }

    async fn cancel_leave(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/leave-request/{}", id)).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl AdminApi for ApiClient {
    async fn daily_stats(&self) -> Result<DailyStats, ApiError> {
        let body = self.get("/admin/dashboard-harian").await?;
        Ok(DailyStats::from_body(&body))
    }

    async fn pending_leaves(&self) -> Result<Vec<AdminLeave>, ApiError> {
        let body = self.get("/admin/leaves").await?;
        Ok(parse_admin_leaves(&body))
    }

    async fn decide_leave(&self, id: u64, status: LeaveStatus) -> Result<(), ApiError> {
        self.put(&format!("/admin/leaves/{}", id), &LeaveDecision { status })
            .await
            .map(|_| ())
    }

    async fn generate_token(&self) -> Result<GeneratedToken, ApiError> {
        let body = self.post("/admin/generate-token", &json!({})).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let body = self.get("/admin/karyawan").await?;
        Ok(parse_employee_list(&body))
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<(), ApiError> {
        self.post("/admin/karyawan", employee).await.map(|_| ())
    }

    async fn delete_employee(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/karyawan/{}", id)).await.map(|_| ())
    }

    async fn report(&self, filter: &ReportFilter) -> Result<Vec<ReportRow>, ApiError> {
        let body = self
            .get(&format!("/admin/laporan?{}", filter.query_string()))
            .await?;
        Ok(parse_report_rows(&body))
    }

    async fn export_report_pdf(&self, filter: &ReportFilter) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&format!("/admin/laporan/export-pdf?{}", filter.query_string()));
        let builder = self
            .authorized(Request::get(&url))?
            .header("Accept", "application/pdf");
        let (builder, _deadline) = self.with_deadline(builder);
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, &text));
        }
        response
            .binary()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

#[async_trait(?Send)]
impl NotificationApi for ApiClient {
    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let body = self.get("/notifications").await?;
        Ok(parse_notifications(&body))
    }

    async fn mark_notification_read(&self, id: u64) -> Result<(), ApiError> {
        self.put(&format!("/notifications/{}/read", id), &json!({}))
            .await
            .map(|_| ())
    }
}
