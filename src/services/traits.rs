// ============================================================================
// SERVICE TRAITS - Contratos entre viewmodels y el mundo exterior
// ============================================================================
// Los viewmodels dependen de estos traits, no de gloo-net ni de web-sys.
// Un solo hilo (navegador): futures sin `Send`.
// ============================================================================

use async_trait::async_trait;

use crate::errors::{ApiError, GeoError};
use crate::models::admin::{AdminLeave, DailyStats, GeneratedToken, ReportFilter, ReportRow};
use crate::models::attendance::{AttendanceRecord, SubmissionRequest, SubmissionResponse};
use crate::models::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::models::employee::{Employee, NewEmployee};
use crate::models::leave::{LeaveRequest, LeaveStatus, NewLeaveRequest};
use crate::models::notification::Notification;

/// Coordenadas del dispositivo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
}

/// Fuente de la posición actual
#[async_trait(?Send)]
pub trait GeolocationProvider {
    async fn current_position(&self) -> Result<Coordinates, GeoError>;
}

#[async_trait(?Send)]
pub trait AuthApi {
    /// Token Bearer para las peticiones autenticadas (None al cerrar sesión)
    fn set_bearer(&self, token: Option<String>);

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// Devuelve el mensaje de éxito del backend
    async fn register(&self, request: &RegisterRequest) -> Result<Option<String>, ApiError>;
}

#[async_trait(?Send)]
pub trait AttendanceApi {
    /// Historial, más reciente primero
    async fn fetch_history(&self) -> Result<Vec<AttendanceRecord>, ApiError>;

    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResponse, ApiError>;
}

#[async_trait(?Send)]
pub trait LeaveApi {
    async fn list_leaves(&self) -> Result<Vec<LeaveRequest>, ApiError>;

    async fn create_leave(&self, request: &NewLeaveRequest) -> Result<(), ApiError>;

    async fn cancel_leave(&self, id: u64) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
pub trait AdminApi {
    async fn daily_stats(&self) -> Result<DailyStats, ApiError>;

    async fn pending_leaves(&self) -> Result<Vec<AdminLeave>, ApiError>;

    async fn decide_leave(&self, id: u64, status: LeaveStatus) -> Result<(), ApiError>;

    async fn generate_token(&self) -> Result<GeneratedToken, ApiError>;

    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError>;

    async fn create_employee(&self, employee: &NewEmployee) -> Result<(), ApiError>;

    async fn delete_employee(&self, id: u64) -> Result<(), ApiError>;

    async fn report(&self, filter: &ReportFilter) -> Result<Vec<ReportRow>, ApiError>;

    /// PDF generado por el backend (bytes crudos)
    async fn export_report_pdf(&self, filter: &ReportFilter) -> Result<Vec<u8>, ApiError>;
}

#[async_trait(?Send)]
pub trait NotificationApi {
    async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError>;

    async fn mark_notification_read(&self, id: u64) -> Result<(), ApiError>;
}
