// Fakes compartidos por los tests de viewmodels

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::{ApiError, GeoError};
use crate::models::admin::{AdminLeave, DailyStats, GeneratedToken, ReportFilter, ReportRow};
use crate::models::attendance::{AttendanceRecord, SubmissionRequest, SubmissionResponse};
use crate::models::employee::{Employee, NewEmployee};
use crate::models::leave::LeaveStatus;
use crate::services::traits::{AdminApi, AttendanceApi, Coordinates, GeolocationProvider};

/// Cede el control una vez (simula un punto de suspensión real)
pub struct YieldNow(bool);

pub fn yield_now() -> YieldNow {
    YieldNow(false)
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_time(chrono::NaiveTime::parse_from_str(time, "%H:%M:%S").unwrap())
}

pub fn record(date: &str, masuk: Option<&str>, pulang: Option<&str>) -> AttendanceRecord {
    AttendanceRecord {
        id: Some(1),
        date: date.to_string(),
        clock_in_time: masuk.map(str::to_string),
        clock_out_time: pulang.map(str::to_string),
        status_label: "Tepat Waktu".to_string(),
    }
}

pub struct FakeGeolocation {
    pub result: RefCell<Result<Coordinates, GeoError>>,
    pub calls: Cell<usize>,
}

impl FakeGeolocation {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            result: RefCell::new(Ok(Coordinates { latitude, longitude, accuracy: Some(12.0) })),
            calls: Cell::new(0),
        }
    }

    pub fn failing(error: GeoError) -> Self {
        Self {
            result: RefCell::new(Err(error)),
            calls: Cell::new(0),
        }
    }
}

#[async_trait(?Send)]
impl GeolocationProvider for FakeGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        self.calls.set(self.calls.get() + 1);
        yield_now().await;
        *self.result.borrow()
    }
}

/// Backend de asistencia con respuestas programadas
#[derive(Default)]
pub struct FakeAttendanceApi {
    pub submissions: RefCell<Vec<SubmissionRequest>>,
    pub submit_results: RefCell<VecDeque<Result<SubmissionResponse, ApiError>>>,
    pub history_results: RefCell<VecDeque<Result<Vec<AttendanceRecord>, ApiError>>>,
    pub history_calls: Cell<usize>,
}

impl FakeAttendanceApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn will_accept(&self, message: &str) {
        self.submit_results.borrow_mut().push_back(Ok(SubmissionResponse {
            message: Some(message.to_string()),
        }));
    }

    pub fn will_reject(&self, status: u16, message: &str) {
        self.submit_results.borrow_mut().push_back(Err(ApiError::Http {
            status,
            message: message.to_string(),
        }));
    }

    pub fn history_returns(&self, records: Vec<AttendanceRecord>) {
        self.history_results.borrow_mut().push_back(Ok(records));
    }

    pub fn history_fails(&self) {
        self.history_results
            .borrow_mut()
            .push_back(Err(ApiError::Network("Failed to fetch".into())));
    }
}

#[async_trait(?Send)]
impl AttendanceApi for FakeAttendanceApi {
    async fn fetch_history(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.history_calls.set(self.history_calls.get() + 1);
        yield_now().await;
        self.history_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResponse, ApiError> {
        self.submissions.borrow_mut().push(request.clone());
        yield_now().await;
        self.submit_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(SubmissionResponse::default()))
    }
}

/// Backend de administración en memoria
#[derive(Default)]
pub struct FakeAdminApi {
    pub stats: RefCell<Option<Result<DailyStats, ApiError>>>,
    pub leaves: RefCell<Vec<AdminLeave>>,
    pub decisions: RefCell<Vec<(u64, LeaveStatus)>>,
    pub token: RefCell<Option<Result<GeneratedToken, ApiError>>>,
    pub employees: RefCell<Vec<Employee>>,
    pub created: RefCell<Vec<NewEmployee>>,
    pub deleted: RefCell<Vec<u64>>,
    pub report_rows: RefCell<Vec<ReportRow>>,
    pub report_calls: RefCell<Vec<ReportFilter>>,
    pub pdf: RefCell<Option<Result<Vec<u8>, ApiError>>>,
}

#[async_trait(?Send)]
impl AdminApi for FakeAdminApi {
    async fn daily_stats(&self) -> Result<DailyStats, ApiError> {
        self.stats.borrow_mut().take().unwrap_or_else(|| Ok(Default::default()))
    }

    async fn pending_leaves(&self) -> Result<Vec<AdminLeave>, ApiError> {
        Ok(self.leaves.borrow().clone())
    }

    async fn decide_leave(&self, id: u64, status: LeaveStatus) -> Result<(), ApiError> {
        self.decisions.borrow_mut().push((id, status));
        Ok(())
    }

    async fn generate_token(&self) -> Result<GeneratedToken, ApiError> {
        self.token
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(ApiError::Network("offline".into())))
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        Ok(self.employees.borrow().clone())
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<(), ApiError> {
        self.created.borrow_mut().push(employee.clone());
        Ok(())
    }

    async fn delete_employee(&self, id: u64) -> Result<(), ApiError> {
        self.deleted.borrow_mut().push(id);
        Ok(())
    }

    async fn report(&self, filter: &ReportFilter) -> Result<Vec<ReportRow>, ApiError> {
        self.report_calls.borrow_mut().push(filter.clone());
        Ok(self.report_rows.borrow().clone())
    }

    async fn export_report_pdf(&self, filter: &ReportFilter) -> Result<Vec<u8>, ApiError> {
        self.report_calls.borrow_mut().push(filter.clone());
        self.pdf.borrow_mut().take().unwrap_or_else(|| Ok(b"%PDF-1.4".to_vec()))
    }
}
