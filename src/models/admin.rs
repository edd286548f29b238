use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::employee::Division;
use super::leave::{LeaveStatus, LeaveType};

/// Estadísticas del día (`GET /admin/dashboard-harian` → `stats`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DailyStats {
    #[serde(default)]
    pub total_employees: u32,
    #[serde(default)]
    pub present_today: u32,
    #[serde(default)]
    pub late_entries: u32,
}

impl DailyStats {
    pub fn from_body(body: &Value) -> Self {
        body.get("stats")
            .and_then(|stats| serde_json::from_value(stats.clone()).ok())
            .unwrap_or_default()
    }

    pub fn absent_today(&self) -> u32 {
        self.total_employees.saturating_sub(self.present_today)
    }
}

/// Empleado embebido en una solicitud de permiso
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LeaveApplicant {
    #[serde(alias = "name", default)]
    pub nama: String,
    #[serde(default)]
    pub divisi: Option<Division>,
}

/// Solicitud de permiso vista por el administrador
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminLeave {
    pub id: u64,
    #[serde(default)]
    pub karyawan: Option<LeaveApplicant>,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    #[serde(default)]
    pub reason: String,
    pub status: LeaveStatus,
}

impl AdminLeave {
    pub fn applicant_name(&self) -> &str {
        self.karyawan
            .as_ref()
            .map(|k| k.nama.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("-")
    }

    pub fn applicant_division(&self) -> &str {
        self.karyawan
            .as_ref()
            .and_then(|k| k.divisi.as_ref())
            .map(|d| d.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("-")
    }
}

pub fn parse_admin_leaves(body: &Value) -> Vec<AdminLeave> {
    body.get("data")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Decisión sobre una solicitud (`PUT /admin/leaves/{id}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveDecision {
    pub status: LeaveStatus,
}

/// Token QR de asistencia generado por el administrador
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedToken {
    #[serde(rename = "token_saat_ini")]
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    #[default]
    Attendance,
    Leave,
}

impl ReportKind {
    pub fn as_wire(&self) -> &'static str {
        match self {
            ReportKind::Attendance => "absensi",
            ReportKind::Leave => "cuti",
        }
    }

    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "cuti" => ReportKind::Leave,
            _ => ReportKind::Attendance,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Attendance => "Absensi",
            ReportKind::Leave => "Cuti",
        }
    }
}

/// Filtro ya validado de un reporte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilter {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub kind: ReportKind,
}

impl ReportFilter {
    pub fn query_string(&self) -> String {
        format!(
            "start_date={}&end_date={}&type={}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d"),
            self.kind.as_wire()
        )
    }

    /// Nombre del PDF descargado
    pub fn pdf_file_name(&self) -> String {
        format!(
            "laporan-{}-{}-{}.pdf",
            self.kind.as_wire(),
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportRow {
    #[serde(default)]
    pub tanggal: String,
    #[serde(default)]
    pub nama_karyawan: String,
    #[serde(default)]
    pub jam_masuk: Option<String>,
    #[serde(default)]
    pub jam_pulang: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub keterangan: Option<String>,
}

pub fn parse_report_rows(body: &Value) -> Vec<ReportRow> {
    body.get("data")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
