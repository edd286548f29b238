// ============================================================================
// LEAVE MODELS - Solicitudes de permiso (cuti)
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
    Maternity,
    Paternity,
}

impl LeaveType {
    pub const ALL: [LeaveType; 5] = [
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::Personal,
        LeaveType::Maternity,
        LeaveType::Paternity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Annual => "Tahunan",
            LeaveType::Sick => "Sakit",
            LeaveType::Personal => "Pribadi",
            LeaveType::Maternity => "Melahirkan",
            LeaveType::Paternity => "Ayah",
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
            LeaveType::Maternity => "maternity",
            LeaveType::Paternity => "paternity",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_wire() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Menunggu",
            LeaveStatus::Approved => "Disetujui",
            LeaveStatus::Rejected => "Ditolak",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: u64,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    #[serde(default)]
    pub reason: String,
    pub status: LeaveStatus,
}

/// Cuerpo de `POST /leave-request`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLeaveRequest {
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub reason: String,
}

/// Borrador del formulario, tal como lo escribe el usuario
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveDraft {
    pub start_date: String,
    pub end_date: String,
    pub leave_type: LeaveType,
    pub reason: String,
}

impl Default for LeaveDraft {
    fn default() -> Self {
        Self {
            start_date: String::new(),
            end_date: String::new(),
            leave_type: LeaveType::Annual,
            reason: String::new(),
        }
    }
}

/// Parseo defensivo de la lista `data` (o lista en la raíz)
pub fn parse_leave_list(body: &Value) -> Vec<LeaveRequest> {
    let items = body
        .get("data")
        .and_then(Value::as_array)
        .or_else(|| body.as_array());
    let Some(items) = items else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
