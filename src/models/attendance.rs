// ============================================================================
// ATTENDANCE MODELS - Registros de asistencia, estado de hoy y solicitud
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Acción de asistencia que el usuario puede enviar una vez por día
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceAction {
    ClockIn,
    ClockOut,
}

impl AttendanceAction {
    /// Segmento del endpoint (`/absensi/{path}`)
    pub fn path(&self) -> &'static str {
        match self {
            AttendanceAction::ClockIn => "clock-in",
            AttendanceAction::ClockOut => "clock-out",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceAction::ClockIn => "Masuk",
            AttendanceAction::ClockOut => "Pulang",
        }
    }
}

/// Registro de asistencia tal como lo devuelve el backend (solo lectura)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "tanggal")]
    pub date: String,
    #[serde(rename = "jam_masuk", default)]
    pub clock_in_time: Option<String>,
    #[serde(rename = "jam_pulang", default)]
    pub clock_out_time: Option<String>,
    #[serde(rename = "status", default)]
    pub status_label: String,
}

impl AttendanceRecord {
    /// Día calendario del registro. Acepta `YYYY-MM-DD` y timestamps ISO.
    pub fn day(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    pub fn clock_in(&self) -> Option<&str> {
        self.clock_in_time.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// La hora de salida solo cuenta si hay hora de entrada
    pub fn clock_out(&self) -> Option<&str> {
        self.clock_in()?;
        self.clock_out_time.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn is_late(&self) -> bool {
        let label = self.status_label.to_lowercase();
        label.contains("terlambat") || label.contains("late")
    }
}

/// Parseo defensivo de `GET /absensi/riwayat`.
/// `data` ausente o que no es lista → vacío; entradas inválidas se descartan.
pub fn parse_history(body: &Value) -> Vec<AttendanceRecord> {
    let Some(items) = body.get("data").and_then(Value::as_array) else {
        log::warn!("⚠️ [RIWAYAT] Respuesta sin lista 'data', se usa lista vacía");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<AttendanceRecord>(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("⚠️ [RIWAYAT] Registro descartado: {}", e);
                None
            }
        })
        .collect()
}

/// Estado derivado de hoy (no se guarda)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodayStatus {
    pub has_clocked_in: bool,
    pub has_clocked_out: bool,
    pub clock_in_time: Option<String>,
    pub clock_out_time: Option<String>,
}

impl TodayStatus {
    /// Deriva el estado a partir del registro más reciente (entrada cero)
    pub fn derive(records: &[AttendanceRecord], today: NaiveDate) -> Self {
        let Some(latest) = records.first() else {
            return Self::default();
        };
        if latest.day() != Some(today) {
            return Self::default();
        }

        let clock_in = latest.clock_in().map(str::to_string);
        let clock_out = latest.clock_out().map(str::to_string);
        Self {
            has_clocked_in: clock_in.is_some(),
            has_clocked_out: clock_out.is_some(),
            clock_in_time: clock_in,
            clock_out_time: clock_out,
        }
    }

    /// Actualización optimista tras un envío aceptado
    pub fn apply(&mut self, action: AttendanceAction, time: String) {
        match action {
            AttendanceAction::ClockIn => {
                self.has_clocked_in = true;
                self.clock_in_time = Some(time);
            }
            AttendanceAction::ClockOut => {
                if self.has_clocked_in {
                    self.has_clocked_out = true;
                    self.clock_out_time = Some(time);
                }
            }
        }
    }

    /// Siguiente acción disponible (None = jornada completa)
    pub fn next_action(&self) -> Option<AttendanceAction> {
        match (self.has_clocked_in, self.has_clocked_out) {
            (false, _) => Some(AttendanceAction::ClockIn),
            (true, false) => Some(AttendanceAction::ClockOut),
            (true, true) => None,
        }
    }
}

/// Token de asistencia ya normalizado (independiente del método de captura)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceToken(String);

impl AttendanceToken {
    /// Normaliza el texto capturado. Vacío tras `trim` → None.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMethod {
    Qr,
}

/// Cuerpo de `POST /absensi/clock-in|clock-out`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRequest {
    #[serde(skip)]
    pub action: AttendanceAction,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "metode")]
    pub method: SubmissionMethod,
    #[serde(rename = "qr_content")]
    pub token_content: String,
}

impl SubmissionRequest {
    pub fn new(action: AttendanceAction, latitude: f64, longitude: f64, token: &AttendanceToken) -> Self {
        Self {
            action,
            latitude,
            longitude,
            method: SubmissionMethod::Qr,
            token_content: token.as_str().to_string(),
        }
    }
}

/// Respuesta de éxito del backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(date: &str, masuk: Option<&str>, pulang: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            id: Some(1),
            date: date.to_string(),
            clock_in_time: masuk.map(str::to_string),
            clock_out_time: pulang.map(str::to_string),
            status_label: "Tepat Waktu".to_string(),
        }
    }

    #[test]
    fn parse_history_reads_backend_shape() {
        let body = json!({
            "data": [
                {"id": 7, "tanggal": "2026-10-19", "jam_masuk": "07:58:10", "jam_pulang": null, "status": "Tepat Waktu"},
                {"id": 6, "tanggal": "2026-10-18", "jam_masuk": "08:15:00", "jam_pulang": "17:01:00", "status": "Terlambat"}
            ]
        });
        let records = parse_history(&body);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].clock_in(), Some("07:58:10"));
        assert_eq!(records[0].clock_out(), None);
        assert!(records[1].is_late());
    }

    #[test]
    fn parse_history_treats_non_list_data_as_empty() {
        assert!(parse_history(&json!({"data": {"tanggal": "2026-10-19"}})).is_empty());
        assert!(parse_history(&json!({"data": null})).is_empty());
        assert!(parse_history(&json!({"message": "ok"})).is_empty());
        assert!(parse_history(&json!("nope")).is_empty());
    }

    #[test]
    fn parse_history_skips_broken_entries() {
        let body = json!({"data": [{"jam_masuk": "08:00"}, {"tanggal": "2026-10-19", "jam_masuk": "08:00"}]});
        let records = parse_history(&body);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2026-10-19");
    }

    #[test]
    fn today_status_empty_history_is_all_false() {
        let status = TodayStatus::derive(&[], day("2026-10-19"));
        assert_eq!(status, TodayStatus::default());
        assert_eq!(status.next_action(), Some(AttendanceAction::ClockIn));
    }

    #[test]
    fn today_status_ignores_records_from_other_days() {
        let records = vec![record("2026-10-18", Some("08:00:00"), Some("17:00:00"))];
        let status = TodayStatus::derive(&records, day("2026-10-19"));
        assert!(!status.has_clocked_in);
        assert!(!status.has_clocked_out);
    }

    #[test]
    fn today_status_reads_iso_timestamps() {
        let records = vec![record("2026-10-19T00:00:00.000000Z", Some("08:00:00"), None)];
        let status = TodayStatus::derive(&records, day("2026-10-19"));
        assert!(status.has_clocked_in);
        assert!(!status.has_clocked_out);
        assert_eq!(status.next_action(), Some(AttendanceAction::ClockOut));
    }

    #[test]
    fn clock_out_without_clock_in_does_not_count() {
        let records = vec![record("2026-10-19", None, Some("17:00:00"))];
        let status = TodayStatus::derive(&records, day("2026-10-19"));
        assert_eq!(status, TodayStatus::default());
    }

    #[test]
    fn unparseable_date_is_not_today() {
        let records = vec![record("kemarin", Some("08:00:00"), None)];
        assert_eq!(TodayStatus::derive(&records, day("2026-10-19")), TodayStatus::default());
    }

    #[test]
    fn optimistic_clock_out_requires_clock_in() {
        let mut status = TodayStatus::default();
        status.apply(AttendanceAction::ClockOut, "17:00:00".to_string());
        assert!(!status.has_clocked_out);

        status.apply(AttendanceAction::ClockIn, "08:00:00".to_string());
        status.apply(AttendanceAction::ClockOut, "17:00:00".to_string());
        assert!(status.has_clocked_in && status.has_clocked_out);
        assert_eq!(status.next_action(), None);
    }

    #[test]
    fn submission_request_wire_format() {
        let token = AttendanceToken::parse("  ABCD1234 \n").unwrap();
        let request = SubmissionRequest::new(AttendanceAction::ClockIn, -6.2, 106.8, &token);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({"latitude": -6.2, "longitude": 106.8, "metode": "qr", "qr_content": "ABCD1234"})
        );
    }

    #[test]
    fn blank_token_is_rejected() {
        assert!(AttendanceToken::parse("   ").is_none());
        assert!(AttendanceToken::parse("").is_none());
    }
}
