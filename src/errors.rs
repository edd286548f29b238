// ============================================================================
// ERRORS - Tipos de error de la aplicación
// ============================================================================
// Las vistas muestran `to_string()`; los mensajes ya están en indonesio.
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Error de comunicación con el backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Tidak dapat terhubung ke server: {0}")]
    Network(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Respons server tidak valid: {0}")]
    Parse(String),

    #[error("Sesi tidak ditemukan, silakan login kembali.")]
    MissingSession,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Mensaje del backend, si lo hubo
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Construye el error HTTP a partir del cuerpo devuelto por el backend
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
        ApiError::Http {
            status,
            message: parsed.summary(),
        }
    }
}

/// Cuerpo de error del backend: `{ message, errors: { campo: [..] } }`
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, Value>>,
}

impl ErrorBody {
    /// Los errores de validación por campo tienen prioridad y se unen con "; "
    fn summary(&self) -> String {
        let field_errors: Vec<String> = self
            .errors
            .iter()
            .flat_map(|errors| errors.values())
            .flat_map(|value| match value {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect::<Vec<_>>(),
                Value::String(s) => vec![s.clone()],
                _ => Vec::new(),
            })
            .collect();

        if !field_errors.is_empty() {
            return field_errors.join("; ");
        }
        self.message.clone().unwrap_or_default()
    }
}

/// Fallo al obtener la posición del dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("Izin lokasi ditolak. Aktifkan izin GPS di browser Anda.")]
    PermissionDenied,

    #[error("Lokasi tidak tersedia. Pastikan GPS aktif.")]
    PositionUnavailable,

    #[error("Waktu habis saat mengambil lokasi. Coba lagi.")]
    Timeout,

    #[error("Browser tidak mendukung geolokasi.")]
    Unsupported,
}

impl GeoError {
    /// Códigos de `GeolocationPositionError`
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeoError::PermissionDenied,
            3 => GeoError::Timeout,
            _ => GeoError::PositionUnavailable,
        }
    }
}

/// Fallo del almacenamiento de sesión
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Penyimpanan browser tidak tersedia")]
    Unavailable,

    #[error("Gagal menyimpan sesi: {0}")]
    Write(String),

    #[error("Data sesi rusak, silakan login kembali.")]
    Corrupted,
}

/// Error de validación local (nunca llega a la red)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Token QR wajib diisi.")]
    EmptyToken,

    #[error("Email dan password wajib diisi.")]
    MissingCredentials,

    #[error("Konfirmasi password tidak cocok.")]
    PasswordMismatch,

    #[error("Semua field wajib diisi.")]
    MissingFields,

    #[error("Tanggal selesai tidak boleh lebih awal.")]
    EndBeforeStart,

    #[error("Format tanggal tidak valid.")]
    InvalidDate,

    #[error("Silakan pilih periode tanggal")]
    MissingPeriod,
}
