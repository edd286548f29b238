// ============================================================================
// AUTH MODELS - Login, registro, perfil y rol
// ============================================================================

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Rol del usuario, decodificado una sola vez al hacer login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// `posisi_id == 1` → administrador
    pub fn from_position_id(position_id: Option<i64>) -> Self {
        match position_id {
            Some(1) => Role::Admin,
            _ => Role::Employee,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Employee => "Employee Portal",
        }
    }
}

/// Acepta `posisi_id` como número o como string numérico
fn position_id_lenient<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Usuario tal como llega del backend en `POST /login`
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    #[serde(alias = "nama", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "position_id_lenient")]
    pub posisi_id: Option<i64>,
    #[serde(default)]
    pub token_absen: Option<String>,
}

/// Perfil persistido en `user_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub attendance_token: Option<String>,
}

impl From<RawUser> for UserProfile {
    fn from(raw: RawUser) -> Self {
        Self {
            role: Role::from_position_id(raw.posisi_id),
            name: raw.name,
            email: raw.email,
            attendance_token: raw.token_absen.filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Sesión activa: token + perfil
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub auth_token: String,
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<RawUser>,
}

/// Cuerpo de `POST /register`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub nama: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub divisi_id: u32,
    pub posisi_id: u32,
    pub tanggal_masuk: String,
}

/// Divisiones conocidas (ids del backend)
pub const DIVISIONS: &[(u32, &str)] = &[(1, "IT"), (2, "HRD"), (3, "Marketing"), (4, "Finance")];

/// Posiciones para el registro (1 = administrador)
pub const POSITIONS: &[(u32, &str)] = &[(1, "Administrator"), (2, "Karyawan")];

pub fn division_name(id: u32) -> Option<&'static str> {
    DIVISIONS.iter().find(|(d, _)| *d == id).map(|(_, name)| *name)
}

/// Iniciales para el avatar de la barra superior
pub fn initials(name: &str) -> String {
    let mut parts = name.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(first), Some(second)) => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
        (Some(first), None) => first.chars().take(1).collect::<String>().to_uppercase(),
        _ => "?".to_string(),
    }
}
