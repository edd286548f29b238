// ============================================================================
// EMPLOYEE MODELS - Plantilla de empleados (vista de administrador)
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Division {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(alias = "nama", default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Employee {
    pub id: u64,
    #[serde(alias = "nama")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub divisi_id: Option<u32>,
    #[serde(default)]
    pub divisi: Option<Division>,
    #[serde(rename = "tanggal_masuk", default)]
    pub join_date: Option<String>,
    #[serde(default)]
    pub token_absen: Option<String>,
}

impl Employee {
    pub fn division_label(&self) -> String {
        self.divisi
            .as_ref()
            .map(|d| d.name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| {
                self.divisi_id
                    .and_then(super::auth::division_name)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "-".to_string())
    }

    /// Búsqueda en cliente, sin distinguir mayúsculas (nombre o email)
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }
}

/// Cuerpo de `POST /admin/karyawan`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub password: String,
    pub divisi_id: u32,
    pub tanggal_masuk: String,
}

pub fn parse_employee_list(body: &Value) -> Vec<Employee> {
    let items = body
        .get("data")
        .and_then(Value::as_array)
        .or_else(|| body.as_array());
    items
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
