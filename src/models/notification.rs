use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Notification {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(alias = "pesan", default)]
    pub message: String,
    #[serde(default)]
    pub read_at: Option<String>,
    #[serde(default)]
    pub is_read: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        !self.is_read.unwrap_or(false) && self.read_at.is_none()
    }

    pub fn mark_read(&mut self) {
        self.is_read = Some(true);
    }
}

pub fn parse_notifications(body: &Value) -> Vec<Notification> {
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

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| n.is_unread()).count()
}
