// ============================================================================
// SESSION STORE - Único punto de lectura/escritura de la sesión persistida
// ============================================================================
// Claves en localStorage: `auth_token` y `user_info`.
// Se escribe solo en login/logout (última escritura gana entre pestañas).
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::errors::StorageError;
use crate::models::auth::{SessionIdentity, UserProfile};

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_INFO_KEY: &str = "user_info";

/// Almacenamiento clave/valor de strings
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .ok()
            .flatten()
            .ok_or(StorageError::Unavailable)
    }

    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// Almacenamiento en memoria (modo privado sin localStorage, tests)
#[derive(Clone, Default)]
pub struct MemoryStorage {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Frontera de persistencia de `SessionIdentity`
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// localStorage si existe; si no, memoria (la sesión no sobrevive a recargas)
    pub fn browser() -> Self {
        if BrowserStorage::is_available() {
            Self::new(Rc::new(BrowserStorage))
        } else {
            log::warn!("⚠️ [SESSION] localStorage no disponible, usando memoria");
            Self::new(Rc::new(MemoryStorage::default()))
        }
    }

    pub fn save(&self, identity: &SessionIdentity) -> Result<(), StorageError> {
        let profile = serde_json::to_string(&identity.profile)
            .map_err(|e| StorageError::Write(e.to_string()))?;
        self.backend.set(AUTH_TOKEN_KEY, &identity.auth_token)?;
        self.backend.set(USER_INFO_KEY, &profile)?;
        log::info!("💾 [SESSION] Sesión guardada para {}", identity.profile.email);
        Ok(())
    }

    /// Restaura la sesión.
    /// - Sin token o sin perfil → `Ok(None)`
    /// - Perfil ilegible → se borran las claves y `Err(Corrupted)`
    pub fn load(&self) -> Result<Option<SessionIdentity>, StorageError> {
        let token = self.backend.get(AUTH_TOKEN_KEY)?.filter(|t| !t.trim().is_empty());
        let profile_raw = self.backend.get(USER_INFO_KEY)?;

        let (Some(auth_token), Some(profile_raw)) = (token, profile_raw) else {
            return Ok(None);
        };

        match serde_json::from_str::<UserProfile>(&profile_raw) {
            Ok(profile) => Ok(Some(SessionIdentity {
                auth_token,
                profile,
            })),
            Err(e) => {
                log::error!("❌ [SESSION] Perfil corrupto ({}), limpiando sesión", e);
                self.clear()?;
                Err(StorageError::Corrupted)
            }
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(AUTH_TOKEN_KEY)?;
        self.backend.remove(USER_INFO_KEY)?;
        log::info!("🧹 [SESSION] Claves de sesión eliminadas");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;

    fn identity() -> SessionIdentity {
        SessionIdentity {
            auth_token: "tok-123".into(),
            profile: UserProfile {
                name: "Siti Aminah".into(),
                email: "siti@damirich.id".into(),
                role: Role::Employee,
                attendance_token: None,
            },
        }
    }

    #[test]
    fn save_then_load_restores_identity() {
        let store = SessionStore::new(Rc::new(MemoryStorage::default()));
        store.save(&identity()).unwrap();
        assert_eq!(store.load().unwrap(), Some(identity()));
    }

    #[test]
    fn missing_keys_mean_no_session() {
        let memory = MemoryStorage::default();
        let store = SessionStore::new(Rc::new(memory.clone()));
        assert_eq!(store.load().unwrap(), None);

        memory.set(AUTH_TOKEN_KEY, "tok").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn corrupted_profile_clears_every_session_key() {
        let memory = MemoryStorage::default();
        memory.set(AUTH_TOKEN_KEY, "tok").unwrap();
        memory.set(USER_INFO_KEY, "{not json").unwrap();
        memory.set("other", "kept").unwrap();

        let store = SessionStore::new(Rc::new(memory.clone()));
        assert_eq!(store.load(), Err(StorageError::Corrupted));
        assert_eq!(memory.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert_eq!(memory.get(USER_INFO_KEY).unwrap(), None);
        assert_eq!(memory.get("other").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn clear_removes_session() {
        let store = SessionStore::new(Rc::new(MemoryStorage::default()));
        store.save(&identity()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
