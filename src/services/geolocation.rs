// ============================================================================
// GEOLOCATION - Posición actual del dispositivo (navigator.geolocation)
// ============================================================================

use async_trait::async_trait;
use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::config::CONFIG;
use crate::errors::GeoError;
use crate::services::traits::{Coordinates, GeolocationProvider};

/// Geolocalización del navegador: alta precisión, sin caché
pub struct BrowserGeolocation {
    timeout_ms: u32,
}

impl BrowserGeolocation {
    pub fn new() -> Self {
        Self {
            timeout_ms: CONFIG.geolocation_timeout_ms,
        }
    }

    fn options(&self) -> Result<Object, JsValue> {
        let options = Object::new();
        Reflect::set(&options, &"enableHighAccuracy".into(), &JsValue::TRUE)?;
        Reflect::set(&options, &"timeout".into(), &JsValue::from(self.timeout_ms))?;
        Reflect::set(&options, &"maximumAge".into(), &JsValue::from(0))?;
        Ok(options)
    }

    /// Envuelve `getCurrentPosition` en una Promise que rechaza con el código de error
    fn position_promise(&self) -> Result<Promise, GeoError> {
        let geolocation = web_sys::window()
            .ok_or(GeoError::Unsupported)?
            .navigator()
            .geolocation()
            .map_err(|_| GeoError::Unsupported)?;
        let options = self.options().map_err(|_| GeoError::Unsupported)?;

        let mut call_error = None;
        let promise = Promise::new(&mut |resolve, reject| {
            let result = Reflect::get(&geolocation, &"getCurrentPosition".into())
                .and_then(|f| f.dyn_into::<js_sys::Function>().map_err(JsValue::from))
                .and_then(|f| f.call3(&geolocation, &resolve, &reject, &options));
            if let Err(e) = result {
                call_error = Some(e);
            }
        });

        match call_error {
            Some(e) => {
                log::error!("❌ [GEO] getCurrentPosition falló: {:?}", e);
                Err(GeoError::Unsupported)
            }
            None => Ok(promise),
        }
    }
}

impl Default for BrowserGeolocation {
    fn default() -> Self {
        Self::new()
    }
}

fn read_f64(target: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(target, &key.into()).ok()?.as_f64()
}

#[async_trait(?Send)]
impl GeolocationProvider for BrowserGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        log::info!("📍 [GEO] Solicitando posición (timeout {} ms)", self.timeout_ms);
        let promise = self.position_promise()?;

        match JsFuture::from(promise).await {
            Ok(position) => {
                let coords = Reflect::get(&position, &"coords".into())
                    .map_err(|_| GeoError::PositionUnavailable)?;
                let latitude = read_f64(&coords, "latitude").ok_or(GeoError::PositionUnavailable)?;
                let longitude = read_f64(&coords, "longitude").ok_or(GeoError::PositionUnavailable)?;
                let accuracy = read_f64(&coords, "accuracy");
                log::info!("✅ [GEO] Posición obtenida (±{:?} m)", accuracy);
                Ok(Coordinates {
                    latitude,
                    longitude,
                    accuracy,
                })
            }
            Err(error) => {
                let code = read_f64(&error, "code").map(|c| c as u16).unwrap_or(2);
                let geo_error = GeoError::from_code(code);
                log::warn!("⚠️ [GEO] Error {}: {}", code, geo_error);
                Err(geo_error)
            }
        }
    }
}
