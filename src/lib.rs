// ============================================================================
// ABSEN DAMIRICH - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI
// - Services: SOLO comunicación API / navegador
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod viewmodels;

mod app;
mod dom;
mod utils;
mod views;

use std::cell::{Cell, RefCell};

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
    static RENDER_SCHEDULED: Cell<bool> = Cell::new(false);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    wasm_logger::init(Config::new(level));
    log::info!("🚀 Absen Damirich - Rust Puro + MVVM ({})", CONFIG.backend_url());

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Agenda un re-render en el próximo tick; varias notificaciones seguidas → un solo render
pub fn schedule_rerender() {
    if RENDER_SCHEDULED.with(|flag| flag.replace(true)) {
        return;
    }
    gloo_timers::callback::Timeout::new(0, || {
        RENDER_SCHEDULED.with(|flag| flag.set(false));
        rerender_app();
    })
    .forget();
}

/// Función pública para re-renderizar la app (re-render completo)
pub fn rerender_app() {
    APP.with(|app_cell| {
        // try_borrow_mut: un render en curso no se re-entra
        match app_cell.try_borrow_mut() {
            Ok(mut app) => match app.as_mut() {
                Some(app) => {
                    if let Err(e) = app.render() {
                        log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                    }
                }
                None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
            },
            Err(_) => schedule_rerender(),
        }
    });
}
