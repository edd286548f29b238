// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// closure.forget() cede la closure a JS y nunca se libera: al destruir el
// elemento (set_inner_html("")) el navegador suelta el listener, pero la
// closure de Rust sigue en el heap de WASM. Cada render completo deja sus
// handlers atrás hasta que la página se recarga. El modal se reconstruye solo
// al cambiar de intento, así que el escáner no acumula closures por tick.
// Listeners globales (window/document) solo se registran UNA VEZ al inicio.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

use crate::dom::input_value;

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Input handler que entrega el valor actual del campo
pub fn on_input_value<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let target = element.clone();
    let closure = Closure::wrap(Box::new(move |_e: Event| {
        handler(input_value(&target));
    }) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Change handler (selects, fechas) que entrega el valor actual
pub fn on_change_value<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let target = element.clone();
    let closure = Closure::wrap(Box::new(move |_e: Event| {
        handler(input_value(&target));
    }) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Submit de formulario (evita la recarga de la página)
pub fn on_submit<F>(form: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();
        handler();
    }) as Box<dyn FnMut(Event)>);
    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
