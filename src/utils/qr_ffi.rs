// ============================================================================
// QR FFI - Foreign Function Interface para JavaScript
// ============================================================================
// Wrappers para funciones JS de static/qr_scanner.js - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Abre la cámara trasera dentro de `container_id` y llama a
    /// `on_detected(texto)` por cada QR decodificado
    #[wasm_bindgen(js_name = initQrScanner)]
    pub fn init_qr_scanner(
        container_id: &str,
        on_detected: &js_sys::Function,
        on_error: &js_sys::Function,
    );

    /// Libera la cámara; idempotente
    #[wasm_bindgen(js_name = stopQrScanner)]
    pub fn stop_qr_scanner();

    /// Dibuja `text` como QR dentro de `container_id`
    #[wasm_bindgen(js_name = renderQrCode)]
    pub fn render_qr_code(container_id: &str, text: &str);
}
