// ============================================================================
// DOWNLOAD - Descarga de archivos binarios generados en memoria
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::dom::{create_element, document};

/// Descarga `bytes` como archivo `file_name` con el MIME indicado
pub fn download_bytes(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_buffer_source_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    let body = document()
        .and_then(|d| d.body())
        .ok_or_else(|| JsValue::from_str("No body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;

    Url::revoke_object_url(&url)?;
    log::info!("📄 [DOWNLOAD] {} ({} bytes)", file_name, bytes.len());
    Ok(())
}
