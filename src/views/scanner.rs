// ============================================================================
// ATTENDANCE MODAL - Captura del token (cámara QR o manual) + estado del envío
// ============================================================================
// Se construye una vez por (intento, modo). Los cambios de fase solo tocan
// los nodos con id (actualización incremental) para no reiniciar la cámara.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::app::AppContext;
use crate::dom::{
    append_child, get_element_by_id, on_click, on_input_value, on_submit, set_attribute,
    set_text_content, ElementBuilder,
};
use crate::models::attendance::AttendanceAction;
use crate::state::{AcquisitionMode, AttendanceModal, WorkflowPhase};
use crate::utils::qr_ffi;
use crate::viewmodels::AttendanceViewModel;

const VIEWPORT_ID: &str = "qr-viewport";
const STATUS_ID: &str = "attendance-modal-status";
const ERROR_ID: &str = "attendance-modal-error";
const SUBMIT_ID: &str = "attendance-modal-submit";
const CANCEL_ID: &str = "attendance-modal-cancel";
const RESCAN_ID: &str = "attendance-modal-rescan";
const INPUT_ID: &str = "attendance-token-input";

/// Renderizar modal de asistencia
pub fn render_attendance_modal(ctx: &AppContext, modal: AttendanceModal) -> Result<Element, JsValue> {
    let vm = ctx.attendance.clone();

    let overlay = ElementBuilder::new("div")?
        .id("attendance-modal")?
        .class("modal-overlay active")
        .build();
    let content = ElementBuilder::new("div")?.class("modal-content").build();

    let title = match modal.action {
        AttendanceAction::ClockIn => "Scan QR Masuk",
        AttendanceAction::ClockOut => "Scan QR Pulang",
    };
    append_child(&content, &ElementBuilder::new("h3")?.text(title).build())?;
    append_child(&content, &render_mode_tabs(&vm, modal.mode)?)?;

    append_child(&content, &ElementBuilder::new("p")?.id(STATUS_ID)?.class("modal-status").build())?;
    append_child(
        &content,
        &ElementBuilder::new("div")?
            .id(ERROR_ID)?
            .class("form-error")
            .attr("role", "alert")?
            .build(),
    )?;

    match modal.mode {
        AcquisitionMode::Camera => append_child(&content, &render_camera(&vm)?)?,
        AcquisitionMode::Manual => append_child(&content, &render_manual(&vm)?)?,
    }

    let cancel = ElementBuilder::new("button")?
        .id(CANCEL_ID)?
        .class("btn-secondary")
        .attr("type", "button")?
        .text("Batal")
        .build();
    on_click(&cancel, move |_| {
        if vm.cancel() {
            qr_ffi::stop_qr_scanner();
        }
    })?;
    append_child(&content, &cancel)?;

    append_child(&overlay, &content)?;
    Ok(overlay)
}

fn render_mode_tabs(vm: &AttendanceViewModel, current: AcquisitionMode) -> Result<Element, JsValue> {
    let tabs = ElementBuilder::new("div")?.class("mode-tabs").build();
    for (mode, label) in [
        (AcquisitionMode::Camera, "📷 Kamera"),
        (AcquisitionMode::Manual, "⌨️ Input Manual"),
    ] {
        let class = if mode == current { "tab active" } else { "tab" };
        let tab = ElementBuilder::new("button")?
            .class(class)
            .attr("type", "button")?
            .text(label)
            .build();
        if mode != current {
            let vm = vm.clone();
            on_click(&tab, move |_| vm.switch_mode(mode))?;
        }
        append_child(&tabs, &tab)?;
    }
    Ok(tabs)
}

/// Cámara: solo se acepta la primera detección de cada sesión de escaneo
fn render_camera(vm: &AttendanceViewModel) -> Result<Element, JsValue> {
    let wrapper = ElementBuilder::new("div")?
        .class("camera")
        .child(
            ElementBuilder::new("p")?
                .class("hint")
                .text("Arahkan kamera ke QR Code di layar kantor.")
                .build(),
        )?
        .child(ElementBuilder::new("div")?.id(VIEWPORT_ID)?.class("qr-viewport").build())?
        .build();

    let accepted = Rc::new(Cell::new(false));

    let on_detected = {
        let vm = vm.clone();
        let accepted = accepted.clone();
        Closure::wrap(Box::new(move |payload: JsValue| {
            let Some(text) = payload.as_string() else {
                return;
            };
            if text.trim().is_empty() || accepted.replace(true) {
                return;
            }
            qr_ffi::stop_qr_scanner();
            log::info!("📱 [SCANNER] QR detectado");
            let vm = vm.clone();
            wasm_bindgen_futures::spawn_local(async move {
                vm.submit_scanned(&text).await;
            });
        }) as Box<dyn FnMut(JsValue)>)
    };
    let on_error = Closure::wrap(Box::new(move |error: JsValue| {
        log::error!("❌ [SCANNER] Error de cámara: {:?}", error);
        if let Some(element) = get_element_by_id(ERROR_ID) {
            set_text_content(&element, "Kamera tidak dapat diakses. Gunakan input manual.");
        }
    }) as Box<dyn FnMut(JsValue)>);

    let on_detected: Rc<js_sys::Function> = Rc::new(on_detected.into_js_value().unchecked_into());
    let on_error: Rc<js_sys::Function> = Rc::new(on_error.into_js_value().unchecked_into());

    // Reintento tras un rechazo recuperable: nueva sesión de escaneo
    let rescan = ElementBuilder::new("button")?
        .id(RESCAN_ID)?
        .class("btn-secondary")
        .attr("type", "button")?
        .attr("hidden", "")?
        .text("Scan Ulang")
        .build();
    {
        let accepted = accepted.clone();
        let on_detected = on_detected.clone();
        let on_error = on_error.clone();
        on_click(&rescan, move |_| {
            accepted.set(false);
            qr_ffi::init_qr_scanner(VIEWPORT_ID, &on_detected, &on_error);
        })?;
    }
    append_child(&wrapper, &rescan)?;

    // Delay para asegurar que el viewport ya está en el DOM
    gloo_timers::callback::Timeout::new(100, move || {
        log::info!("📷 [SCANNER] Inicializando cámara...");
        qr_ffi::init_qr_scanner(VIEWPORT_ID, &on_detected, &on_error);
    })
    .forget();

    Ok(wrapper)
}

fn render_manual(vm: &AttendanceViewModel) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?.class("manual-form").build();

    let input = ElementBuilder::new("input")?
        .id(INPUT_ID)?
        .attr("type", "text")?
        .attr("placeholder", "Masukkan Token atau Scan")?
        .attr("autocomplete", "off")?
        .value(&vm.state().get_token_input())
        .build();
    {
        let vm = vm.clone();
        on_input_value(&input, move |value| vm.set_token_input(value))?;
    }
    let field = ElementBuilder::new("label")?
        .class("form-field")
        .child(ElementBuilder::new("span")?.text("Token QR (Manual)").build())?
        .child(input)?
        .build();
    append_child(&form, &field)?;

    let submit = ElementBuilder::new("button")?
        .id(SUBMIT_ID)?
        .class("btn-primary")
        .attr("type", "submit")?
        .text("Submit & Check")
        .build();
    append_child(&form, &submit)?;

    {
        let vm = vm.clone();
        on_submit(&form, move || {
            let vm = vm.clone();
            wasm_bindgen_futures::spawn_local(async move {
                vm.submit_manual().await;
            });
        })?;
    }

    Ok(form)
}

fn set_disabled(id: &str, disabled: bool) -> Result<(), JsValue> {
    if let Some(element) = get_element_by_id(id) {
        if disabled {
            set_attribute(&element, "disabled", "")?;
        } else {
            element.remove_attribute("disabled")?;
        }
    }
    Ok(())
}

fn set_hidden(id: &str, hidden: bool) -> Result<(), JsValue> {
    if let Some(element) = get_element_by_id(id) {
        if hidden {
            set_attribute(&element, "hidden", "")?;
        } else {
            element.remove_attribute("hidden")?;
        }
    }
    Ok(())
}

/// Actualización incremental: fase, error y botones habilitados
pub fn update_attendance_modal(ctx: &AppContext) -> Result<(), JsValue> {
    let state = ctx.attendance.state();
    let phase = state.get_phase();

    if let Some(status) = get_element_by_id(STATUS_ID) {
        let text = match phase {
            WorkflowPhase::LocationPending => "📍 Mengambil lokasi...",
            WorkflowPhase::Submitting => "⏳ Validasi...",
            _ => "",
        };
        set_text_content(&status, text);
    }

    if let Some(error) = get_element_by_id(ERROR_ID) {
        set_text_content(&error, &state.get_modal_error().unwrap_or_default());
    }

    let busy = phase.is_busy();
    set_disabled(SUBMIT_ID, busy)?;
    set_disabled(INPUT_ID, busy)?;
    set_disabled(CANCEL_ID, phase == WorkflowPhase::Submitting)?;
    set_hidden(RESCAN_ID, phase != WorkflowPhase::RecoverableFailure)?;

    if let Some(submit) = get_element_by_id(SUBMIT_ID) {
        set_text_content(&submit, if busy { "Validasi..." } else { "Submit & Check" });
    }
    Ok(())
}
