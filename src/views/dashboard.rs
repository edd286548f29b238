// ============================================================================
// DASHBOARD VIEW - Estado de hoy + botones de asistencia + historial
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::attendance::AttendanceAction;
use crate::state::AcquisitionMode;
use crate::views::layout::{render_banner, render_error, render_loading, render_table};

const EMPTY_TIME: &str = "--:--:--";

/// Renderizar dashboard del empleado
pub fn render_dashboard(ctx: &AppContext) -> Result<Element, JsValue> {
    let state = ctx.attendance.state();
    let page = ElementBuilder::new("div")?
        .class("page dashboard")
        .child(ElementBuilder::new("h1")?.text("Dashboard").build())?
        .child(
            ElementBuilder::new("p")?
                .class("subtitle")
                .text("Selamat datang! Jangan lupa absen hari ini.")
                .build(),
        )?
        .build();

    if let Some(banner) = state.get_banner() {
        let vm = ctx.attendance.clone();
        append_child(&page, &render_banner(&banner, Some(Rc::new(move || vm.dismiss_banner())))?)?;
    }

    let grid = ElementBuilder::new("div")?.class("dashboard-grid").build();
    append_child(&grid, &render_history(ctx)?)?;
    append_child(&grid, &render_attendance_card(ctx)?)?;
    append_child(&page, &grid)?;

    Ok(page)
}

fn render_history(ctx: &AppContext) -> Result<Element, JsValue> {
    let state = ctx.attendance.state();
    let card = ElementBuilder::new("section")?
        .class("card history")
        .child(ElementBuilder::new("h2")?.text("Riwayat Kehadiran").build())?
        .build();

    if let Some(error) = state.get_history_error() {
        append_child(&card, &render_error(&error)?)?;
    }
    if state.is_history_loading() && state.get_history().is_empty() {
        append_child(&card, &render_loading("Memuat riwayat...")?)?;
        return Ok(card);
    }

    let rows = state
        .get_history()
        .into_iter()
        .map(|record| {
            vec![
                record.date.clone(),
                record.clock_in().unwrap_or("-").to_string(),
                record.clock_out().unwrap_or("-").to_string(),
                record.status_label.clone(),
            ]
        })
        .collect();
    append_child(
        &card,
        &render_table(&["Tanggal", "Masuk", "Pulang", "Status"], rows, "Belum ada data riwayat.")?,
    )?;

    Ok(card)
}

fn render_attendance_card(ctx: &AppContext) -> Result<Element, JsValue> {
    let state = ctx.attendance.state();
    let today = state.get_today();
    let busy = state.get_phase().is_busy();

    let card = ElementBuilder::new("section")?
        .class("card attendance")
        .child(ElementBuilder::new("h2")?.text("Attendance").build())?
        .build();

    let status = ElementBuilder::new("div")?
        .class("today-status")
        .child(ElementBuilder::new("span")?.class("label").text("Status Hari Ini").build())?
        .child(time_row("Masuk", today.clock_in_time.as_deref())?)?
        .child(time_row("Pulang", today.clock_out_time.as_deref())?)?
        .build();
    append_child(&card, &status)?;

    let actions = ElementBuilder::new("div")?.class("attendance-actions").build();
    match today.next_action() {
        Some(action) => {
            let (primary, class) = match action {
                AttendanceAction::ClockIn => ("Check In (Scan QR)", "btn-primary"),
                AttendanceAction::ClockOut => ("Check Out (Scan QR)", "btn-dark"),
            };
            append_child(&actions, &open_button(ctx, action, AcquisitionMode::Camera, primary, class, busy)?)?;
            append_child(
                &actions,
                &open_button(ctx, action, AcquisitionMode::Manual, "Input Token Manual", "btn-secondary", busy)?,
            )?;
        }
        None => {
            append_child(
                &actions,
                &ElementBuilder::new("div")?.class("attendance-done").text("🎉 Absensi Selesai").build(),
            )?;
        }
    }
    append_child(&card, &actions)?;

    Ok(card)
}

fn time_row(label: &str, time: Option<&str>) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("time-row")
        .child(ElementBuilder::new("span")?.text(label).build())?
        .child(ElementBuilder::new("span")?.class("time").text(time.unwrap_or(EMPTY_TIME)).build())
        .map(ElementBuilder::build)
}

fn open_button(
    ctx: &AppContext,
    action: AttendanceAction,
    mode: AcquisitionMode,
    text: &str,
    class: &str,
    disabled: bool,
) -> Result<Element, JsValue> {
    let button = ElementBuilder::new("button")?
        .class(class)
        .flag("disabled", disabled)?
        .text(text)
        .build();
    let vm = ctx.attendance.clone();
    on_click(&button, move |_| {
        vm.open(action, mode);
    })?;
    Ok(button)
}
