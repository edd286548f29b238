// ============================================================================
// ADMIN DASHBOARD VIEW - Estadísticas del día, cuti pendientes y token QR
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::admin::AdminLeave;
use crate::models::leave::LeaveStatus;
use crate::utils::qr_ffi;
use crate::views::layout::{render_banner, render_error, render_loading};

const QR_CONTAINER_ID: &str = "attendance-qr";

/// Renderizar dashboard de administración
pub fn render_admin_dashboard(ctx: &AppContext) -> Result<Element, JsValue> {
    let state = ctx.admin.state();
    let page = ElementBuilder::new("div")?
        .class("page admin-dashboard")
        .child(ElementBuilder::new("h1")?.text("Dashboard Admin").build())?
        .build();

    if let Some(error) = state.get_error() {
        append_child(&page, &render_error(&error)?)?;
    }
    if let Some(banner) = state.get_banner() {
        let vm = ctx.admin.clone();
        append_child(&page, &render_banner(&banner, Some(Rc::new(move || vm.dismiss_banner())))?)?;
    }
    if state.is_loading() {
        append_child(&page, &render_loading("Memuat data...")?)?;
    }

    let stats = state.get_stats();
    let cards = ElementBuilder::new("div")?.class("stats-grid").build();
    for (label, value) in [
        ("Total Karyawan", stats.total_employees),
        ("Hadir Hari Ini", stats.present_today),
        ("Terlambat", stats.late_entries),
        ("Belum Hadir", stats.absent_today()),
    ] {
        let card = ElementBuilder::new("div")?
            .class("stat-card")
            .child(ElementBuilder::new("span")?.class("stat-label").text(label).build())?
            .child(ElementBuilder::new("strong")?.class("stat-value").text(&value.to_string()).build())?
            .build();
        append_child(&cards, &card)?;
    }
    append_child(&page, &cards)?;

    let grid = ElementBuilder::new("div")?.class("dashboard-grid").build();
    append_child(&grid, &render_leaves(ctx)?)?;
    append_child(&grid, &render_token_card(ctx)?)?;
    append_child(&page, &grid)?;

    Ok(page)
}

fn render_leaves(ctx: &AppContext) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("section")?
        .class("card")
        .child(
            ElementBuilder::new("h2")?
                .text(&format!("Pengajuan Cuti ({} menunggu)", ctx.admin.pending_count()))
                .build(),
        )?
        .build();

    let leaves = ctx.admin.state().get_leaves();
    if leaves.is_empty() {
        append_child(
            &card,
            &ElementBuilder::new("p")?.class("empty").text("Tidak ada pengajuan cuti.").build(),
        )?;
    }
    for leave in leaves {
        append_child(&card, &render_leave_row(ctx, &leave)?)?;
    }
    Ok(card)
}

fn render_leave_row(ctx: &AppContext, leave: &AdminLeave) -> Result<Element, JsValue> {
    let row = ElementBuilder::new("div")?
        .class("leave-row")
        .child(
            ElementBuilder::new("div")?
                .class("leave-applicant")
                .child(ElementBuilder::new("strong")?.text(leave.applicant_name()).build())?
                .child(ElementBuilder::new("small")?.text(leave.applicant_division()).build())?
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .text(&format!(
                    "{} · {} s/d {}",
                    leave.leave_type.label(),
                    leave.start_date,
                    leave.end_date
                ))
                .build(),
        )?
        .child(ElementBuilder::new("p")?.class("reason").text(&leave.reason).build())?
        .build();

    if leave.status != LeaveStatus::Pending {
        append_child(&row, &ElementBuilder::new("span")?.class("status").text(leave.status.label()).build())?;
        return Ok(row);
    }

    let actions = ElementBuilder::new("div")?.class("leave-actions").build();
    for (status, text, class) in [
        (LeaveStatus::Approved, "Setujui", "btn-success"),
        (LeaveStatus::Rejected, "Tolak", "btn-danger"),
    ] {
        let button = ElementBuilder::new("button")?.class(class).text(text).build();
        let vm = ctx.admin.clone();
        let id = leave.id;
        on_click(&button, move |_| {
            let vm = vm.clone();
            wasm_bindgen_futures::spawn_local(async move {
                vm.decide(id, status).await;
            });
        })?;
        append_child(&actions, &button)?;
    }
    append_child(&row, &actions)?;
    Ok(row)
}

fn render_token_card(ctx: &AppContext) -> Result<Element, JsValue> {
    let state = ctx.admin.state();
    let card = ElementBuilder::new("section")?
        .class("card qr-card")
        .child(ElementBuilder::new("h2")?.text("QR Absensi").build())?
        .build();

    let generate = ElementBuilder::new("button")?.class("btn-primary").text("Generate Token QR").build();
    {
        let vm = ctx.admin.clone();
        on_click(&generate, move |_| {
            let vm = vm.clone();
            wasm_bindgen_futures::spawn_local(async move {
                vm.generate_token().await;
            });
        })?;
    }
    append_child(&card, &generate)?;

    if let Some(error) = state.get_token_error() {
        append_child(&card, &render_error(&error)?)?;
    }

    if let Some(token) = state.get_token() {
        append_child(&card, &ElementBuilder::new("div")?.id(QR_CONTAINER_ID)?.class("qr-code").build())?;
        append_child(&card, &ElementBuilder::new("code")?.class("token-text").text(&token.token).build())?;
        if let Some(expires) = &token.expires_at {
            append_child(
                &card,
                &ElementBuilder::new("small")?.text(&format!("Berlaku sampai {}", expires)).build(),
            )?;
        }
        // El contenedor aún no está en el DOM
        gloo_timers::callback::Timeout::new(0, move || {
            qr_ffi::render_qr_code(QR_CONTAINER_ID, &token.token);
        })
        .forget();
    }

    Ok(card)
}
