// ============================================================================
// LEAVE REQUEST VIEW - Pengajuan cuti del empleado
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::dom::{append_child, confirm, on_change_value, on_click, on_input_value, on_submit, ElementBuilder};
use crate::models::leave::{LeaveRequest, LeaveStatus, LeaveType};
use crate::views::layout::{render_banner, render_error, render_field, render_loading, select_input, text_input};

/// Renderizar pantalla de cuti
pub fn render_leave_requests(ctx: &AppContext) -> Result<Element, JsValue> {
    let state = ctx.leave.state();
    let page = ElementBuilder::new("div")?.class("page leave").build();

    let header = ElementBuilder::new("div")?
        .class("page-header")
        .child(ElementBuilder::new("h1")?.text("Permohonan Cuti").build())?
        .build();
    let toggle = ElementBuilder::new("button")?
        .class("btn-primary")
        .text(if state.is_form_open() { "Tutup Form" } else { "+ Ajukan Cuti" })
        .build();
    {
        let vm = ctx.leave.clone();
        let open = state.is_form_open();
        on_click(&toggle, move |_| vm.open_form(!open))?;
    }
    append_child(&header, &toggle)?;
    append_child(&page, &header)?;

    if let Some(banner) = state.get_banner() {
        append_child(&page, &render_banner(&banner, None)?)?;
    }
    if state.is_form_open() {
        append_child(&page, &render_form(ctx)?)?;
    }

    if state.is_loading() {
        append_child(&page, &render_loading("Memuat data cuti...")?)?;
        return Ok(page);
    }

    let requests = state.get_requests();
    if requests.is_empty() {
        append_child(
            &page,
            &ElementBuilder::new("p")?.class("empty").text("Belum ada pengajuan cuti.").build(),
        )?;
    }
    let list = ElementBuilder::new("div")?.class("leave-list").build();
    for request in requests {
        append_child(&list, &render_leave_card(ctx, &request)?)?;
    }
    append_child(&page, &list)?;

    Ok(page)
}

fn render_form(ctx: &AppContext) -> Result<Element, JsValue> {
    let state = ctx.leave.state();
    let draft = state.get_draft();
    let form = ElementBuilder::new("form")?.class("card leave-form").build();

    let start = text_input("date", &draft.start_date, "")?;
    {
        let vm = ctx.leave.clone();
        on_change_value(&start, move |v| vm.update_draft(|d| d.start_date = v))?;
    }
    append_child(&form, &render_field("Tanggal Mulai", start)?)?;

    let end = text_input("date", &draft.end_date, "")?;
    {
        let vm = ctx.leave.clone();
        on_change_value(&end, move |v| vm.update_draft(|d| d.end_date = v))?;
    }
    append_child(&form, &render_field("Tanggal Selesai", end)?)?;

    let types: Vec<(String, String)> = LeaveType::ALL
        .iter()
        .map(|t| (t.as_wire().to_string(), t.label().to_string()))
        .collect();
    let kind = select_input(&types, draft.leave_type.as_wire())?;
    {
        let vm = ctx.leave.clone();
        on_change_value(&kind, move |v| {
            if let Some(leave_type) = LeaveType::from_wire(&v) {
                vm.update_draft(|d| d.leave_type = leave_type);
            }
        })?;
    }
    append_child(&form, &render_field("Jenis Cuti", kind)?)?;

    let reason = ElementBuilder::new("textarea")?
        .attr("rows", "3")?
        .attr("placeholder", "Alasan cuti")?
        .value(&draft.reason)
        .build();
    {
        let vm = ctx.leave.clone();
        on_input_value(&reason, move |v| vm.update_draft(|d| d.reason = v))?;
    }
    append_child(&form, &render_field("Alasan", reason)?)?;

    if let Some(error) = state.get_form_error() {
        append_child(&form, &render_error(&error)?)?;
    }

    let submitting = state.is_submitting();
    let submit = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "submit")?
        .flag("disabled", submitting)?
        .text(if submitting { "Mengirim..." } else { "Kirim Pengajuan" })
        .build();
    append_child(&form, &submit)?;

    {
        let vm = ctx.leave.clone();
        on_submit(&form, move || {
            let vm = vm.clone();
            wasm_bindgen_futures::spawn_local(async move {
                vm.submit().await;
            });
        })?;
    }

    Ok(form)
}

fn render_leave_card(ctx: &AppContext, request: &LeaveRequest) -> Result<Element, JsValue> {
    let status_class = match request.status {
        LeaveStatus::Pending => "status pending",
        LeaveStatus::Approved => "status approved",
        LeaveStatus::Rejected => "status rejected",
    };
    let card = ElementBuilder::new("div")?
        .class("card leave-card")
        .child(
            ElementBuilder::new("div")?
                .class("leave-card-header")
                .child(ElementBuilder::new("strong")?.text(request.leave_type.label()).build())?
                .child(ElementBuilder::new("span")?.class(status_class).text(request.status.label()).build())?
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .class("dates")
                .text(&format!("{} s/d {}", request.start_date, request.end_date))
                .build(),
        )?
        .child(ElementBuilder::new("p")?.class("reason").text(&request.reason).build())?
        .build();

    // Solo las pendientes se pueden cancelar
    if request.status == LeaveStatus::Pending {
        let cancel = ElementBuilder::new("button")?.class("btn-danger").text("Batalkan").build();
        let vm = ctx.leave.clone();
        let id = request.id;
        on_click(&cancel, move |_| {
            if !confirm("Batalkan pengajuan cuti ini?") {
                return;
            }
            let vm = vm.clone();
            wasm_bindgen_futures::spawn_local(async move {
                vm.cancel(id).await;
            });
        })?;
        append_child(&card, &cancel)?;
    }

    Ok(card)
}
