// ============================================================================
// EMPLOYEES VIEW - Data karyawan: búsqueda, alta y baja
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::dom::{append_child, confirm, on_change_value, on_click, on_input_value, on_submit, ElementBuilder};
use crate::models::auth::DIVISIONS;
use crate::models::employee::{Employee, NewEmployee};
use crate::views::layout::{
    render_banner, render_error, render_field, render_loading, select_input, text_input,
};

/// Renderizar pantalla de plantilla
pub fn render_employees(ctx: &AppContext) -> Result<Element, JsValue> {
    let state = ctx.roster.state();
    let page = ElementBuilder::new("div")?.class("page employees").build();

    let header = ElementBuilder::new("div")?
        .class("page-header")
        .child(ElementBuilder::new("h1")?.text("Data Karyawan").build())?
        .build();
    let toggle = ElementBuilder::new("button")?
        .class("btn-primary")
        .text(if state.is_form_open() { "Tutup Form" } else { "+ Tambah Karyawan" })
        .build();
    {
        let vm = ctx.roster.clone();
        let open = state.is_form_open();
        on_click(&toggle, move |_| vm.open_form(!open))?;
    }
    append_child(&header, &toggle)?;
    append_child(&page, &header)?;

    if let Some(banner) = state.get_banner() {
        append_child(&page, &render_banner(&banner, None)?)?;
    }
    if let Some(error) = state.get_error() {
        append_child(&page, &render_error(&error)?)?;
    }
    if state.is_form_open() {
        append_child(&page, &render_form(ctx)?)?;
    }

    // Búsqueda en cliente (nombre / email); "change" para no perder el foco al teclear
    let search = text_input("search", &state.get_query(), "Cari nama atau email...")?;
    {
        let vm = ctx.roster.clone();
        on_change_value(&search, move |v| vm.set_query(v))?;
    }
    append_child(&page, &ElementBuilder::new("div")?.class("search-bar").child(search)?.build())?;

    if state.is_loading() {
        append_child(&page, &render_loading("Memuat data karyawan...")?)?;
        return Ok(page);
    }

    append_child(&page, &render_table(ctx, state.filtered())?)?;
    Ok(page)
}

fn render_form(ctx: &AppContext) -> Result<Element, JsValue> {
    let state = ctx.roster.state();
    let draft = state.get_draft();
    let form = ElementBuilder::new("form")?.class("card employee-form").build();

    let fields: [(&str, &str, &str, fn(&mut NewEmployee, String)); 4] = [
        ("Nama", "text", draft.name.as_str(), |d, v| d.name = v),
        ("Email", "email", draft.email.as_str(), |d, v| d.email = v),
        ("Password", "password", draft.password.as_str(), |d, v| d.password = v),
        ("Tanggal Masuk", "date", draft.tanggal_masuk.as_str(), |d, v| d.tanggal_masuk = v),
    ];
    for (label, input_type, value, update) in fields {
        let input = text_input(input_type, value, "")?;
        let vm = ctx.roster.clone();
        on_input_value(&input, move |v| vm.update_draft(|d| update(d, v)))?;
        append_child(&form, &render_field(label, input)?)?;
    }

    let divisions: Vec<(String, String)> = std::iter::once(("0".to_string(), "Pilih Divisi".to_string()))
        .chain(DIVISIONS.iter().map(|(id, name)| (id.to_string(), name.to_string())))
        .collect();
    let division = select_input(&divisions, &draft.divisi_id.to_string())?;
    {
        let vm = ctx.roster.clone();
        on_change_value(&division, move |v| {
            if let Ok(id) = v.parse() {
                vm.update_draft(|d| d.divisi_id = id);
            }
        })?;
    }
    append_child(&form, &render_field("Divisi", division)?)?;

    if let Some(error) = state.get_form_error() {
        append_child(&form, &render_error(&error)?)?;
    }

    append_child(
        &form,
        &ElementBuilder::new("button")?
            .class("btn-primary")
            .attr("type", "submit")?
            .text("Simpan")
            .build(),
    )?;
    {
        let vm = ctx.roster.clone();
        on_submit(&form, move || {
            let vm = vm.clone();
            wasm_bindgen_futures::spawn_local(async move {
                vm.create().await;
            });
        })?;
    }

    Ok(form)
}

fn render_table(ctx: &AppContext, employees: Vec<Employee>) -> Result<Element, JsValue> {
    let table = ElementBuilder::new("table")?.class("data-table").build();

    let head = ElementBuilder::new("tr")?.build();
    for header in ["Nama", "Email", "Divisi", "Tanggal Masuk", "Aksi"] {
        append_child(&head, &ElementBuilder::new("th")?.text(header).build())?;
    }
    append_child(&table, &ElementBuilder::new("thead")?.child(head)?.build())?;

    let body = ElementBuilder::new("tbody")?.build();
    if employees.is_empty() {
        let cell = ElementBuilder::new("td")?
            .class("empty")
            .attr("colspan", "5")?
            .text("Tidak ada karyawan.")
            .build();
        append_child(&body, &ElementBuilder::new("tr")?.child(cell)?.build())?;
    }

    for employee in employees {
        let delete = ElementBuilder::new("button")?.class("btn-danger").text("Hapus").build();
        {
            let vm = ctx.roster.clone();
            let id = employee.id;
            let name = employee.name.clone();
            on_click(&delete, move |_| {
                if !confirm(&format!("Hapus karyawan {}?", name)) {
                    return;
                }
                let vm = vm.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    vm.delete(id).await;
                });
            })?;
        }

        let row = ElementBuilder::new("tr")?
            .child(ElementBuilder::new("td")?.text(&employee.name).build())?
            .child(ElementBuilder::new("td")?.text(&employee.email).build())?
            .child(ElementBuilder::new("td")?.text(&employee.division_label()).build())?
            .child(
                ElementBuilder::new("td")?
                    .text(employee.join_date.as_deref().unwrap_or("-"))
                    .build(),
            )?
            .child(ElementBuilder::new("td")?.child(delete)?.build())?
            .build();
        append_child(&body, &row)?;
    }
    append_child(&table, &body)?;

    Ok(table)
}
