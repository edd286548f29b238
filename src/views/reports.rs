// ============================================================================
// REPORTS VIEW - Laporan absensi / cuti + descarga PDF
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::dom::{append_child, on_change_value, on_click, ElementBuilder};
use crate::models::admin::{ReportKind, ReportRow};
use crate::utils::download_bytes;
use crate::views::layout::{render_error, render_field, render_loading, render_table, select_input, text_input};

/// Renderizar pantalla de laporan
pub fn render_reports(ctx: &AppContext) -> Result<Element, JsValue> {
    let state = ctx.reports.state();
    let page = ElementBuilder::new("div")?
        .class("page reports")
        .child(ElementBuilder::new("h1")?.text("Laporan Harian").build())?
        .build();

    let filters = ElementBuilder::new("div")?.class("card report-filters").build();

    let start = text_input("date", &state.get_start_date(), "")?;
    {
        let vm = ctx.reports.clone();
        on_change_value(&start, move |v| vm.set_start_date(v))?;
    }
    append_child(&filters, &render_field("Dari Tanggal", start)?)?;

    let end = text_input("date", &state.get_end_date(), "")?;
    {
        let vm = ctx.reports.clone();
        on_change_value(&end, move |v| vm.set_end_date(v))?;
    }
    append_child(&filters, &render_field("Sampai Tanggal", end)?)?;

    let kinds: Vec<(String, String)> = [ReportKind::Attendance, ReportKind::Leave]
        .iter()
        .map(|k| (k.as_wire().to_string(), k.label().to_string()))
        .collect();
    let kind = select_input(&kinds, state.get_kind().as_wire())?;
    {
        let vm = ctx.reports.clone();
        on_change_value(&kind, move |v| vm.set_kind(ReportKind::from_wire(&v)))?;
    }
    append_child(&filters, &render_field("Jenis Laporan", kind)?)?;

    let show = ElementBuilder::new("button")?
        .class("btn-primary")
        .flag("disabled", state.is_loading())?
        .text("Tampilkan")
        .build();
    {
        let vm = ctx.reports.clone();
        on_click(&show, move |_| {
            let vm = vm.clone();
            wasm_bindgen_futures::spawn_local(async move {
                vm.load().await;
            });
        })?;
    }
    append_child(&filters, &show)?;

    let exporting = state.is_exporting();
    let pdf = ElementBuilder::new("button")?
        .class("btn-secondary")
        .flag("disabled", exporting)?
        .text(if exporting { "Menyiapkan PDF..." } else { "Download PDF" })
        .build();
    {
        let vm = ctx.reports.clone();
        on_click(&pdf, move |_| {
            let vm = vm.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(export) = vm.export_pdf().await {
                    if let Err(e) = download_bytes(&export.bytes, &export.file_name, "application/pdf") {
                        log::error!("❌ [LAPORAN] Descarga fallida: {:?}", e);
                    }
                }
            });
        })?;
    }
    append_child(&filters, &pdf)?;
    append_child(&page, &filters)?;

    if let Some(error) = state.get_error() {
        append_child(&page, &render_error(&error)?)?;
    }
    if state.is_loading() {
        append_child(&page, &render_loading("Memuat laporan...")?)?;
        return Ok(page);
    }

    let kind = state.get_kind();
    let (headers, rows) = report_table(kind, state.get_rows());
    append_child(&page, &render_table(&headers, rows, "Belum ada data untuk periode ini.")?)?;

    Ok(page)
}

/// Cabeceras + filas según el tipo de reporte
fn report_table(kind: ReportKind, rows: Vec<ReportRow>) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    match kind {
        ReportKind::Attendance => (
            vec!["Tanggal", "Nama", "Masuk", "Pulang", "Status"],
            rows.iter()
                .map(|r| {
                    vec![
                        r.tanggal.clone(),
                        r.nama_karyawan.clone(),
                        dash(&r.jam_masuk),
                        dash(&r.jam_pulang),
                        r.status.clone(),
                    ]
                })
                .collect(),
        ),
        ReportKind::Leave => (
            vec!["Tanggal", "Nama", "Status", "Keterangan"],
            rows.iter()
                .map(|r| {
                    vec![
                        r.tanggal.clone(),
                        r.nama_karyawan.clone(),
                        r.status.clone(),
                        dash(&r.keterangan),
                    ]
                })
                .collect(),
        ),
    }
}
