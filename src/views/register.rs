// ============================================================================
// REGISTER VIEW - Registro de empleado
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::dom::{append_child, on_change_value, on_click, on_input_value, on_submit, ElementBuilder};
use crate::models::auth::{DIVISIONS, POSITIONS};
use crate::state::{RegisterForm, Screen};
use crate::views::layout::{render_error, render_field, select_input, text_input};

/// Input de texto enlazado a un campo del formulario de registro
fn bound_input(
    ctx: &AppContext,
    input_type: &str,
    value: &str,
    placeholder: &str,
    update: fn(&mut RegisterForm, String),
) -> Result<Element, JsValue> {
    let input = text_input(input_type, value, placeholder)?;
    let vm = ctx.session.clone();
    on_input_value(&input, move |v| vm.update_register_form(|form| update(form, v)))?;
    Ok(input)
}

/// Renderizar pantalla de registro
pub fn render_register(ctx: &AppContext) -> Result<Element, JsValue> {
    let session = &ctx.state.session;
    let form_state = session.register_form.borrow().clone();

    let container = ElementBuilder::new("div")?.class("auth-page").build();
    let card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(ElementBuilder::new("h1")?.text("Registrasi Karyawan").build())?
        .build();

    let form = ElementBuilder::new("form")?.class("auth-form").build();

    let fields: [(&str, &str, &str, &str, fn(&mut RegisterForm, String)); 5] = [
        ("Nama Lengkap", "text", form_state.name.as_str(), "Nama lengkap", |f, v| f.name = v),
        ("Email", "email", form_state.email.as_str(), "nama@perusahaan.com", |f, v| f.email = v),
        ("Password", "password", form_state.password.as_str(), "Minimal 8 karakter", |f, v| f.password = v),
        (
            "Konfirmasi Password",
            "password",
            form_state.password_confirmation.as_str(),
            "Ulangi password",
            |f, v| f.password_confirmation = v,
        ),
        ("Tanggal Masuk", "date", form_state.join_date.as_str(), "", |f, v| f.join_date = v),
    ];
    for (label, input_type, value, placeholder, update) in fields {
        append_child(&form, &render_field(label, bound_input(ctx, input_type, value, placeholder, update)?)?)?;
    }

    let divisions: Vec<(String, String)> = DIVISIONS
        .iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect();
    let division = select_input(&divisions, &form_state.division_id)?;
    {
        let vm = ctx.session.clone();
        on_change_value(&division, move |v| vm.update_register_form(|f| f.division_id = v))?;
    }
    append_child(&form, &render_field("Divisi", division)?)?;

    let positions: Vec<(String, String)> = POSITIONS
        .iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect();
    let position = select_input(&positions, &form_state.position_id)?;
    {
        let vm = ctx.session.clone();
        on_change_value(&position, move |v| vm.update_register_form(|f| f.position_id = v))?;
    }
    append_child(&form, &render_field("Posisi", position)?)?;

    if let Some(error) = session.get_register_error() {
        append_child(&form, &render_error(&error)?)?;
    }

    let busy = session.is_busy();
    let submit = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "submit")?
        .flag("disabled", busy)?
        .text(if busy { "Memproses..." } else { "Daftar" })
        .build();
    append_child(&form, &submit)?;

    {
        let vm = ctx.session.clone();
        on_submit(&form, move || {
            let vm = vm.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let _ = vm.register().await;
            });
        })?;
    }
    append_child(&card, &form)?;

    let login_link = ElementBuilder::new("button")?
        .class("btn-link")
        .text("Sudah punya akun? Login")
        .build();
    {
        let state = ctx.state.clone();
        on_click(&login_link, move |_| state.navigate(Screen::Login))?;
    }
    append_child(&card, &login_link)?;

    append_child(&container, &card)?;
    Ok(container)
}
