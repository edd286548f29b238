// ============================================================================
// LOGIN VIEW - Formulario de acceso (Rust puro)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::dom::{append_child, on_click, on_input_value, on_submit, ElementBuilder};
use crate::state::{Banner, Screen};
use crate::views::layout::{render_banner, render_error, render_field, text_input};

/// Renderizar pantalla de login
pub fn render_login(ctx: &AppContext) -> Result<Element, JsValue> {
    let session = &ctx.state.session;
    let container = ElementBuilder::new("div")?.class("auth-page").build();
    let card = ElementBuilder::new("div")?
        .class("auth-card")
        .child(ElementBuilder::new("h1")?.text("Absen Damirich").build())?
        .child(ElementBuilder::new("p")?.class("subtitle").text("Silakan masuk ke akun Anda").build())?
        .build();

    if let Some(notice) = session.get_notice() {
        append_child(&card, &render_banner(&Banner::info(notice), None)?)?;
    }

    let form = ElementBuilder::new("form")?.class("auth-form").build();

    let email = text_input("email", &session.login_email.borrow(), "nama@perusahaan.com")?;
    {
        let vm = ctx.session.clone();
        on_input_value(&email, move |value| vm.set_login_email(value))?;
    }
    append_child(&form, &render_field("Email", email)?)?;

    let password = text_input("password", &session.login_password.borrow(), "••••••••")?;
    {
        let vm = ctx.session.clone();
        on_input_value(&password, move |value| vm.set_login_password(value))?;
    }
    append_child(&form, &render_field("Password", password)?)?;

    if let Some(error) = session.get_login_error() {
        append_child(&form, &render_error(&error)?)?;
    }

    let busy = session.is_busy();
    let submit = ElementBuilder::new("button")?
        .class("btn-primary")
        .attr("type", "submit")?
        .flag("disabled", busy)?
        .text(if busy { "Memproses..." } else { "Login" })
        .build();
    append_child(&form, &submit)?;

    {
        let ctx = ctx.clone();
        on_submit(&form, move || {
            let ctx = ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Ok(role) = ctx.session.login().await {
                    ctx.load_screen(Screen::home_for(role));
                }
            });
        })?;
    }
    append_child(&card, &form)?;

    let register_link = ElementBuilder::new("button")?
        .class("btn-link")
        .text("Belum punya akun? Daftar di sini")
        .build();
    {
        let state = ctx.state.clone();
        on_click(&register_link, move |_| state.navigate(Screen::Register))?;
    }
    append_child(&card, &register_link)?;

    append_child(&container, &card)?;
    Ok(container)
}
