// ============================================================================
// SETTINGS VIEW - Perfil de la sesión actual (solo lectura)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::dom::{append_child, ElementBuilder};
use crate::models::auth::initials;

fn info_row(label: &str, value: &str) -> Result<Element, JsValue> {
    ElementBuilder::new("div")?
        .class("info-row")
        .child(ElementBuilder::new("span")?.class("label").text(label).build())?
        .child(ElementBuilder::new("span")?.class("value").text(value).build())
        .map(ElementBuilder::build)
}

/// Renderizar pantalla de ajustes
pub fn render_settings(ctx: &AppContext) -> Result<Element, JsValue> {
    let page = ElementBuilder::new("div")?
        .class("page settings")
        .child(ElementBuilder::new("h1")?.text("Settings").build())?
        .child(
            ElementBuilder::new("p")?
                .class("subtitle")
                .text("Kelola pengaturan akun dan preferensi Anda")
                .build(),
        )?
        .build();

    let Some(identity) = ctx.state.session.get_identity() else {
        return Ok(page);
    };
    let profile = identity.profile;

    let card = ElementBuilder::new("section")?
        .class("card profile")
        .child(ElementBuilder::new("h2")?.text("Profil").build())?
        .child(ElementBuilder::new("div")?.class("avatar large").text(&initials(&profile.name)).build())?
        .child(info_row("Nama", &profile.name)?)?
        .child(info_row("Email", &profile.email)?)?
        .child(info_row("Peran", profile.role.label())?)?
        .build();

    if let Some(token) = &profile.attendance_token {
        append_child(&card, &info_row("Token Absen", token)?)?;
    }
    append_child(&page, &card)?;

    Ok(page)
}
