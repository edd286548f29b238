// ============================================================================
// LAYOUT VIEW - Sidebar, topbar, banners y piezas compartidas
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::dom::{append_child, confirm, on_click, ElementBuilder};
use crate::models::auth::initials;
use crate::state::{Banner, BannerKind, Screen};

const LOGOUT_CONFIRM: &str = "Apakah Anda yakin ingin keluar?";

/// Shell autenticado: sidebar + topbar + contenido
pub fn render_layout(ctx: &AppContext, screen: Screen, content: Element) -> Result<Element, JsValue> {
    let class = if ctx.state.is_sidebar_open() {
        "layout sidebar-open"
    } else {
        "layout"
    };
    let layout = ElementBuilder::new("div")?.class(class).build();

    append_child(&layout, &render_sidebar(ctx, screen)?)?;

    let main = ElementBuilder::new("div")?.class("layout-main").build();
    append_child(&main, &render_topbar(ctx, screen)?)?;
    if ctx.state.notifications.is_panel_open() {
        append_child(&main, &render_notification_panel(ctx)?)?;
    }
    let body = ElementBuilder::new("main")?.class("layout-content").child(content)?.build();
    append_child(&main, &body)?;
    append_child(&layout, &main)?;

    Ok(layout)
}

fn render_sidebar(ctx: &AppContext, current: Screen) -> Result<Element, JsValue> {
    let sidebar = ElementBuilder::new("aside")?.class("sidebar").build();

    let brand = ElementBuilder::new("div")?
        .class("sidebar-brand")
        .child(ElementBuilder::new("h1")?.text("Absen Damirich").build())?
        .build();
    if let Some(role) = ctx.state.session.role() {
        append_child(
            &brand,
            &ElementBuilder::new("span")?.class("sidebar-role").text(role.label()).build(),
        )?;
    }
    append_child(&sidebar, &brand)?;

    let nav = ElementBuilder::new("nav")?.class("sidebar-nav").build();
    if let Some(role) = ctx.state.session.role() {
        for &screen in Screen::menu_for(role) {
            let class = if screen == current { "nav-item active" } else { "nav-item" };
            let item = ElementBuilder::new("button")?.class(class).text(screen.title()).build();
            let ctx = ctx.clone();
            on_click(&item, move |_| ctx.go_to(screen))?;
            append_child(&nav, &item)?;
        }
    }
    append_child(&sidebar, &nav)?;

    let logout = ElementBuilder::new("button")?.class("nav-item logout").text("Logout").build();
    {
        let session = ctx.session.clone();
        on_click(&logout, move |_| {
            if confirm(LOGOUT_CONFIRM) {
                session.logout();
            }
        })?;
    }
    append_child(&sidebar, &logout)?;

    Ok(sidebar)
}

fn render_topbar(ctx: &AppContext, screen: Screen) -> Result<Element, JsValue> {
    let topbar = ElementBuilder::new("header")?.class("topbar").build();

    let menu_btn = ElementBuilder::new("button")?.class("btn-menu").text("☰").build();
    {
        let state = ctx.state.clone();
        on_click(&menu_btn, move |_| state.toggle_sidebar())?;
    }
    append_child(&topbar, &menu_btn)?;
    append_child(&topbar, &ElementBuilder::new("h2")?.text(screen.title()).build())?;

    let actions = ElementBuilder::new("div")?.class("topbar-actions").build();

    let unread = ctx.state.notifications.unread();
    let bell = ElementBuilder::new("button")?.class("btn-bell").text("🔔").build();
    if unread > 0 {
        append_child(
            &bell,
            &ElementBuilder::new("span")?.class("badge").text(&unread.to_string()).build(),
        )?;
    }
    {
        let vm = ctx.notifications.clone();
        on_click(&bell, move |_| vm.toggle_panel())?;
    }
    append_child(&actions, &bell)?;

    if let Some(identity) = ctx.state.session.get_identity() {
        let user = ElementBuilder::new("div")?
            .class("topbar-user")
            .child(
                ElementBuilder::new("span")?
                    .class("avatar")
                    .text(&initials(&identity.profile.name))
                    .build(),
            )?
            .child(ElementBuilder::new("span")?.class("user-name").text(&identity.profile.name).build())?
            .build();
        append_child(&actions, &user)?;
    }
    append_child(&topbar, &actions)?;

    Ok(topbar)
}

fn render_notification_panel(ctx: &AppContext) -> Result<Element, JsValue> {
    let panel = ElementBuilder::new("div")?.class("notification-panel").build();
    let items = ctx.state.notifications.get_items();

    if items.is_empty() {
        append_child(
            &panel,
            &ElementBuilder::new("p")?.class("empty").text("Tidak ada notifikasi").build(),
        )?;
        return Ok(panel);
    }

    for notification in items {
        let class = if notification.is_unread() {
            "notification-item unread"
        } else {
            "notification-item"
        };
        let item = ElementBuilder::new("div")?.class(class).build();
        if let Some(title) = &notification.title {
            append_child(&item, &ElementBuilder::new("strong")?.text(title).build())?;
        }
        append_child(&item, &ElementBuilder::new("p")?.text(&notification.message).build())?;
        if let Some(created) = &notification.created_at {
            append_child(&item, &ElementBuilder::new("small")?.text(created).build())?;
        }
        if notification.is_unread() {
            let vm = ctx.notifications.clone();
            let id = notification.id;
            on_click(&item, move |_| {
                let vm = vm.clone();
                wasm_bindgen_futures::spawn_local(async move { vm.mark_read(id).await });
            })?;
        }
        append_child(&panel, &item)?;
    }

    Ok(panel)
}

// ----------------------------------------------------------------------------
// Piezas compartidas
// ----------------------------------------------------------------------------

/// Banner de resultado; `on_dismiss` añade el botón de cerrar
pub fn render_banner(banner: &Banner, on_dismiss: Option<Rc<dyn Fn()>>) -> Result<Element, JsValue> {
    let class = match banner.kind {
        BannerKind::Success => "banner banner-success",
        BannerKind::Error => "banner banner-error",
        BannerKind::Info => "banner banner-info",
    };
    let element = ElementBuilder::new("div")?
        .class(class)
        .attr("role", "alert")?
        .child(ElementBuilder::new("span")?.text(&banner.message).build())?
        .build();

    if let Some(on_dismiss) = on_dismiss {
        let close = ElementBuilder::new("button")?.class("btn-close").text("✕").build();
        on_click(&close, move |_| on_dismiss())?;
        append_child(&element, &close)?;
    }
    Ok(element)
}

/// Mensaje de error en línea
pub fn render_error(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("p")?.class("form-error").text(message).build())
}

/// Campo de formulario con etiqueta
pub fn render_field(label: &str, control: Element) -> Result<Element, JsValue> {
    ElementBuilder::new("label")?
        .class("form-field")
        .child(ElementBuilder::new("span")?.text(label).build())?
        .child(control)
        .map(ElementBuilder::build)
}

/// `<input>` con tipo, valor y placeholder
pub fn text_input(input_type: &str, value: &str, placeholder: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("input")?
        .attr("type", input_type)?
        .attr("placeholder", placeholder)?
        .value(value)
        .build())
}

/// `<select>` con opciones (valor, texto); `selected` marca la activa
pub fn select_input(options: &[(String, String)], selected: &str) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.build();
    for (value, label) in options {
        let option = ElementBuilder::new("option")?.attr("value", value)?.text(label).build();
        append_child(&select, &option)?;
    }
    crate::dom::set_input_value(&select, selected);
    Ok(select)
}

/// Tabla simple: cabeceras + filas de texto
pub fn render_table(headers: &[&str], rows: Vec<Vec<String>>, empty: &str) -> Result<Element, JsValue> {
    let table = ElementBuilder::new("table")?.class("data-table").build();

    let head_row = ElementBuilder::new("tr")?.build();
    for header in headers {
        append_child(&head_row, &ElementBuilder::new("th")?.text(header).build())?;
    }
    append_child(&table, &ElementBuilder::new("thead")?.child(head_row)?.build())?;

    let body = ElementBuilder::new("tbody")?.build();
    if rows.is_empty() {
        let cell = ElementBuilder::new("td")?
            .class("empty")
            .attr("colspan", &headers.len().to_string())?
            .text(empty)
            .build();
        append_child(&body, &ElementBuilder::new("tr")?.child(cell)?.build())?;
    }
    for row in rows {
        let tr = ElementBuilder::new("tr")?.build();
        for value in row {
            append_child(&tr, &ElementBuilder::new("td")?.text(&value).build())?;
        }
        append_child(&body, &tr)?;
    }
    append_child(&table, &body)?;

    Ok(table)
}

/// Spinner de carga
pub fn render_loading(text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?.class("loading").text(text).build())
}
