// ============================================================================
// APP VIEW - Router de pantallas (sin lógica)
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::state::Screen;
use crate::views::{
    render_admin_dashboard, render_dashboard, render_employees, render_layout, render_leave_requests,
    render_login, render_register, render_reports, render_settings,
};

/// Renderizar la pantalla efectiva (pantallas privadas dentro del layout)
pub fn render_app(ctx: &AppContext) -> Result<Element, JsValue> {
    let screen = ctx.state.current_screen();
    let content = match screen {
        Screen::Login => return render_login(ctx),
        Screen::Register => return render_register(ctx),
        Screen::Dashboard => render_dashboard(ctx)?,
        Screen::LeaveRequests => render_leave_requests(ctx)?,
        Screen::AdminDashboard => render_admin_dashboard(ctx)?,
        Screen::Employees => render_employees(ctx)?,
        Screen::Reports => render_reports(ctx)?,
        Screen::Settings => render_settings(ctx)?,
    };
    render_layout(ctx, screen, content)
}
