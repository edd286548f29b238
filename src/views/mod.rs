pub mod admin_dashboard;
pub mod app;
pub mod dashboard;
pub mod employees;
pub mod layout;
pub mod leave_request;
pub mod login;
pub mod register;
pub mod reports;
pub mod scanner;
pub mod settings;

pub use admin_dashboard::render_admin_dashboard;
pub use app::render_app;
pub use dashboard::render_dashboard;
pub use employees::render_employees;
pub use layout::render_layout;
pub use leave_request::render_leave_requests;
pub use login::render_login;
pub use register::render_register;
pub use reports::render_reports;
pub use scanner::{render_attendance_modal, update_attendance_modal};
pub use settings::render_settings;
