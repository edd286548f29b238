// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod admin_state;
pub mod app_state;
pub mod attendance_state;
pub mod leave_state;
pub mod notification_state;
pub mod reactivity;
pub mod session_state;

pub use admin_state::*;
pub use app_state::*;
pub use attendance_state::*;
pub use leave_state::*;
pub use notification_state::*;
pub use reactivity::*;
pub use session_state::*;
