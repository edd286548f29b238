pub mod admin_viewmodel;
pub mod attendance_viewmodel;
pub mod leave_viewmodel;
pub mod notification_viewmodel;
pub mod report_viewmodel;
pub mod roster_viewmodel;
pub mod session_viewmodel;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin_viewmodel::AdminViewModel;
pub use attendance_viewmodel::{AttendanceViewModel, SubmissionOutcome};
pub use leave_viewmodel::LeaveViewModel;
pub use notification_viewmodel::NotificationViewModel;
pub use report_viewmodel::{PdfExport, ReportViewModel};
pub use roster_viewmodel::RosterViewModel;
pub use session_viewmodel::SessionViewModel;
