pub mod admin;
pub mod attendance;
pub mod auth;
pub mod employee;
pub mod leave;
pub mod notification;

pub use admin::{AdminLeave, DailyStats, GeneratedToken, ReportFilter, ReportKind, ReportRow};
pub use attendance::{AttendanceAction, AttendanceRecord, AttendanceToken, SubmissionRequest, TodayStatus};
pub use auth::{Role, SessionIdentity, UserProfile};
pub use employee::{Employee, NewEmployee};
pub use leave::{LeaveDraft, LeaveRequest, LeaveStatus, LeaveType, NewLeaveRequest};
pub use notification::Notification;
