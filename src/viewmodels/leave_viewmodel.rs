// ============================================================================
// LEAVE VIEWMODEL - Solicitudes de permiso del empleado
// ============================================================================

use std::rc::Rc;

use crate::errors::ValidationError;
use crate::models::leave::{parse_date, LeaveDraft, NewLeaveRequest};
use crate::services::traits::LeaveApi;
use crate::state::{Banner, ChangeNotifier, LeaveState};

const LOAD_ERROR: &str = "Gagal memuat data cuti.";
const SUBMIT_ERROR: &str = "Gagal mengajukan cuti.";
const CANCEL_ERROR: &str = "Gagal membatalkan pengajuan cuti.";

/// Valida el borrador antes de cualquier petición
pub fn validate_draft(draft: &LeaveDraft) -> Result<NewLeaveRequest, ValidationError> {
    let reason = draft.reason.trim();
    if draft.start_date.trim().is_empty() || draft.end_date.trim().is_empty() || reason.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    let start = parse_date(&draft.start_date).ok_or(ValidationError::InvalidDate)?;
    let end = parse_date(&draft.end_date).ok_or(ValidationError::InvalidDate)?;
    if end < start {
        return Err(ValidationError::EndBeforeStart);
    }
    Ok(NewLeaveRequest {
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
        leave_type: draft.leave_type,
        reason: reason.to_string(),
    })
}

#[derive(Clone)]
pub struct LeaveViewModel {
    state: LeaveState,
    api: Rc<dyn LeaveApi>,
    notifier: ChangeNotifier,
}

impl LeaveViewModel {
    pub fn new(state: LeaveState, api: Rc<dyn LeaveApi>, notifier: ChangeNotifier) -> Self {
        Self { state, api, notifier }
    }

    pub fn state(&self) -> &LeaveState {
        &self.state
    }

    pub async fn load(&self) {
        *self.state.loading.borrow_mut() = true;
        self.notifier.notify();

        let result = self.api.list_leaves().await;
        match result {
            Ok(requests) => {
                log::info!("📋 [CUTI] {} solicitudes", requests.len());
                *self.state.requests.borrow_mut() = requests;
            }
            Err(e) => {
                log::error!("❌ [CUTI] {}", e);
                *self.state.banner.borrow_mut() = Some(Banner::error(LOAD_ERROR));
            }
        }
        *self.state.loading.borrow_mut() = false;
        self.notifier.notify();
    }

    pub fn open_form(&self, open: bool) {
        *self.state.form_open.borrow_mut() = open;
        *self.state.form_error.borrow_mut() = None;
        self.notifier.notify();
    }

    /// Actualiza el borrador sin re-render (inputs controlados por el DOM)
    pub fn update_draft<F: FnOnce(&mut LeaveDraft)>(&self, update: F) {
        update(&mut self.state.draft.borrow_mut());
    }

    pub async fn submit(&self) -> bool {
        if self.state.is_submitting() {
            return false;
        }
        let request = match validate_draft(&self.state.get_draft()) {
            Ok(request) => request,
            Err(e) => {
                *self.state.form_error.borrow_mut() = Some(e.to_string());
                self.notifier.notify();
                return false;
            }
        };

        *self.state.submitting.borrow_mut() = true;
        *self.state.form_error.borrow_mut() = None;
        self.notifier.notify();

        let result = self.api.create_leave(&request).await;
        *self.state.submitting.borrow_mut() = false;

        match result {
            Ok(()) => {
                log::info!("✅ [CUTI] Solicitud enviada");
                *self.state.draft.borrow_mut() = LeaveDraft::default();
                *self.state.form_open.borrow_mut() = false;
                *self.state.banner.borrow_mut() =
                    Some(Banner::success("Pengajuan cuti berhasil dikirim."));
                self.load().await;
                true
            }
            Err(e) => {
                *self.state.form_error.borrow_mut() =
                    Some(e.backend_message().unwrap_or(SUBMIT_ERROR).to_string());
                self.notifier.notify();
                false
            }
        }
    }

    /// Cancela una solicitud (la confirmación la pide la vista)
    pub async fn cancel(&self, id: u64) -> bool {
        let result = self.api.cancel_leave(id).await;
        match result {
            Ok(()) => {
                log::info!("🗑️ [CUTI] Solicitud {} cancelada", id);
                *self.state.banner.borrow_mut() = Some(Banner::success("Pengajuan cuti dibatalkan."));
                self.load().await;
                true
            }
            Err(e) => {
                *self.state.banner.borrow_mut() = Some(Banner::error(
                    e.backend_message().unwrap_or(CANCEL_ERROR).to_string(),
                ));
                self.notifier.notify();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::models::leave::{LeaveRequest, LeaveStatus, LeaveType};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeLeaveApi {
        list: RefCell<Vec<LeaveRequest>>,
        created: RefCell<Vec<NewLeaveRequest>>,
        cancelled: RefCell<Vec<u64>>,
        fail_create: RefCell<Option<ApiError>>,
    }

    #[async_trait(?Send)]
    impl LeaveApi for FakeLeaveApi {
        async fn list_leaves(&self) -> Result<Vec<LeaveRequest>, ApiError> {
            Ok(self.list.borrow().clone())
        }

        async fn create_leave(&self, request: &NewLeaveRequest) -> Result<(), ApiError> {
            if let Some(e) = self.fail_create.borrow_mut().take() {
                return Err(e);
            }
            self.created.borrow_mut().push(request.clone());
            self.list.borrow_mut().push(LeaveRequest {
                id: 10,
                start_date: request.start_date.clone(),
                end_date: request.end_date.clone(),
                leave_type: request.leave_type,
                reason: request.reason.clone(),
                status: LeaveStatus::Pending,
            });
            Ok(())
        }

        async fn cancel_leave(&self, id: u64) -> Result<(), ApiError> {
            self.cancelled.borrow_mut().push(id);
            self.list.borrow_mut().retain(|r| r.id != id);
            Ok(())
        }
    }

    fn draft(start: &str, end: &str, reason: &str) -> LeaveDraft {
        LeaveDraft {
            start_date: start.into(),
            end_date: end.into(),
            leave_type: LeaveType::Sick,
            reason: reason.into(),
        }
    }

    fn vm() -> (LeaveViewModel, Rc<FakeLeaveApi>) {
        let api = Rc::new(FakeLeaveApi::default());
        (LeaveViewModel::new(LeaveState::new(), api.clone(), ChangeNotifier::new()), api)
    }

    #[test]
    fn validation_rules() {
        assert_eq!(validate_draft(&draft("", "2026-10-20", "x")), Err(ValidationError::MissingFields));
        assert_eq!(validate_draft(&draft("2026-10-20", "2026-10-21", "   ")), Err(ValidationError::MissingFields));
        assert_eq!(
            validate_draft(&draft("2026-10-22", "2026-10-20", "Demam")),
            Err(ValidationError::EndBeforeStart)
        );
        assert_eq!(validate_draft(&draft("22/10/2026", "2026-10-20", "x")), Err(ValidationError::InvalidDate));

        let ok = validate_draft(&draft("2026-10-20", "2026-10-20", "  Demam ")).unwrap();
        assert_eq!(ok.reason, "Demam");
    }

    #[test]
    fn invalid_draft_never_reaches_backend() {
        let (vm, api) = vm();
        vm.update_draft(|d| *d = draft("2026-10-22", "2026-10-20", "Demam"));
        assert!(!block_on(vm.submit()));
        assert!(api.created.borrow().is_empty());
        assert_eq!(
            vm.state().get_form_error(),
            Some(ValidationError::EndBeforeStart.to_string())
        );
    }

    #[test]
    fn submit_then_list_is_refreshed() {
        let (vm, api) = vm();
        vm.open_form(true);
        vm.update_draft(|d| *d = draft("2026-10-20", "2026-10-21", "Demam"));
        assert!(block_on(vm.submit()));
        assert_eq!(api.created.borrow().len(), 1);
        assert_eq!(vm.state().get_requests().len(), 1);
        assert!(!vm.state().is_form_open());
        assert_eq!(vm.state().get_draft(), LeaveDraft::default());
    }

    #[test]
    fn backend_rejection_keeps_form() {
        let (vm, api) = vm();
        *api.fail_create.borrow_mut() = Some(ApiError::Http { status: 422, message: "Sisa cuti tidak cukup".into() });
        vm.open_form(true);
        vm.update_draft(|d| *d = draft("2026-10-20", "2026-10-21", "Liburan"));
        assert!(!block_on(vm.submit()));
        assert!(vm.state().is_form_open());
        assert_eq!(vm.state().get_form_error().as_deref(), Some("Sisa cuti tidak cukup"));
    }

    #[test]
    fn cancel_removes_request_after_reload() {
        let (vm, api) = vm();
        vm.update_draft(|d| *d = draft("2026-10-20", "2026-10-21", "Demam"));
        block_on(vm.submit());
        assert!(block_on(vm.cancel(10)));
        assert_eq!(*api.cancelled.borrow(), vec![10]);
        assert!(vm.state().get_requests().is_empty());
    }
}
