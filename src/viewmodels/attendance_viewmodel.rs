// ============================================================================
// ATTENDANCE VIEWMODEL - Flujo de envío de asistencia + historial
// ============================================================================
// Idle → LocationPending → Submitting → (Succeeded | RecoverableFailure | FatalFailure)
// Ningún borrow de RefCell cruza un `.await`.
// ============================================================================

use std::rc::Rc;

use chrono::NaiveDateTime;

use crate::errors::{ApiError, ValidationError};
use crate::models::attendance::{AttendanceAction, AttendanceToken, SubmissionRequest, TodayStatus};
use crate::services::traits::{AttendanceApi, GeolocationProvider};
use crate::state::{
    AcquisitionMode, AttendanceModal, AttendanceState, Banner, ChangeNotifier, WorkflowPhase,
};

pub const GENERIC_SUBMIT_ERROR: &str =
    "Gagal absen. Pastikan GPS aktif, token benar, atau Server berjalan.";
pub const HISTORY_ERROR: &str = "Gagal memuat status kehadiran (Server/CORS Error).";
const EARLY_CLOCK_OUT: &str = "Belum jam pulang. Clock Out belum dapat dilakukan.";
const FORBIDDEN_CLOCK_IN: &str = "Absen ditolak. Token QR tidak valid atau sudah kedaluwarsa.";
const ALREADY_RECORDED: &str = "Absensi sudah tercatat hari ini.";
const SESSION_EXPIRED: &str = "Sesi berakhir. Silakan login kembali.";

/// Resultado de un intento de envío
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// No había modal abierto o ya había un intento en curso
    Ignored,
    /// Validación local fallida, no se tocó la red
    Rejected,
    /// El usuario canceló antes de emitir la petición
    Cancelled,
    Succeeded,
    RecoverableFailure,
    FatalFailure,
}

enum Failure {
    Recoverable(String),
    Fatal(String),
}

/// Clasifica el rechazo por código HTTP
fn classify(action: AttendanceAction, error: &ApiError) -> Failure {
    let backend = error.backend_message().map(str::to_string);
    match error.status() {
        Some(403) => Failure::Recoverable(backend.unwrap_or_else(|| {
            match action {
                AttendanceAction::ClockOut => EARLY_CLOCK_OUT,
                AttendanceAction::ClockIn => FORBIDDEN_CLOCK_IN,
            }
            .to_string()
        })),
        Some(409) => Failure::Fatal(backend.unwrap_or_else(|| ALREADY_RECORDED.to_string())),
        Some(401) => Failure::Fatal(backend.unwrap_or_else(|| SESSION_EXPIRED.to_string())),
        _ => Failure::Recoverable(backend.unwrap_or_else(|| GENERIC_SUBMIT_ERROR.to_string())),
    }
}

fn success_message(action: AttendanceAction) -> String {
    match action {
        AttendanceAction::ClockIn => "Berhasil Clock In!".to_string(),
        AttendanceAction::ClockOut => "Berhasil Clock Out!".to_string(),
    }
}

/// ViewModel de asistencia
#[derive(Clone)]
pub struct AttendanceViewModel {
    state: AttendanceState,
    api: Rc<dyn AttendanceApi>,
    geolocation: Rc<dyn GeolocationProvider>,
    clock: Rc<dyn Fn() -> NaiveDateTime>,
    notifier: ChangeNotifier,
}

impl AttendanceViewModel {
    pub fn new(
        state: AttendanceState,
        api: Rc<dyn AttendanceApi>,
        geolocation: Rc<dyn GeolocationProvider>,
        notifier: ChangeNotifier,
    ) -> Self {
        Self::with_clock(
            state,
            api,
            geolocation,
            notifier,
            Rc::new(|| chrono::Local::now().naive_local()),
        )
    }

    pub fn with_clock(
        state: AttendanceState,
        api: Rc<dyn AttendanceApi>,
        geolocation: Rc<dyn GeolocationProvider>,
        notifier: ChangeNotifier,
        clock: Rc<dyn Fn() -> NaiveDateTime>,
    ) -> Self {
        Self {
            state,
            api,
            geolocation,
            clock,
            notifier,
        }
    }

    pub fn state(&self) -> &AttendanceState {
        &self.state
    }

    // ------------------------------------------------------------------------
    // Modal de captura
    // ------------------------------------------------------------------------

    /// Abre el modal para `action`. Cierra cualquier otro modal.
    pub fn open(&self, action: AttendanceAction, mode: AcquisitionMode) -> bool {
        if self.state.get_phase().is_busy() {
            log::warn!("⚠️ [ABSEN] Intento en curso, se ignora la apertura");
            return false;
        }
        self.state.next_attempt();
        self.state.set_modal(Some(AttendanceModal { action, mode }));
        self.state.set_token_input(String::new());
        self.state.set_modal_error(None);
        self.state.set_banner(None);
        self.state.set_phase(WorkflowPhase::Idle);
        log::info!("📷 [ABSEN] Modal {:?} abierto para {}", mode, action.path());
        self.notifier.notify();
        true
    }

    /// Cambia cámara ↔ manual dentro del mismo intento (el token escrito se conserva)
    pub fn switch_mode(&self, mode: AcquisitionMode) {
        if self.state.get_phase().is_busy() {
            return;
        }
        if let Some(modal) = self.state.get_modal() {
            self.state.set_modal(Some(AttendanceModal { mode, ..modal }));
            self.state.set_modal_error(None);
            self.notifier.notify();
        }
    }

    pub fn set_token_input(&self, value: String) {
        self.state.set_token_input(value);
    }

    /// Cierra el modal. No se permite con la petición ya emitida.
    pub fn cancel(&self) -> bool {
        if self.state.get_phase() == WorkflowPhase::Submitting {
            log::warn!("⚠️ [ABSEN] Petición emitida, no se puede cancelar");
            return false;
        }
        self.state.next_attempt();
        self.state.set_modal(None);
        self.state.set_modal_error(None);
        self.state.set_phase(WorkflowPhase::Idle);
        log::info!("🚫 [ABSEN] Intento cancelado");
        self.notifier.notify();
        true
    }

    pub fn dismiss_banner(&self) {
        self.state.set_banner(None);
        self.notifier.notify();
    }

    // ------------------------------------------------------------------------
    // Envío
    // ------------------------------------------------------------------------

    /// Envío desde la entrada manual (confirmación explícita)
    pub async fn submit_manual(&self) -> SubmissionOutcome {
        if self.state.get_phase().is_busy() {
            return SubmissionOutcome::Ignored;
        }
        match AttendanceToken::parse(&self.state.get_token_input()) {
            Some(token) => self.submit(token).await,
            None => {
                self.state
                    .set_modal_error(Some(ValidationError::EmptyToken.to_string()));
                self.notifier.notify();
                SubmissionOutcome::Rejected
            }
        }
    }

    /// Envío desde la cámara. Payload vacío → se sigue escaneando.
    pub async fn submit_scanned(&self, raw: &str) -> SubmissionOutcome {
        let Some(token) = AttendanceToken::parse(raw) else {
            log::warn!("⚠️ [SCANNER] QR vacío, se sigue escaneando");
            return SubmissionOutcome::Ignored;
        };
        if self.state.get_phase().is_busy() {
            return SubmissionOutcome::Ignored;
        }
        self.state.set_token_input(token.as_str().to_string());
        self.submit(token).await
    }

    /// Geolocalización → petición → clasificación de la respuesta
    pub async fn submit(&self, token: AttendanceToken) -> SubmissionOutcome {
        let Some(modal) = self.state.get_modal() else {
            return SubmissionOutcome::Ignored;
        };
        if self.state.get_phase().is_busy() {
            log::warn!("⚠️ [ABSEN] Envío concurrente ignorado");
            return SubmissionOutcome::Ignored;
        }

        let attempt = self.state.current_attempt();
        self.state.set_phase(WorkflowPhase::LocationPending);
        self.state.set_modal_error(None);
        self.notifier.notify();

        let position = self.geolocation.current_position().await;

        if self.state.current_attempt() != attempt || self.state.get_modal().is_none() {
            log::info!("🗑️ [ABSEN] Posición tardía descartada (intento cancelado)");
            return SubmissionOutcome::Cancelled;
        }

        let coordinates = match position {
            Ok(coordinates) => coordinates,
            Err(error) => {
                self.state.set_phase(WorkflowPhase::RecoverableFailure);
                self.state.set_modal_error(Some(error.to_string()));
                self.notifier.notify();
                return SubmissionOutcome::RecoverableFailure;
            }
        };

        self.state.set_phase(WorkflowPhase::Submitting);
        self.notifier.notify();

        let request = SubmissionRequest::new(
            modal.action,
            coordinates.latitude,
            coordinates.longitude,
            &token,
        );

        match self.api.submit(&request).await {
            Ok(response) => {
                log::info!("✅ [ABSEN] {} aceptado", modal.action.path());
                let now = (self.clock)();
                self.state.set_modal(None);
                self.state.set_token_input(String::new());
                self.state.set_phase(WorkflowPhase::Succeeded);
                self.state
                    .today
                    .borrow_mut()
                    .apply(modal.action, now.format("%H:%M:%S").to_string());
                self.state.set_banner(Some(Banner::success(
                    response
                        .message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| success_message(modal.action)),
                )));
                self.notifier.notify();

                self.refresh_history().await;

                // Un intento nuevo abierto durante el refresco conserva su fase
                if self.state.current_attempt() == attempt {
                    self.state.set_phase(WorkflowPhase::Idle);
                    self.notifier.notify();
                }
                SubmissionOutcome::Succeeded
            }
            Err(error) => match classify(modal.action, &error) {
                Failure::Recoverable(message) => {
                    log::warn!("⚠️ [ABSEN] Rechazo recuperable: {}", message);
                    self.state.set_phase(WorkflowPhase::RecoverableFailure);
                    self.state.set_modal_error(Some(message));
                    self.notifier.notify();
                    SubmissionOutcome::RecoverableFailure
                }
                Failure::Fatal(message) => {
                    log::error!("❌ [ABSEN] Rechazo definitivo: {}", message);
                    self.state.set_modal(None);
                    self.state.set_token_input(String::new());
                    self.state.set_modal_error(None);
                    self.state.set_phase(WorkflowPhase::FatalFailure);
                    self.state.set_banner(Some(Banner::error(message)));
                    self.notifier.notify();
                    // Tras el refresco solo se toca el historial, nunca la fase
                    if error.status() == Some(409) {
                        self.refresh_history().await;
                    }
                    SubmissionOutcome::FatalFailure
                }
            },
        }
    }

    // ------------------------------------------------------------------------
    // Historial
    // ------------------------------------------------------------------------

    /// Recarga el historial y recalcula el estado de hoy.
    /// Si falla se conserva la lista anterior.
    pub async fn refresh_history(&self) {
        *self.state.history_loading.borrow_mut() = true;
        self.notifier.notify();

        let result = self.api.fetch_history().await;

        match result {
            Ok(records) => {
                let today = (self.clock)().date();
                *self.state.today.borrow_mut() = TodayStatus::derive(&records, today);
                *self.state.history.borrow_mut() = records;
                *self.state.history_error.borrow_mut() = None;
            }
            Err(error) => {
                log::error!("❌ [RIWAYAT] {}", error);
                *self.state.history_error.borrow_mut() = Some(HISTORY_ERROR.to_string());
            }
        }
        *self.state.history_loading.borrow_mut() = false;
        self.notifier.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GeoError;
    use crate::viewmodels::test_support::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    const TODAY: &str = "2026-10-19";

    struct Harness {
        vm: AttendanceViewModel,
        api: Rc<FakeAttendanceApi>,
        geo: Rc<FakeGeolocation>,
        renders: Rc<Cell<usize>>,
    }

    fn harness(geo: FakeGeolocation, time: &'static str) -> Harness {
        let api = Rc::new(FakeAttendanceApi::new());
        let geo = Rc::new(geo);
        let notifier = ChangeNotifier::new();
        let renders = Rc::new(Cell::new(0));
        {
            let renders = renders.clone();
            notifier.subscribe(move || renders.set(renders.get() + 1));
        }
        let vm = AttendanceViewModel::with_clock(
            AttendanceState::new(),
            api.clone(),
            geo.clone(),
            notifier,
            Rc::new(move || at(TODAY, time)),
        );
        Harness { vm, api, geo, renders }
    }

    fn type_token(vm: &AttendanceViewModel, token: &str) {
        vm.set_token_input(token.to_string());
    }

    #[test]
    fn scenario_a_clock_in_success() {
        let h = harness(FakeGeolocation::at(-6.2, 106.8), "07:58:00");
        h.api.will_accept("Berhasil absen masuk");
        h.api.history_returns(vec![record(TODAY, Some("07:58:00"), None)]);

        assert!(h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual));
        type_token(&h.vm, "  ABC123 ");
        let outcome = block_on(h.vm.submit_manual());

        assert_eq!(outcome, SubmissionOutcome::Succeeded);
        let sent = h.api.submissions.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].action, AttendanceAction::ClockIn);
        assert_eq!(sent[0].token_content, "ABC123");
        assert_eq!((sent[0].latitude, sent[0].longitude), (-6.2, 106.8));

        let state = h.vm.state();
        assert_eq!(state.get_modal(), None);
        assert_eq!(state.get_phase(), WorkflowPhase::Idle);
        assert!(state.get_today().has_clocked_in);
        assert_eq!(state.get_today().clock_in_time.as_deref(), Some("07:58:00"));
        assert_eq!(state.get_banner(), Some(Banner::success("Berhasil absen masuk")));
        assert_eq!(h.api.history_calls.get(), 1);
        assert!(h.renders.get() > 0);
    }

    #[test]
    fn scenario_b_early_clock_out_keeps_modal_and_token() {
        let h = harness(FakeGeolocation::at(-6.2, 106.8), "14:00:00");
        h.api.will_reject(403, "Belum jam pulang");

        h.vm.open(AttendanceAction::ClockOut, AcquisitionMode::Manual);
        type_token(&h.vm, "ABC123");
        let outcome = block_on(h.vm.submit_manual());

        assert_eq!(outcome, SubmissionOutcome::RecoverableFailure);
        let state = h.vm.state();
        assert_eq!(
            state.get_modal(),
            Some(AttendanceModal { action: AttendanceAction::ClockOut, mode: AcquisitionMode::Manual })
        );
        assert_eq!(state.get_token_input(), "ABC123");
        assert_eq!(state.get_modal_error().as_deref(), Some("Belum jam pulang"));
        assert!(!state.get_today().has_clocked_out);
        assert_eq!(h.api.history_calls.get(), 0);
    }

    #[test]
    fn forbidden_without_message_uses_clock_out_fallback() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "14:00:00");
        h.api.will_reject(403, "");
        h.vm.open(AttendanceAction::ClockOut, AcquisitionMode::Manual);
        type_token(&h.vm, "T");
        block_on(h.vm.submit_manual());
        assert_eq!(h.vm.state().get_modal_error().as_deref(), Some(EARLY_CLOCK_OUT));
    }

    #[test]
    fn scenario_c_duplicate_clock_in_closes_modal() {
        let h = harness(FakeGeolocation::at(-6.2, 106.8), "09:00:00");
        h.api.will_reject(409, "Anda sudah absen masuk hari ini");
        h.api.history_returns(vec![record(TODAY, Some("07:50:00"), None)]);

        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Camera);
        let outcome = block_on(h.vm.submit_scanned("ABC123"));

        assert_eq!(outcome, SubmissionOutcome::FatalFailure);
        let state = h.vm.state();
        assert_eq!(state.get_modal(), None);
        assert_eq!(state.get_phase(), WorkflowPhase::FatalFailure);
        assert_eq!(state.get_banner(), Some(Banner::error("Anda sudah absen masuk hari ini")));
        // sin reintento: el historial ya muestra la entrada
        assert_eq!(state.get_today().next_action(), Some(AttendanceAction::ClockOut));
    }

    #[test]
    fn unauthorized_is_fatal() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "09:00:00");
        h.api.will_reject(401, "");
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        type_token(&h.vm, "T");
        assert_eq!(block_on(h.vm.submit_manual()), SubmissionOutcome::FatalFailure);
        assert_eq!(h.vm.state().get_modal(), None);
        assert_eq!(h.vm.state().get_banner(), Some(Banner::error(SESSION_EXPIRED)));
        assert_eq!(h.api.history_calls.get(), 0);
    }

    #[test]
    fn other_errors_are_recoverable_with_generic_fallback() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "09:00:00");
        h.api
            .submit_results
            .borrow_mut()
            .push_back(Err(ApiError::Network("Failed to fetch".into())));
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        type_token(&h.vm, "T");
        assert_eq!(block_on(h.vm.submit_manual()), SubmissionOutcome::RecoverableFailure);
        assert_eq!(h.vm.state().get_modal_error().as_deref(), Some(GENERIC_SUBMIT_ERROR));
        assert!(h.vm.state().get_modal().is_some());
    }

    #[test]
    fn scenario_d_permission_denied_sends_nothing() {
        let h = harness(FakeGeolocation::failing(GeoError::PermissionDenied), "08:00:00");
        h.vm.state().history.borrow_mut().push(record("2026-10-18", Some("08:00:00"), None));

        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        type_token(&h.vm, "ABC123");
        let outcome = block_on(h.vm.submit_manual());

        assert_eq!(outcome, SubmissionOutcome::RecoverableFailure);
        assert!(h.api.submissions.borrow().is_empty());
        assert_eq!(h.api.history_calls.get(), 0);
        let state = h.vm.state();
        assert_eq!(state.get_history().len(), 1);
        assert_eq!(state.get_token_input(), "ABC123");
        assert_eq!(
            state.get_modal_error(),
            Some(GeoError::PermissionDenied.to_string())
        );
    }

    #[test]
    fn scenario_e_non_list_history_renders_empty() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        // la API ya devuelve lista vacía para `data` que no es lista
        let parsed = crate::models::attendance::parse_history(&serde_json::json!({"data": {"x": 1}}));
        h.api.history_returns(parsed);
        block_on(h.vm.refresh_history());
        assert!(h.vm.state().get_history().is_empty());
        assert_eq!(h.vm.state().get_today(), TodayStatus::default());
        assert_eq!(h.vm.state().get_history_error(), None);
    }

    #[test]
    fn empty_manual_token_never_hits_network() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        type_token(&h.vm, "   ");
        assert_eq!(block_on(h.vm.submit_manual()), SubmissionOutcome::Rejected);
        assert_eq!(h.geo.calls.get(), 0);
        assert_eq!(
            h.vm.state().get_modal_error(),
            Some(ValidationError::EmptyToken.to_string())
        );
    }

    #[test]
    fn empty_clock_out_token_uses_neutral_message() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "17:00:00");
        h.vm.open(AttendanceAction::ClockOut, AcquisitionMode::Manual);
        assert_eq!(block_on(h.vm.submit_manual()), SubmissionOutcome::Rejected);
        assert!(h.api.submissions.borrow().is_empty());
        assert_eq!(
            h.vm.state().get_modal_error().as_deref(),
            Some("Token QR wajib diisi.")
        );
    }

    #[test]
    fn empty_scan_keeps_scanning() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Camera);
        assert_eq!(block_on(h.vm.submit_scanned("  \n")), SubmissionOutcome::Ignored);
        assert_eq!(h.geo.calls.get(), 0);
        assert!(h.vm.state().get_modal().is_some());
    }

    #[test]
    fn manual_and_scanned_tokens_build_identical_requests() {
        let manual = harness(FakeGeolocation::at(-6.2, 106.8), "08:00:00");
        manual.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        type_token(&manual.vm, "QR-7781");
        block_on(manual.vm.submit_manual());

        let scanned = harness(FakeGeolocation::at(-6.2, 106.8), "08:00:00");
        scanned.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Camera);
        block_on(scanned.vm.submit_scanned(" QR-7781\n"));

        assert_eq!(manual.api.submissions.borrow()[0], scanned.api.submissions.borrow()[0]);
    }

    #[test]
    fn concurrent_submit_is_ignored() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        type_token(&h.vm, "ABC");

        let (first, second) = block_on(async { futures::join!(h.vm.submit_manual(), h.vm.submit_manual()) });

        assert_eq!(first, SubmissionOutcome::Succeeded);
        assert_eq!(second, SubmissionOutcome::Ignored);
        assert_eq!(h.api.submissions.borrow().len(), 1);
    }

    #[test]
    fn new_attempt_during_history_refresh_keeps_its_phase() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        h.api.will_accept("Berhasil absen masuk");
        h.api.will_accept("Berhasil absen pulang");
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        type_token(&h.vm, "ABC");

        let vm = h.vm.clone();
        let ((first, third), second) = block_on(async {
            futures::join!(
                async {
                    let first = h.vm.submit_manual().await;
                    // el clock-out sigue en vuelo: este envío debe ignorarse
                    let third = h.vm.submit_manual().await;
                    (first, third)
                },
                async {
                    while vm.state().get_phase() != WorkflowPhase::Succeeded {
                        yield_now().await;
                    }
                    assert!(vm.open(AttendanceAction::ClockOut, AcquisitionMode::Manual));
                    type_token(&vm, "XYZ");
                    vm.submit_manual().await
                }
            )
        });

        assert_eq!(first, SubmissionOutcome::Succeeded);
        assert_eq!(second, SubmissionOutcome::Succeeded);
        assert_eq!(third, SubmissionOutcome::Ignored);
        let submissions = h.api.submissions.borrow();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].action, AttendanceAction::ClockIn);
        assert_eq!(submissions[1].action, AttendanceAction::ClockOut);
        assert_eq!(h.vm.state().get_phase(), WorkflowPhase::Idle);
    }

    #[test]
    fn cancel_during_location_pending_discards_late_fix() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        type_token(&h.vm, "ABC");

        let vm = h.vm.clone();
        let (outcome, cancelled) = block_on(async {
            futures::join!(h.vm.submit_manual(), async {
                assert_eq!(vm.state().get_phase(), WorkflowPhase::LocationPending);
                vm.cancel()
            })
        });

        assert!(cancelled);
        assert_eq!(outcome, SubmissionOutcome::Cancelled);
        assert!(h.api.submissions.borrow().is_empty());
        assert_eq!(h.vm.state().get_modal(), None);
        assert_eq!(h.vm.state().get_phase(), WorkflowPhase::Idle);
    }

    #[test]
    fn cancel_refused_while_submitting() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        h.vm.state().set_phase(WorkflowPhase::Submitting);
        assert!(!h.vm.cancel());
        assert!(h.vm.state().get_modal().is_some());
    }

    #[test]
    fn switching_mode_keeps_typed_token() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        type_token(&h.vm, "HALF-TYPED");
        h.vm.switch_mode(AcquisitionMode::Camera);
        h.vm.switch_mode(AcquisitionMode::Manual);
        assert_eq!(h.vm.state().get_token_input(), "HALF-TYPED");
    }

    #[test]
    fn opening_a_modal_replaces_the_previous_one() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Camera);
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        assert_eq!(h.vm.state().get_modal().map(|m| m.mode), Some(AcquisitionMode::Manual));
    }

    #[test]
    fn history_failure_keeps_previous_list() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        h.api.history_returns(vec![record(TODAY, Some("07:55:00"), None)]);
        block_on(h.vm.refresh_history());
        h.api.history_fails();
        block_on(h.vm.refresh_history());

        assert_eq!(h.vm.state().get_history().len(), 1);
        assert!(h.vm.state().get_today().has_clocked_in);
        assert_eq!(h.vm.state().get_history_error().as_deref(), Some(HISTORY_ERROR));
    }

    #[test]
    fn repeated_refresh_is_stable() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "18:00:00");
        let records = vec![record(TODAY, Some("07:55:00"), Some("17:05:00"))];
        h.api.history_returns(records.clone());
        h.api.history_returns(records);
        block_on(h.vm.refresh_history());
        let first = h.vm.state().get_today();
        block_on(h.vm.refresh_history());
        assert_eq!(first, h.vm.state().get_today());
        assert_eq!(first.next_action(), None);
    }

    #[test]
    fn authoritative_history_overrides_optimistic_update() {
        let h = harness(FakeGeolocation::at(0.0, 0.0), "08:00:00");
        h.api.will_accept("ok");
        h.api.history_returns(vec![record(TODAY, Some("07:59:59"), None)]);
        h.vm.open(AttendanceAction::ClockIn, AcquisitionMode::Manual);
        type_token(&h.vm, "T");
        block_on(h.vm.submit_manual());
        assert_eq!(h.vm.state().get_today().clock_in_time.as_deref(), Some("07:59:59"));
    }
}
