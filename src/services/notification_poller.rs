// ============================================================================
// NOTIFICATION POLLER - Timer cancelable para el polling de notificaciones
// ============================================================================
// El `Interval` se cancela al hacer drop: `stop()` o soltar el poller basta.
// ============================================================================

use gloo_timers::callback::Interval;

#[derive(Default)]
pub struct NotificationPoller {
    interval: Option<Interval>,
}

impl NotificationPoller {
    pub fn new() -> Self {
        Self { interval: None }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Arranca el polling si no estaba activo. `tick` se ejecuta una vez al inicio.
    pub fn ensure_started<F>(&mut self, period_ms: u32, tick: F)
    where
        F: Fn() + 'static,
    {
        if self.is_running() {
            return;
        }
        log::info!("🔔 [NOTIF] Polling cada {} ms", period_ms);
        tick();
        self.interval = Some(Interval::new(period_ms, tick));
    }

    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            log::info!("🔕 [NOTIF] Polling detenido");
        }
    }
}
