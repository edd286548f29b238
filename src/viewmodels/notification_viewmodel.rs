// ============================================================================
// NOTIFICATION VIEWMODEL - Polling y marcado como leídas
// ============================================================================
// Los fallos de polling solo se registran; el siguiente tick reintenta.
// ============================================================================

use std::rc::Rc;

use crate::services::traits::NotificationApi;
use crate::state::{ChangeNotifier, NotificationState};

#[derive(Clone)]
pub struct NotificationViewModel {
    state: NotificationState,
    api: Rc<dyn NotificationApi>,
    notifier: ChangeNotifier,
}

impl NotificationViewModel {
    pub fn new(state: NotificationState, api: Rc<dyn NotificationApi>, notifier: ChangeNotifier) -> Self {
        Self { state, api, notifier }
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Un tick de polling
    pub async fn poll(&self) {
        let result = self.api.list_notifications().await;
        match result {
            Ok(items) => {
                let changed = *self.state.items.borrow() != items;
                if changed {
                    *self.state.items.borrow_mut() = items;
                    self.notifier.notify();
                }
            }
            Err(e) => log::warn!("⚠️ [NOTIF] Polling falló, se reintenta en el próximo tick: {}", e),
        }
    }

    pub fn toggle_panel(&self) {
        let open = !self.state.is_panel_open();
        *self.state.panel_open.borrow_mut() = open;
        self.notifier.notify();
    }

    pub async fn mark_read(&self, id: u64) {
        let result = self.api.mark_notification_read(id).await;
        match result {
            Ok(()) => {
                if let Some(item) = self.state.items.borrow_mut().iter_mut().find(|n| n.id == id) {
                    item.mark_read();
                }
                self.notifier.notify();
            }
            Err(e) => log::error!("❌ [NOTIF] No se pudo marcar {}: {}", id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::models::notification::Notification;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeNotificationApi {
        fail: Cell<bool>,
        items: RefCell<Vec<Notification>>,
        marked: RefCell<Vec<u64>>,
    }

    #[async_trait(?Send)]
    impl NotificationApi for FakeNotificationApi {
        async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
            if self.fail.get() {
                return Err(ApiError::Network("offline".into()));
            }
            Ok(self.items.borrow().clone())
        }

        async fn mark_notification_read(&self, id: u64) -> Result<(), ApiError> {
            self.marked.borrow_mut().push(id);
            Ok(())
        }
    }

    fn notification(id: u64) -> Notification {
        Notification {
            id,
            title: None,
            message: "Cuti Anda disetujui".into(),
            read_at: None,
            is_read: None,
            created_at: None,
        }
    }

    #[test]
    fn poll_failure_keeps_previous_items() {
        let api = Rc::new(FakeNotificationApi::default());
        api.items.borrow_mut().push(notification(1));
        let vm = NotificationViewModel::new(NotificationState::new(), api.clone(), ChangeNotifier::new());

        block_on(vm.poll());
        assert_eq!(vm.state().unread(), 1);

        api.fail.set(true);
        block_on(vm.poll());
        assert_eq!(vm.state().get_items().len(), 1);
    }

    #[test]
    fn mark_read_updates_local_list() {
        let api = Rc::new(FakeNotificationApi::default());
        api.items.borrow_mut().extend([notification(1), notification(2)]);
        let vm = NotificationViewModel::new(NotificationState::new(), api.clone(), ChangeNotifier::new());
        block_on(vm.poll());
        block_on(vm.mark_read(2));
        assert_eq!(*api.marked.borrow(), vec![2]);
        assert_eq!(vm.state().unread(), 1);
    }

    #[test]
    fn unchanged_poll_does_not_notify() {
        let api = Rc::new(FakeNotificationApi::default());
        api.items.borrow_mut().push(notification(1));
        let notifier = ChangeNotifier::new();
        let hits = Rc::new(Cell::new(0));
        {
            let hits = hits.clone();
            notifier.subscribe(move || hits.set(hits.get() + 1));
        }
        let vm = NotificationViewModel::new(NotificationState::new(), api, notifier);
        block_on(vm.poll());
        block_on(vm.poll());
        assert_eq!(hits.get(), 1);
    }
}
