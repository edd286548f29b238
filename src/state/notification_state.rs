use std::cell::RefCell;
use std::rc::Rc;

use crate::models::notification::{unread_count, Notification};

#[derive(Clone, Default)]
pub struct NotificationState {
    pub items: Rc<RefCell<Vec<Notification>>>,
    pub panel_open: Rc<RefCell<bool>>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_items(&self) -> Vec<Notification> {
        self.items.borrow().clone()
    }

    pub fn unread(&self) -> usize {
        unread_count(&self.items.borrow())
    }

    pub fn is_panel_open(&self) -> bool {
        *self.panel_open.borrow()
    }

    pub fn reset(&self) {
        self.items.borrow_mut().clear();
        *self.panel_open.borrow_mut() = false;
    }
}
