//! In-memory host used outside Telegram and in tests.

use std::cell::RefCell;
use std::rc::Rc;

use super::{HostBridge, HostError, HostUser, MainButtonSubscription};

#[derive(Default)]
struct MainButtonState {
    label: String,
    visible: bool,
    handler: Option<Box<dyn FnMut()>>,
}

/// Records every call so the form can be driven and inspected without a chat client.
#[derive(Default)]
pub struct LocalHost {
    user: Option<HostUser>,
    main_button: Rc<RefCell<MainButtonState>>,
    ready_calls: RefCell<u32>,
    closed: RefCell<bool>,
    sent: RefCell<Vec<String>>,
    notices: RefCell<Vec<String>>,
}

impl LocalHost {
    pub fn with_user(user: HostUser) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    /// Simulate a press on the host's primary button.
    /// Returns `false` when no handler is subscribed.
    pub fn press_main_button(&self) -> bool {
        // Take the handler out so it may call back into this host.
        let handler = self.main_button.borrow_mut().handler.take();
        match handler {
            Some(mut handler) => {
                handler();
                let mut state = self.main_button.borrow_mut();
                if state.handler.is_none() {
                    state.handler = Some(handler);
                }
                true
            }
            None => false,
        }
    }

    pub fn main_button_label(&self) -> String {
        self.main_button.borrow().label.clone()
    }

    pub fn main_button_visible(&self) -> bool {
        self.main_button.borrow().visible
    }

    pub fn has_main_button_handler(&self) -> bool {
        self.main_button.borrow().handler.is_some()
    }

    pub fn ready_calls(&self) -> u32 {
        *self.ready_calls.borrow()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }
}

impl HostBridge for LocalHost {
    fn ready(&self) {
        *self.ready_calls.borrow_mut() += 1;
    }

    fn configure_main_button(&self, label: &str) {
        let mut state = self.main_button.borrow_mut();
        state.label = label.to_string();
        state.visible = true;
    }

    fn on_main_button(&self, handler: Box<dyn FnMut()>) -> MainButtonSubscription {
        self.main_button.borrow_mut().handler = Some(handler);
        let state = Rc::downgrade(&self.main_button);
        MainButtonSubscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.borrow_mut().handler = None;
            }
        })
    }

    fn send_data(&self, payload: &str) -> Result<(), HostError> {
        tracing::info!(bytes = payload.len(), "local host received report payload");
        self.sent.borrow_mut().push(payload.to_string());
        Ok(())
    }

    fn show_notice(&self, message: &str) {
        tracing::warn!("notice: {message}");
        self.notices.borrow_mut().push(message.to_string());
    }

    fn close(&self) {
        *self.closed.borrow_mut() = true;
    }

    fn user(&self) -> Option<HostUser> {
        self.user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn main_button_routes_until_unsubscribed() {
        let host = LocalHost::default();
        let presses = Rc::new(Cell::new(0));
        let counter = presses.clone();

        let subscription = host.on_main_button(Box::new(move || counter.set(counter.get() + 1)));
        assert!(host.press_main_button());
        assert!(host.press_main_button());
        assert_eq!(presses.get(), 2);

        drop(subscription);
        assert!(!host.has_main_button_handler());
        assert!(!host.press_main_button());
        assert_eq!(presses.get(), 2);
    }

    #[test]
    fn records_lifecycle_calls() {
        let host = LocalHost::with_user(HostUser {
            id: 5,
            language_code: None,
        });
        host.configure_main_button("Send");
        host.ready();
        host.close();

        assert_eq!(host.main_button_label(), "Send");
        assert!(host.main_button_visible());
        assert_eq!(host.ready_calls(), 1);
        assert!(host.is_closed());
        assert_eq!(host.user().map(|u| u.id), Some(5));
    }
}
