//! Bridge to the chat client hosting the mini app.
//!
//! The form never talks to `window.Telegram.WebApp` directly; it goes through
//! [`HostBridge`] so the same view runs inside Telegram, in a plain browser tab
//! and under `cargo test`.

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use thiserror::Error;

mod local;
pub use local::LocalHost;

#[cfg(target_arch = "wasm32")]
mod telegram;
#[cfg(target_arch = "wasm32")]
pub use telegram::TelegramHost;

/// Name of the host event fired when the primary (main) button is pressed.
pub const MAIN_BUTTON_EVENT: &str = "mainButtonClicked";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("host bridge has no `{0}` member")]
    Missing(String),
    #[error("host call `{method}` failed: {message}")]
    Call { method: String, message: String },
}

/// User record exposed by the host's unsafe init data.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HostUser {
    pub id: u64,
    #[serde(default)]
    pub language_code: Option<String>,
}

pub trait HostBridge {
    /// Signal that the mini app finished its initial render.
    fn ready(&self);

    /// Label the host's primary button and make it visible.
    fn configure_main_button(&self, label: &str);

    /// Route primary button presses to `handler` until the returned
    /// subscription is dropped.
    fn on_main_button(&self, handler: Box<dyn FnMut()>) -> MainButtonSubscription;

    /// Hand a serialized payload to the host.
    fn send_data(&self, payload: &str) -> Result<(), HostError>;

    /// Show a blocking, modal-style notice.
    fn show_notice(&self, message: &str);

    fn close(&self);

    fn user(&self) -> Option<HostUser>;
}

/// Guard for a main button handler. Dropping it unregisters the handler.
pub struct MainButtonSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl MainButtonSubscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release (registration failed).
    pub fn inert() -> Self {
        Self { release: None }
    }
}

impl Drop for MainButtonSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for MainButtonSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainButtonSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Shared handle placed in the Dioxus context.
#[derive(Clone)]
pub struct HostHandle(Rc<dyn HostBridge>);

impl HostHandle {
    pub fn new(bridge: impl HostBridge + 'static) -> Self {
        Self(Rc::new(bridge))
    }

    /// Telegram when the WebApp bridge is present, otherwise a detached local host.
    pub fn detect() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(telegram) = TelegramHost::from_window() {
                tracing::info!("Telegram WebApp bridge detected");
                return Self::new(telegram);
            }
            tracing::warn!("Telegram WebApp bridge not found; reports will stay local");
        }

        Self::new(LocalHost::default())
    }

    pub fn bridge(&self) -> &dyn HostBridge {
        self.0.as_ref()
    }
}

impl fmt::Debug for HostHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HostHandle(..)")
    }
}
