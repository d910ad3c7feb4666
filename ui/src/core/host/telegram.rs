//! `window.Telegram.WebApp` bindings.

use js_sys::{Array, Function, Reflect, JSON};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use super::{HostBridge, HostError, HostUser, MainButtonSubscription, MAIN_BUTTON_EVENT};

pub struct TelegramHost {
    web_app: JsValue,
}

impl TelegramHost {
    /// Locate the WebApp object injected by `telegram-web-app.js`.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let telegram = defined(Reflect::get(window.as_ref(), &JsValue::from_str("Telegram")).ok()?)?;
        let web_app = defined(Reflect::get(&telegram, &JsValue::from_str("WebApp")).ok()?)?;
        Some(Self { web_app })
    }

    fn member(&self, target: &JsValue, key: &str) -> Result<JsValue, HostError> {
        Reflect::get(target, &JsValue::from_str(key))
            .ok()
            .and_then(defined)
            .ok_or_else(|| HostError::Missing(key.to_string()))
    }

    fn main_button(&self) -> Result<JsValue, HostError> {
        self.member(&self.web_app, "MainButton")
    }

    fn invoke(&self, target: &JsValue, method: &str, args: &[&JsValue]) -> Result<JsValue, HostError> {
        let function: Function = self
            .member(target, method)?
            .dyn_into()
            .map_err(|_| HostError::Missing(method.to_string()))?;
        let argv = Array::new();
        for arg in args {
            argv.push(arg);
        }
        function.apply(target, &argv).map_err(|err| HostError::Call {
            method: method.to_string(),
            message: describe(&err),
        })
    }
}

impl HostBridge for TelegramHost {
    fn ready(&self) {
        if let Err(err) = self.invoke(&self.web_app, "ready", &[]) {
            tracing::warn!("{err}");
        }
    }

    fn configure_main_button(&self, label: &str) {
        let outcome = self.main_button().and_then(|button| {
            Reflect::set(&button, &JsValue::from_str("text"), &JsValue::from_str(label)).map_err(
                |err| HostError::Call {
                    method: "MainButton.text".into(),
                    message: describe(&err),
                },
            )?;
            self.invoke(&button, "show", &[])
        });
        if let Err(err) = outcome {
            tracing::warn!("{err}");
        }
    }

    fn on_main_button(&self, handler: Box<dyn FnMut()>) -> MainButtonSubscription {
        let closure = Closure::wrap(handler);
        let event = JsValue::from_str(MAIN_BUTTON_EVENT);

        if let Err(err) = self.invoke(&self.web_app, "onEvent", &[&event, closure.as_ref()]) {
            tracing::error!("could not subscribe to the main button: {err}");
            return MainButtonSubscription::inert();
        }

        let web_app = self.web_app.clone();
        MainButtonSubscription::new(move || {
            let bridge = TelegramHost { web_app };
            if let Err(err) = bridge.invoke(&bridge.web_app, "offEvent", &[&event, closure.as_ref()]) {
                tracing::warn!("could not unsubscribe from the main button: {err}");
            }
            drop(closure);
        })
    }

    fn send_data(&self, payload: &str) -> Result<(), HostError> {
        self.invoke(&self.web_app, "sendData", &[&JsValue::from_str(payload)])
            .map(|_| ())
    }

    fn show_notice(&self, message: &str) {
        let text = JsValue::from_str(message);
        if let Err(err) = self.invoke(&self.web_app, "showAlert", &[&text]) {
            // Older clients lack showAlert (pre 6.2).
            tracing::debug!("{err}; falling back to window.alert");
            match web_sys::window() {
                Some(window) => {
                    if let Err(err) = window.alert_with_message(message) {
                        tracing::warn!("notice not shown: {}", describe(&err));
                    }
                }
                None => tracing::warn!("notice not shown: no window"),
            }
        }
    }

    fn close(&self) {
        if let Err(err) = self.invoke(&self.web_app, "close", &[]) {
            tracing::warn!("{err}");
        }
    }

    fn user(&self) -> Option<HostUser> {
        let init_data = self.member(&self.web_app, "initDataUnsafe").ok()?;
        let user = self.member(&init_data, "user").ok()?;
        let raw = JSON::stringify(&user).ok()?.as_string()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::debug!("ignoring malformed host user: {err}");
                None
            }
        }
    }
}

fn defined(value: JsValue) -> Option<JsValue> {
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}
