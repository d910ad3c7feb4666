//! Mounts the real `ReportForm` and drives it through the host's main button.

use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use ui::core::host::{HostBridge, HostError, HostHandle, HostUser, LocalHost, MainButtonSubscription};
use ui::form::ReportForm;

/// Lets the test keep inspecting the `LocalHost` the form talks to.
struct SharedHost(Rc<LocalHost>);

impl HostBridge for SharedHost {
    fn ready(&self) {
        self.0.ready()
    }

    fn configure_main_button(&self, label: &str) {
        self.0.configure_main_button(label)
    }

    fn on_main_button(&self, handler: Box<dyn FnMut()>) -> MainButtonSubscription {
        self.0.on_main_button(handler)
    }

    fn send_data(&self, payload: &str) -> Result<(), HostError> {
        self.0.send_data(payload)
    }

    fn show_notice(&self, message: &str) {
        self.0.show_notice(message)
    }

    fn close(&self) {
        self.0.close()
    }

    fn user(&self) -> Option<HostUser> {
        self.0.user()
    }
}

fn mount(host: &Rc<LocalHost>) -> VirtualDom {
    ui::i18n::init();
    ui::i18n::set_language("en-US").unwrap();

    let mut dom =
        VirtualDom::new(ReportForm).with_root_context(HostHandle::new(SharedHost(host.clone())));
    dom.rebuild_in_place();
    dom
}

/// Let spawned tasks (the submit coroutine) run until `done` holds or we give up.
async fn settle(dom: &mut VirtualDom, done: impl Fn() -> bool) {
    for _ in 0..20 {
        if done() {
            return;
        }
        let _ = tokio::time::timeout(Duration::from_millis(25), dom.wait_for_work()).await;
        dom.render_immediate_to_vec();
    }
}

#[tokio::test]
async fn mount_configures_main_button_and_signals_ready() {
    let host = Rc::new(LocalHost::default());
    let dom = mount(&host);

    assert_eq!(host.main_button_label(), "Send report");
    assert!(host.main_button_visible());
    assert_eq!(host.ready_calls(), 1);
    assert!(host.has_main_button_handler());
    drop(dom);
}

#[tokio::test]
async fn main_button_on_empty_form_shows_missing_url_notice() {
    let host = Rc::new(LocalHost::default());
    let mut dom = mount(&host);

    assert!(dom.in_runtime(|| host.press_main_button()));
    settle(&mut dom, || !host.notices().is_empty()).await;

    assert_eq!(host.notices(), vec!["Please fill in the url".to_string()]);
    assert!(host.sent().is_empty());
}

#[tokio::test]
async fn teardown_releases_main_button() {
    let host = Rc::new(LocalHost::default());
    let dom = mount(&host);
    assert!(host.has_main_button_handler());

    drop(dom);
    assert!(!host.has_main_button_handler());
    assert!(!host.press_main_button());
}
