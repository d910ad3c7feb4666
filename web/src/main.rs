use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::views::Report;

fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    // `dx serve` may already have installed a subscriber; keep it if so.
    let _ = dioxus::logger::init(level);

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    rsx! {
        Report {}
    }
}
