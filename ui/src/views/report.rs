use dioxus::prelude::*;

use crate::core::host::HostHandle;
use crate::form::ReportForm;
use crate::i18n;

#[component]
pub fn Report() -> Element {
    let host = use_hook(|| try_consume_context::<HostHandle>().unwrap_or_else(HostHandle::detect));

    // Pick the language before the first lookup so the initial render is already localized.
    use_hook({
        let host = host.clone();
        move || {
            i18n::init();
            let user = host.bridge().user();
            i18n::apply_host_language(user.as_ref().and_then(|u| u.language_code.as_deref()));
        }
    });
    use_context_provider(|| host.clone());

    rsx! {
        section { class: "page page-report",
            h1 { {crate::t!("form-title")} }
            p { class: "page-report__intro", {crate::t!("form-intro")} }
            ReportForm {}
        }
    }
}
