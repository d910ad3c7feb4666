use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;

use super::draft::{ReportDraft, COMMENT_MAX_CHARS};
use super::fields::{SearchableSelectField, SelectField};
use super::submit::{self, SubmitError};
use crate::core::catalog::{ChoiceField, SelectorCatalog};
use crate::core::host::HostHandle;
use crate::core::identity;
use crate::t;

const THEME_CSS: Asset = asset!("/assets/theme/main.css");

#[derive(Debug, Clone, Copy)]
enum ReportEvent {
    Submit,
}

#[component]
pub fn ReportForm() -> Element {
    let host = use_hook(|| try_consume_context::<HostHandle>().unwrap_or_else(HostHandle::detect));
    let catalog = SelectorCatalog::embedded();
    let mut draft = use_signal(ReportDraft::default);

    let submitter = use_coroutine({
        let host = host.clone();
        move |mut rx: UnboundedReceiver<ReportEvent>| {
            let host = host.clone();
            async move {
                while let Some(event) = rx.next().await {
                    match event {
                        ReportEvent::Submit => {
                            let snapshot = draft.with_peek(ReportDraft::clone);
                            if let Err(err) = submit::submit(&snapshot, host.bridge()) {
                                match &err {
                                    SubmitError::MissingUrl | SubmitError::InvalidUrl => {
                                        tracing::info!("report refused: {err}")
                                    }
                                    _ => tracing::error!("report not sent: {err}"),
                                }
                                host.bridge().show_notice(&err.notice());
                            }
                        }
                    }
                }
            }
        }
    });

    // Host main button drives submission for as long as the form is mounted.
    let subscription = use_hook({
        let host = host.clone();
        move || {
            let bridge = host.bridge();
            bridge.configure_main_button(&t!("main-button-label"));
            bridge.ready();
            let handle = bridge.on_main_button(Box::new(move || submitter.send(ReportEvent::Submit)));
            Rc::new(RefCell::new(Some(handle)))
        }
    });
    use_drop(move || {
        subscription.borrow_mut().take();
    });

    let anonymous_id = use_resource({
        let host = host.clone();
        move || {
            let user = host.bridge().user();
            async move { user.map(|u| identity::hash_user_id(u.id)) }
        }
    });

    let current = draft();
    let url_valid = current.url_valid;
    let url_invalid = (!url_valid).to_string();
    let show_url_clear = !current.url.is_empty();
    let url_class = if url_valid {
        "report-field__input"
    } else {
        "report-field__input report-field__input--invalid"
    };
    let options = |field: ChoiceField| -> Vec<String> {
        catalog.options(field).into_iter().map(str::to_string).collect()
    };
    let unspecified = t!("field-vpn-unspecified");
    let hashed_id = anonymous_id.cloned().flatten();
    let close_host = host.clone();

    rsx! {
        document::Link { rel: "stylesheet", href: THEME_CSS }

        form {
            class: "report-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                tracing::debug!("native form submit ignored; reports go through the host main button");
            },

            SelectField {
                id: "provider",
                label: t!("field-provider-label"),
                placeholder: t!("field-provider-placeholder"),
                options: options(ChoiceField::Provider),
                value: current.provider.clone(),
                required: true,
                on_select: move |value: String| apply_choice(draft, ChoiceField::Provider, &value),
            }

            SearchableSelectField {
                id: "region",
                label: t!("field-region-label"),
                placeholder: t!("field-region-placeholder"),
                nothing_found: t!("field-region-nothing-found"),
                clear_label: t!("field-region-clear"),
                options: options(ChoiceField::Region),
                value: current.region.clone(),
                on_select: move |value: String| apply_choice(draft, ChoiceField::Region, &value),
            }

            div { class: "report-field report-field--url",
                label { class: "report-field__label", r#for: "url",
                    {t!("field-url-label")}
                    span { class: "report-field__required", aria_hidden: "true", " *" }
                }
                div { class: "report-field__combo",
                    input {
                        id: "url",
                        class: url_class,
                        r#type: "url",
                        inputmode: "url",
                        autocomplete: "off",
                        required: true,
                        aria_invalid: "{url_invalid}",
                        placeholder: t!("field-url-placeholder"),
                        value: current.url.clone(),
                        oninput: move |evt: FormEvent| draft.with_mut(|d| d.set_url(&evt.value())),
                    }
                    if show_url_clear {
                        button {
                            r#type: "button",
                            class: "report-field__clear",
                            aria_label: t!("field-url-clear"),
                            onclick: move |_| draft.with_mut(|d| d.clear_url()),
                            "×"
                        }
                    }
                }
                if !url_valid {
                    p { class: "report-field__error", role: "alert", {t!("field-url-error")} }
                }
            }

            fieldset { class: "report-form__group",
                legend { class: "report-form__legend", {t!("form-vpn-legend")} }

                SelectField {
                    id: "vpn-used",
                    label: t!("field-vpn-used-label"),
                    placeholder: unspecified.clone(),
                    options: options(ChoiceField::VpnUsed),
                    value: current.vpn_used.clone(),
                    on_select: move |value: String| apply_choice(draft, ChoiceField::VpnUsed, &value),
                }
                SelectField {
                    id: "vpn-provider",
                    label: t!("field-vpn-provider-label"),
                    placeholder: unspecified.clone(),
                    options: options(ChoiceField::VpnProvider),
                    value: current.vpn_provider.clone(),
                    on_select: move |value: String| apply_choice(draft, ChoiceField::VpnProvider, &value),
                }
                SelectField {
                    id: "vpn-protocol",
                    label: t!("field-vpn-protocol-label"),
                    placeholder: unspecified,
                    options: options(ChoiceField::VpnProtocol),
                    value: current.vpn_protocol.clone(),
                    on_select: move |value: String| apply_choice(draft, ChoiceField::VpnProtocol, &value),
                }
            }

            div { class: "report-field report-field--comment",
                label { class: "report-field__label", r#for: "comment",
                    {t!("field-comment-label", count = current.comment_len(), max = COMMENT_MAX_CHARS)}
                }
                textarea {
                    id: COMMENT_ELEMENT_ID,
                    class: "report-field__textarea",
                    rows: 3,
                    placeholder: t!("field-comment-placeholder"),
                    value: current.comment.clone(),
                    oninput: move |evt: FormEvent| {
                        let value = evt.value();
                        if !draft.with_mut(|d| d.set_comment(&value)) {
                            tracing::debug!("comment over {COMMENT_MAX_CHARS} characters rejected");
                            // The signal did not change, so the DOM still shows the rejected text.
                            restore_comment(&draft.peek().comment);
                        }
                    },
                }
            }

            footer { class: "report-form__footer",
                if let Some(hashed) = hashed_id {
                    span { class: "report-form__anon-id",
                        {t!("footer-anonymous-id", id = identity::short_id(&hashed))}
                    }
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| close_host.bridge().close(),
                    {t!("footer-close")}
                }
            }
        }
    }
}

fn apply_choice(mut draft: Signal<ReportDraft>, field: ChoiceField, value: &str) {
    let catalog = SelectorCatalog::embedded();
    if !draft.with_mut(|d| d.set_choice(catalog, field, value)) {
        tracing::warn!(?field, "ignoring option outside the selector catalog");
    }
}

const COMMENT_ELEMENT_ID: &str = "comment";

/// Script putting `previous` back into the comment textarea.
fn comment_restore_script(previous: &str) -> Result<String, serde_json::Error> {
    let literal = serde_json::to_string(previous)?;
    Ok(format!(
        "const el = document.getElementById({id:?}); if (el) {{ el.value = {literal}; }}",
        id = COMMENT_ELEMENT_ID
    ))
}

fn restore_comment(previous: &str) {
    match comment_restore_script(previous) {
        Ok(script) => {
            let _ = document::eval(&script);
        }
        Err(err) => tracing::warn!("could not restore comment field: {err}"),
    }
}
