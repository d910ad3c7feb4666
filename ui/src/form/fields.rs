//! Input widgets composed by the report form.

use dioxus::prelude::*;

use crate::core::catalog::filter_options;

/// Native `<select>` over a fixed option list. The empty option clears the field.
#[component]
pub fn SelectField(
    id: String,
    label: String,
    placeholder: String,
    options: Vec<String>,
    value: String,
    #[props(default)] required: bool,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "report-field",
            label { class: "report-field__label", r#for: "{id}",
                "{label}"
                if required {
                    span { class: "report-field__required", aria_hidden: "true", " *" }
                }
            }
            select {
                id: "{id}",
                class: "report-field__select",
                required: required,
                value: "{value}",
                oninput: move |evt: FormEvent| on_select.call(evt.value()),
                option { value: "", selected: value.is_empty(), "{placeholder}" }
                for name in options.iter() {
                    option {
                        key: "{name}",
                        value: "{name}",
                        selected: *name == value,
                        "{name}"
                    }
                }
            }
        }
    }
}

/// Searchable picker: typing filters the list, pressing an entry selects it.
/// Leaving the field without picking drops the typed query.
#[component]
pub fn SearchableSelectField(
    id: String,
    label: String,
    placeholder: String,
    nothing_found: String,
    clear_label: String,
    options: Vec<String>,
    value: String,
    on_select: EventHandler<String>,
) -> Element {
    let mut query = use_signal(String::new);

    let typed = query();
    let searching = !typed.is_empty();
    let shown = if searching { typed.clone() } else { value.clone() };

    let names: Vec<&str> = options.iter().map(String::as_str).collect();
    let matches: Vec<String> = filter_options(&names, &typed)
        .into_iter()
        .map(str::to_string)
        .collect();

    rsx! {
        div {
            class: "report-field report-field--searchable",
            onfocusout: move |_| query.set(String::new()),
            label { class: "report-field__label", r#for: "{id}", "{label}" }
            div { class: "report-field__combo",
                input {
                    id: "{id}",
                    class: "report-field__input",
                    r#type: "search",
                    autocomplete: "off",
                    placeholder: "{placeholder}",
                    value: "{shown}",
                    oninput: move |evt: FormEvent| query.set(evt.value()),
                }
                if !value.is_empty() || searching {
                    button {
                        r#type: "button",
                        class: "report-field__clear",
                        aria_label: "{clear_label}",
                        onclick: move |_| {
                            query.set(String::new());
                            on_select.call(String::new());
                        },
                        "×"
                    }
                }
            }

            if searching {
                if matches.is_empty() {
                    p { class: "report-field__empty", "{nothing_found}" }
                } else {
                    ul { class: "report-field__options", role: "listbox",
                        for name in matches.into_iter() {
                            li {
                                key: "{name}",
                                class: "report-field__option",
                                role: "option",
                                // mousedown lands before the input loses focus and the list closes.
                                onmousedown: {
                                    let picked = name.clone();
                                    move |evt: MouseEvent| {
                                        evt.prevent_default();
                                        query.set(String::new());
                                        on_select.call(picked.clone());
                                    }
                                },
                                "{name}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::Mutation;

    fn listeners(app: fn() -> Element) -> Vec<String> {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_to_vec()
            .edits
            .into_iter()
            .filter_map(|edit| match edit {
                Mutation::NewEventListener { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    fn region_picker() -> Element {
        rsx! {
            SearchableSelectField {
                id: "region",
                label: "Region",
                placeholder: "Type your region",
                nothing_found: "Nothing found...",
                clear_label: "Clear region",
                options: vec!["Москва".to_string(), "Омская область".to_string()],
                value: String::new(),
                on_select: |_: String| {},
            }
        }
    }

    fn provider_select() -> Element {
        rsx! {
            SelectField {
                id: "provider",
                label: "Internet provider",
                placeholder: "Choose",
                options: vec!["МТС".to_string()],
                value: "МТС".to_string(),
                required: true,
                on_select: |_: String| {},
            }
        }
    }

    #[test]
    fn searchable_picker_drops_query_when_focus_leaves() {
        let names = listeners(region_picker);
        assert!(names.iter().any(|n| n == "focusout"), "listeners: {names:?}");
        assert!(names.iter().any(|n| n == "input"), "listeners: {names:?}");
    }

    #[test]
    fn select_field_reports_changes_on_input() {
        let names = listeners(provider_select);
        assert_eq!(names, vec!["input".to_string()]);
    }
}
