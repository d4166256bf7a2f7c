//! Labeled inputs bound to a form's value and error maps.

use std::collections::HashMap;

use leptos::prelude::*;

/// Single-line input bound to `form_values[name]`, with its validation
/// error rendered underneath.
#[component]
pub fn TextField(
    name: &'static str,
    label: &'static str,
    form_values: RwSignal<HashMap<String, String>>,
    errors: RwSignal<HashMap<String, String>>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "")] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700">{label}</label>
            <input
                type=input_type
                class="mt-1 block w-full px-3 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-teal-500 focus:border-teal-500"
                placeholder=placeholder
                prop:value=move || form_values.get().get(name).cloned().unwrap_or_default()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form_values.update(|values| {
                        values.insert(name.to_string(), value);
                    });
                }
            />
            <FieldError name=name errors=errors />
        </div>
    }
}

/// Multi-line variant of [`TextField`].
#[component]
pub fn TextAreaField(
    name: &'static str,
    label: &'static str,
    form_values: RwSignal<HashMap<String, String>>,
    errors: RwSignal<HashMap<String, String>>,
    #[prop(default = 3)] rows: u32,
    #[prop(default = "")] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700">{label}</label>
            <textarea
                rows=rows
                class="mt-1 block w-full px-3 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-teal-500 focus:border-teal-500"
                placeholder=placeholder
                prop:value=move || form_values.get().get(name).cloned().unwrap_or_default()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form_values.update(|values| {
                        values.insert(name.to_string(), value);
                    });
                }
            ></textarea>
            <FieldError name=name errors=errors />
        </div>
    }
}

#[component]
fn FieldError(name: &'static str, errors: RwSignal<HashMap<String, String>>) -> impl IntoView {
    move || {
        errors.get().get(name).cloned().map(|message| {
            view! {
                <p class="mt-1 text-sm text-red-600">{message}</p>
            }
        })
    }
}
