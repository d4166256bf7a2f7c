//! Registration form with optional QR-code hydration.
//!
//! A scan toggle mounts the [`QrScanner`]; a successful decode is parsed as
//! a flat JSON object and known fields are overwritten in place. Scanning
//! never locks the form, so manual entry and scanning coexist.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::web_sys;

use crate::components::fields::{TextAreaField, TextField};
use crate::components::qr_scanner::QrScanner;
use crate::scan;
use crate::types::RegistrationData;
use crate::validation::{self, registration_rules, REGISTRATION_FIELDS};

#[component]
pub fn RegistrationForm() -> impl IntoView {
    let form_values = RwSignal::new(HashMap::<String, String>::new());
    let errors = RwSignal::new(HashMap::<String, String>::new());
    let (scanning, set_scanning) = signal(false);
    let (success_message, set_success_message) = signal(None::<String>);
    let (error_message, set_error_message) = signal(None::<String>);

    let show_success = move |msg: String| {
        set_success_message.set(Some(msg));
        let handle = gloo_timers::callback::Timeout::new(3000, move || {
            set_success_message.set(None);
        });
        handle.forget();
    };
    let show_error = move |msg: String| {
        set_error_message.set(Some(msg));
        let handle = gloo_timers::callback::Timeout::new(3000, move || {
            set_error_message.set(None);
        });
        handle.forget();
    };

    // A parse failure leaves every field and the scanning flag untouched;
    // the user simply re-scans.
    let handle_scan_success = Callback::new(move |decoded: String| {
        match scan::parse_payload(&decoded) {
            Ok(payload) => {
                let applied = form_values
                    .try_update(|values| {
                        scan::apply_payload(values, &REGISTRATION_FIELDS, &payload)
                    })
                    .unwrap_or(0);
                set_scanning.set(false);
                log::info!("hydrated {applied} fields from scan");
                show_success("QR Code scanned successfully!".to_string());
            }
            Err(err) => show_error(err.to_string()),
        }
    });

    let handle_scan_error = Callback::new(move |err: String| {
        if err.is_empty() {
            show_error("Failed to scan QR code".to_string());
        } else {
            show_error(err);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let values = form_values.get_untracked();
        let failed = validation::validate_form(&registration_rules(), &values);
        let valid = failed.is_empty();
        errors.set(failed);
        if valid {
            let data = RegistrationData::from_values(&values);
            log::info!(
                "registration submitted: {}",
                serde_json::to_string(&data).unwrap_or_default()
            );
            show_success("Registration successful!".to_string());
        }
    };

    view! {
        <form on:submit=on_submit class="space-y-6">
            {move || success_message.get().map(|msg| view! {
                <div class="p-3 bg-green-50 border border-green-200 rounded text-green-800 text-sm">
                    {msg}
                </div>
            })}
            {move || error_message.get().map(|msg| view! {
                <div class="p-3 bg-red-50 border border-red-200 rounded text-red-800 text-sm">
                    {msg}
                </div>
            })}

            <div class="flex justify-center mb-8">
                <button
                    type="button"
                    class="px-4 py-2 bg-teal-100 text-teal-700 rounded-lg hover:bg-teal-200 transition-colors"
                    on:click=move |_| set_scanning.update(|s| *s = !*s)
                >
                    {move || if scanning.get() { "Stop Scanning" } else { "Scan QR Code" }}
                </button>
            </div>

            {move || scanning.get().then(|| view! {
                <div class="mb-8">
                    <QrScanner
                        on_scan_success=handle_scan_success
                        on_scan_error=handle_scan_error
                    />
                </div>
            })}

            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <TextField
                    name=validation::FIRST_NAME
                    label="First Name"
                    placeholder="John"
                    form_values=form_values
                    errors=errors
                />
                <TextField
                    name=validation::LAST_NAME
                    label="Last Name"
                    placeholder="Doe"
                    form_values=form_values
                    errors=errors
                />
                <TextField
                    name=validation::AGE
                    label="Age"
                    input_type="number"
                    placeholder="25"
                    form_values=form_values
                    errors=errors
                />
                <TextField
                    name=validation::EMAIL
                    label="Email"
                    input_type="email"
                    placeholder="john@example.com"
                    form_values=form_values
                    errors=errors
                />
                <TextField
                    name=validation::PHONE
                    label="Phone"
                    placeholder="+1 (555) 000-0000"
                    form_values=form_values
                    errors=errors
                />
                <div class="md:col-span-2">
                    <TextAreaField
                        name=validation::ADDRESS
                        label="Address"
                        placeholder="Enter your full address"
                        form_values=form_values
                        errors=errors
                    />
                </div>
            </div>

            <button
                type="submit"
                class="w-full py-2 px-4 rounded-lg shadow-sm text-sm font-medium text-white bg-teal-600 hover:bg-teal-700 focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-teal-500 transition-colors"
            >
                "Complete Registration"
            </button>
        </form>
    }
}
