//! Sign-in form.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::web_sys;

use crate::components::fields::TextField;
use crate::validation::{self, login_rules};

#[component]
pub fn LoginForm() -> impl IntoView {
    let form_values = RwSignal::new(HashMap::<String, String>::new());
    let errors = RwSignal::new(HashMap::<String, String>::new());
    let (remember, set_remember) = signal(false);
    let (success_message, set_success_message) = signal(None::<String>);

    let show_success = move |msg: String| {
        set_success_message.set(Some(msg));
        let handle = gloo_timers::callback::Timeout::new(3000, move || {
            set_success_message.set(None);
        });
        handle.forget();
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let values = form_values.get_untracked();
        let failed = validation::validate_form(&login_rules(), &values);
        let valid = failed.is_empty();
        errors.set(failed);
        if valid {
            let email = values
                .get(validation::EMAIL)
                .cloned()
                .unwrap_or_default();
            log::info!("sign-in submitted for {email} (remember: {})", remember.get_untracked());
            show_success("Signed in successfully!".to_string());
        }
    };

    view! {
        <form on:submit=on_submit class="space-y-6">
            {move || success_message.get().map(|msg| view! {
                <div class="p-3 bg-green-50 border border-green-200 rounded text-green-800 text-sm">
                    {msg}
                </div>
            })}

            <TextField
                name=validation::EMAIL
                label="Email"
                input_type="email"
                placeholder="you@example.com"
                form_values=form_values
                errors=errors
            />
            <TextField
                name=validation::PASSWORD
                label="Password"
                input_type="password"
                placeholder="••••••••"
                form_values=form_values
                errors=errors
            />

            <div class="flex items-center justify-between">
                <label class="flex items-center text-sm text-gray-700">
                    <input
                        type="checkbox"
                        class="h-4 w-4 text-teal-600 focus:ring-teal-500 border-gray-300 rounded mr-2"
                        prop:checked=move || remember.get()
                        on:change=move |_| set_remember.update(|r| *r = !*r)
                    />
                    "Remember me"
                </label>
                <button type="button" class="text-sm font-medium text-teal-600 hover:text-teal-500">
                    "Forgot password?"
                </button>
            </div>

            <button
                type="submit"
                class="w-full py-2 px-4 rounded-lg shadow-sm text-sm font-medium text-white bg-teal-600 hover:bg-teal-700 focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-teal-500 transition-colors"
            >
                "Sign in"
            </button>
        </form>
    }
}
