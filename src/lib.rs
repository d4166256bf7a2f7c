use leptos::prelude::*;

mod components;
mod scan;
mod types;
mod validation;

use components::login_form::LoginForm;
use components::registration_form::RegistrationForm;

/// Which top-level flow is visible. The two tabs share no state.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    SignIn,
    Register,
}

#[component]
pub fn App() -> impl IntoView {
    let (active_tab, set_active_tab) = signal(Tab::SignIn);

    view! {
        <div class="min-h-screen bg-gradient-to-br from-teal-50 to-blue-50 flex flex-col items-center justify-center p-4">
            <div class="w-full max-w-4xl">
                <div class="text-center mb-8">
                    <h1 class="text-3xl font-bold text-gray-900 mb-2">
                        "Welcome to CarePoint"
                    </h1>
                    <p class="text-gray-600">"Your health journey begins here"</p>
                </div>

                <div class="bg-white rounded-2xl shadow-xl overflow-hidden">
                    <div class="flex border-b border-gray-200">
                        <TabButton
                            tab=Tab::SignIn
                            label="Sign In"
                            active_tab=active_tab
                            set_active_tab=set_active_tab
                        />
                        <TabButton
                            tab=Tab::Register
                            label="Register"
                            active_tab=active_tab
                            set_active_tab=set_active_tab
                        />
                    </div>

                    <div class="p-6 sm:p-8">
                        {move || match active_tab.get() {
                            Tab::SignIn => view! { <LoginForm /> }.into_any(),
                            Tab::Register => view! { <RegistrationForm /> }.into_any(),
                        }}
                    </div>
                </div>

                <div class="text-center mt-8">
                    <p class="text-sm text-gray-600">
                        "© 2026 CarePoint. All rights reserved."
                    </p>
                </div>
            </div>
        </div>
    }
}

#[component]
fn TabButton(
    tab: Tab,
    label: &'static str,
    active_tab: ReadSignal<Tab>,
    set_active_tab: WriteSignal<Tab>,
) -> impl IntoView {
    view! {
        <button
            class=move || {
                if active_tab.get() == tab {
                    "flex-1 py-4 px-6 text-sm font-medium text-center text-teal-600 border-b-2 border-teal-600"
                } else {
                    "flex-1 py-4 px-6 text-sm font-medium text-center text-gray-500 hover:text-gray-700"
                }
            }
            on:click=move |_| set_active_tab.set(tab)
        >
            {label}
        </button>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
