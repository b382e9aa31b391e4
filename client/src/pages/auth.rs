//! Sign-in / registration page with a mode toggle.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use strapi::Services;
#[cfg(feature = "hydrate")]
use strapi::validate::RegisterForm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    SignIn,
    Register,
}

#[component]
pub fn AuthPage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let services = expect_context::<Services>();

    let mode = RwSignal::new(Mode::SignIn);
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let services = services.clone();
            let current = mode.get();
            let form = RegisterForm {
                username: username.get(),
                email: email.get(),
                password: password.get(),
                confirm_password: confirm.get(),
            };
            leptos::task::spawn_local(async move {
                let result = match current {
                    Mode::SignIn => services.auth.login(&form.email, &form.password).await,
                    Mode::Register => services.auth.register(&form).await,
                };
                match result {
                    Ok(next) => crate::util::auth::hard_navigate(next.path()),
                    Err(e) => {
                        error.set(e.to_string());
                        busy.set(false);
                    }
                }
            });
        }
    };

    let toggle = move |_| {
        mode.update(|m| {
            *m = match m {
                Mode::SignIn => Mode::Register,
                Mode::Register => Mode::SignIn,
            };
        });
        error.set(String::new());
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{move || if mode.get() == Mode::SignIn { "Sign in" } else { "Create an account" }}</h1>
                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || mode.get() == Mode::Register>
                        <input
                            class="auth-input"
                            type="text"
                            placeholder="Username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || mode.get() == Mode::Register>
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="Confirm password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                    </Show>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || match (busy.get(), mode.get()) {
                            (true, _) => "Please wait...",
                            (false, Mode::SignIn) => "Sign in",
                            (false, Mode::Register) => "Register",
                        }}
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>
                <button class="auth-toggle" type="button" on:click=toggle>
                    {move || if mode.get() == Mode::SignIn {
                        "No account yet? Register"
                    } else {
                        "Already registered? Sign in"
                    }}
                </button>
                <a href="/forgot-password" class="auth-link">"Forgot your password?"</a>
            </div>
        </div>
    }
}
