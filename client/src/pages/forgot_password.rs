//! Password recovery: request a reset link, or set a new password when the
//! page is opened from that link (`?code=...`).

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
#[cfg(feature = "hydrate")]
use strapi::Services;
#[cfg(feature = "hydrate")]
use strapi::validate::ResetPasswordForm;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let query = use_query_map();
    let code = move || query.read().get("code").filter(|c| !c.is_empty());

    view! {
        <div class="auth-page">
            <div class="auth-card">
                {move || match code() {
                    Some(code) => view! { <NewPasswordForm code/> }.into_any(),
                    None => view! { <RequestLinkForm/> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn RequestLinkForm() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let services = expect_context::<Services>();

    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let sent = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let services = services.clone();
            let email_value = email.get();
            leptos::task::spawn_local(async move {
                match services.auth.forgot_password(&email_value).await {
                    Ok(()) => sent.set(true),
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
    };

    view! {
        <h1>"Forgot password"</h1>
        <Show
            when=move || sent.get()
            fallback=move || {
                view! {
                    <form class="auth-form" on:submit=on_submit.clone()>
                        <input
                            class="auth-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Sending..." } else { "Send reset link" }}
                        </button>
                    </form>
                }
            }
        >
            <p class="auth-message">"If an account exists for that address, a reset link is on its way."</p>
        </Show>
        <Show when=move || !info.get().is_empty()>
            <p class="auth-message auth-message--error">{move || info.get()}</p>
        </Show>
        <a href="/auth" class="auth-link">"Back to sign in"</a>
    }
}

#[component]
fn NewPasswordForm(code: String) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let services = expect_context::<Services>();

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
            let form = ResetPasswordForm {
                code: code.clone(),
                password: password.get(),
                password_confirmation: confirm.get(),
            };
            leptos::task::spawn_local(async move {
                match services.auth.reset_password(&form).await {
                    Ok(next) => crate::util::auth::hard_navigate(next.path()),
                    Err(e) => {
                        error.set(e.to_string());
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = &code;
    };

    view! {
        <h1>"Choose a new password"</h1>
        <form class="auth-form" on:submit=on_submit>
            <input
                class="auth-input"
                type="password"
                placeholder="New password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <input
                class="auth-input"
                type="password"
                placeholder="Confirm new password"
                prop:value=move || confirm.get()
                on:input=move |ev| confirm.set(event_target_value(&ev))
            />
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Saving..." } else { "Reset password" }}
            </button>
        </form>
        <ul class="auth-hints">
            <li>"Password must be at least 6 characters long"</li>
            <li>"Both passwords must match"</li>
        </ul>
        <Show when=move || !error.get().is_empty()>
            <p class="auth-message auth-message--error">{move || error.get()}</p>
        </Show>
    }
}
