//! Contact Page

use leptos::prelude::*;
use serde_json::json;

use crate::api;
use crate::components::use_toasts;

#[component]
pub fn ContactPage() -> impl IntoView {
    let toasts = use_toasts();
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (subject, set_subject) = signal(String::new());
    let (message, set_message) = signal(String::new());
    let (kind, set_kind) = signal("general".to_string());
    let (sending, set_sending) = signal(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get() {
            return;
        }

        let form = json!({
            "name": name.get(),
            "email": email.get(),
            "subject": subject.get(),
            "message": message.get(),
            "type": kind.get(),
        });

        set_sending.set(true);
        let toasts = toasts.clone();
        leptos::task::spawn_local(async move {
            match api::send_contact(&form).await {
                Ok(confirmation) => {
                    toasts.show("Message sent", Some(confirmation));
                    for setter in [set_name, set_email, set_subject, set_message] {
                        setter.set(String::new());
                    }
                }
                Err(e) => {
                    toasts.error("Could not send message", Some(e));
                }
            }
            set_sending.set(false);
        });
    };

    view! {
        <div class="contact">
            <h1>"Get in Touch"</h1>
            <p class="subtitle">"Questions about a service or a custom project? Send a note."</p>

            <form class="contact-form" on:submit=submit>
                <label class="field">
                    <span>"Name"</span>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Email"</span>
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Inquiry type"</span>
                    <select on:change=move |ev| set_kind.set(event_target_value(&ev))>
                        <option value="general" selected=move || kind.get() == "general">"General"</option>
                        <option value="consulting" selected=move || kind.get() == "consulting">"Consulting"</option>
                        <option value="writing" selected=move || kind.get() == "writing">"Writing"</option>
                    </select>
                </label>
                <label class="field">
                    <span>"Subject"</span>
                    <input
                        type="text"
                        prop:value=move || subject.get()
                        on:input=move |ev| set_subject.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Message"</span>
                    <textarea
                        rows="6"
                        prop:value=move || message.get()
                        on:input=move |ev| set_message.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="btn btn-primary" disabled=move || sending.get()>
                    {move || if sending.get() { "Sending..." } else { "Send Message" }}
                </button>
            </form>
        </div>
    }
}
