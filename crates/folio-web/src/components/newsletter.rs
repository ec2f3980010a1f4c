//! Newsletter signup form

use leptos::prelude::*;

use folio_core::SubscriptionType;

use crate::api;
use crate::components::use_toasts;

#[component]
pub fn NewsletterSignup(
    /// List preselected in the dropdown
    #[prop(default = SubscriptionType::Ecommerce)]
    list: SubscriptionType,
    /// Recorded with the subscription
    #[prop(default = "website")]
    source: &'static str,
) -> impl IntoView {
    let toasts = use_toasts();
    let (email, set_email) = signal(String::new());
    let (selected, set_selected) = signal(list);
    let (loading, set_loading) = signal(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let address = email.get();
        if address.trim().is_empty() || loading.get() {
            return;
        }

        set_loading.set(true);
        let toasts = toasts.clone();
        let list = selected.get();
        leptos::task::spawn_local(async move {
            match api::subscribe_newsletter(&address, list, source).await {
                Ok(result) => {
                    let title = if result.already_subscribed {
                        "You're already subscribed"
                    } else {
                        "Subscribed!"
                    };
                    toasts.show(title, Some(result.message));
                    set_email.set(String::new());
                }
                Err(e) => {
                    toasts.error("Subscription failed", Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <form class="newsletter" on:submit=submit>
            <h3>"Get insights in your inbox"</h3>
            <div class="newsletter-fields">
                <input
                    type="email"
                    placeholder="you@example.com"
                    required=true
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <select on:change=move |ev| {
                    if let Some(list) = SubscriptionType::parse(&event_target_value(&ev)) {
                        set_selected.set(list);
                    }
                }>
                    {SubscriptionType::ALL
                        .into_iter()
                        .map(|option| {
                            view! {
                                <option
                                    value=option.as_str()
                                    selected=move || selected.get() == option
                                >
                                    {match option {
                                        SubscriptionType::Ecommerce => "E-commerce",
                                        SubscriptionType::Journalism => "Journalism",
                                    }}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                    {move || if loading.get() { "..." } else { "Subscribe" }}
                </button>
            </div>
        </form>
    }
}
