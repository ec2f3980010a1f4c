//! Checkout confirmation page
//!
//! Stripe redirects here with `?session_id=cs_...`; the session is looked up
//! through the API to show what was paid.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use folio_core::catalog;

use crate::api::{self, CheckoutSessionView};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Lookup {
    Loading,
    Found(CheckoutSessionView),
    Failed(String),
}

#[component]
pub fn CheckoutSuccessPage() -> impl IntoView {
    let query = use_query_map();
    let (lookup, set_lookup) = signal(Lookup::Loading);

    match query.with_untracked(|q| q.get("session_id")) {
        Some(session_id) if !session_id.is_empty() => {
            leptos::task::spawn_local(async move {
                let result = match api::checkout_session(&session_id).await {
                    Ok(session) => Lookup::Found(session),
                    Err(e) => Lookup::Failed(e),
                };
                set_lookup.set(result);
            });
        }
        _ => set_lookup.set(Lookup::Failed("Missing checkout session id".into())),
    }

    view! {
        <div class="checkout-success">
            {move || match lookup.get() {
                Lookup::Loading => view! { <p class="loading">"Confirming your payment..."</p> }.into_any(),
                Lookup::Failed(message) => view! {
                    <div class="error">
                        <h1>"We couldn't find that checkout"</h1>
                        <p>{message}</p>
                        <a href="/services" class="btn">"Back to services"</a>
                    </div>
                }
                .into_any(),
                Lookup::Found(session) => {
                    let title = session
                        .service_id
                        .as_deref()
                        .and_then(catalog::find_by_id)
                        .map_or_else(|| "your service".to_string(), |s| s.title.clone());
                    let heading = if session.is_paid() { "Payment received!" } else { "Almost there" };
                    view! {
                        <div class="confirmation">
                            <h1>{heading}</h1>
                            <p>{format!("Thank you for purchasing {title}.")}</p>
                            {session.display_amount().map(|amount| view! { <p class="price">{amount}</p> })}
                            {session.customer_email.clone().map(|email| view! {
                                <p>{format!("A receipt is on its way to {email}. I'll be in touch within one business day.")}</p>
                            })}
                            <p class="reference">{format!("Reference: {}", session.id)}</p>
                            <a href="/" class="btn btn-primary">"Back to home"</a>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
