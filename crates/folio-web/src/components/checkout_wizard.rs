//! Checkout wizard modal
//!
//! Renders a [`CheckoutWizard`]; every transition goes through the state
//! machine so refusal rules are shared with its unit tests.

use leptos::prelude::*;

use folio_core::{
    CheckoutWizard, FormField, PaymentMethod, Service, WizardAction, WizardError, WizardStep,
};

use crate::api;
use crate::components::use_toasts;

#[component]
pub fn CheckoutWizardModal(service: &'static Service, on_close: Callback<()>) -> impl IntoView {
    let toasts = use_toasts();
    let wizard = RwSignal::new(CheckoutWizard::for_service(service));
    let (notice, set_notice) = signal(None::<String>);

    let step = move || wizard.with(CheckoutWizard::step);
    let in_flight = move || wizard.with(CheckoutWizard::is_in_flight);

    let field = move |field: FormField, input_type: &'static str| {
        view! {
            <label class="field">
                <span>{field.label()} {field.is_required().then_some(" *")}</span>
                <input
                    type=input_type
                    required=field.is_required()
                    prop:value=move || wizard.with(|w| w.form().get(field).clone())
                    on:input=move |ev| wizard.update(|w| w.set_field(field, event_target_value(&ev)))
                />
            </label>
        }
    };

    let continue_toasts = toasts.clone();
    let on_continue = move |_: leptos::ev::MouseEvent| {
        let mut result = Ok(());
        wizard.update(|w| result = w.continue_to_payment());
        if let Err(e) = result {
            let detail = match &e {
                WizardError::MissingFields(fields) => Some(
                    fields
                        .iter()
                        .map(|f| f.label())
                        .collect::<Vec<_>>()
                        .join(", "),
                ),
                _ => None,
            };
            continue_toasts.error(e.to_string(), detail);
        } else {
            set_notice.set(None);
        }
    };

    let on_back = move |_: leptos::ev::MouseEvent| {
        wizard.update(|w| {
            let _ = w.back();
        });
    };

    let pay = move |method: PaymentMethod| {
        let mut started = Err(WizardError::InFlight);
        wizard.update(|w| started = w.begin_submit(method));

        let payload = match started {
            Ok(payload) => payload,
            Err(WizardError::UnsupportedMethod(_)) => {
                set_notice.set(Some(
                    WizardError::UnsupportedMethod(method).to_string(),
                ));
                return;
            }
            Err(_) => return,
        };

        set_notice.set(None);
        let toasts = toasts.clone();
        leptos::task::spawn_local(async move {
            let outcome = api::create_checkout(&payload).await;
            let mut action = None;
            wizard.update(|w| action = Some(w.finish_submit(outcome)));

            let navigated = match &action {
                Some(WizardAction::Redirect(url)) => web_sys::window()
                    .is_some_and(|window| window.location().set_href(url).is_ok()),
                _ => true,
            };
            if !navigated {
                wizard.update(|w| action = Some(w.redirect_failed()));
            }

            if let Some(WizardAction::Notify(message)) = action {
                toasts.error("Checkout failed", Some(message.clone()));
                set_notice.set(Some(message));
            }
        });
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal checkout-wizard" role="dialog" aria-modal="true">
                <header class="modal-header">
                    <h2>{format!("Get Started: {}", service.title)}</h2>
                    <button
                        class="modal-close"
                        aria-label="Close"
                        disabled=in_flight
                        on:click=move |_| on_close.run(())
                    >
                        "×"
                    </button>
                </header>

                <ol class="wizard-steps">
                    <li class:active=move || step() == WizardStep::Details>"1. Your details"</li>
                    <li class:active=move || step() == WizardStep::Payment>"2. Payment"</li>
                </ol>

                <Show
                    when=move || step() == WizardStep::Details
                    fallback=move || {
                        let pay_card = pay.clone();
                        let pay_wallet = pay.clone();
                        view! {
                            <div class="wizard-payment">
                                <p class="price">
                                    {format!("${}", service.price)}
                                    <span>" one-time"</span>
                                </p>
                                <button
                                    class="btn btn-primary"
                                    disabled=in_flight
                                    on:click=move |_| pay_card(PaymentMethod::Card)
                                >
                                    {move || if in_flight() { "Redirecting..." } else { "Pay with Card" }}
                                </button>
                                <button
                                    class="btn"
                                    disabled=in_flight
                                    on:click=move |_| pay_wallet(PaymentMethod::CryptoWallet)
                                >
                                    "Pay with Crypto Wallet"
                                </button>
                                <button class="btn btn-link" disabled=in_flight on:click=on_back>
                                    "Back"
                                </button>
                            </div>
                        }
                    }
                >
                    <div class="wizard-details">
                        {field(FormField::Name, "text")}
                        {field(FormField::Email, "email")}
                        {field(FormField::Phone, "tel")}
                        {field(FormField::Company, "text")}
                        <label class="field">
                            <span>{FormField::ProjectDetails.label()} " *"</span>
                            <textarea
                                rows="4"
                                prop:value=move || {
                                    wizard.with(|w| w.form().get(FormField::ProjectDetails).clone())
                                }
                                on:input=move |ev| {
                                    wizard.update(|w| {
                                        w.set_field(FormField::ProjectDetails, event_target_value(&ev));
                                    });
                                }
                            />
                        </label>
                        {field(FormField::Timeline, "text")}
                        <button class="btn btn-primary" on:click=on_continue.clone()>
                            "Continue to Payment"
                        </button>
                    </div>
                </Show>

                {move || notice.get().map(|message| view! { <p class="wizard-notice">{message}</p> })}
            </div>
        </div>
    }
}
