//! Toast outlet
//!
//! The store lives in context (see `App`); this component mirrors it into a
//! signal for the lifetime of the mount and drops its listener on cleanup.

use std::time::Duration;

use leptos::prelude::*;

use folio_core::toast::AUTO_DISMISS_MS;
use folio_core::{Toast, ToastHandle, ToastVariant};

/// The toast store provided by the app root
pub fn use_toasts() -> ToastHandle {
    expect_context::<ToastHandle>()
}

#[component]
pub fn Toaster() -> impl IntoView {
    let handle = use_toasts();
    let (toasts, set_toasts) = signal(Vec::<Toast>::new());

    let subscription = handle.subscribe(move |current| set_toasts.set(current.to_vec()));
    let cleanup = handle.clone();
    on_cleanup(move || {
        cleanup.unsubscribe(subscription);
    });

    view! {
        <div class="toaster" role="status" aria-live="polite">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let timer = handle.clone();
                    set_timeout(
                        move || {
                            timer.dismiss(id);
                        },
                        Duration::from_millis(AUTO_DISMISS_MS),
                    );

                    let close = handle.clone();
                    let class = match toast.variant {
                        ToastVariant::Default => "toast",
                        ToastVariant::Destructive => "toast toast-destructive",
                    };
                    view! {
                        <div class=class>
                            <div class="toast-body">
                                <strong>{toast.title}</strong>
                                {toast.description.map(|d| view! { <p>{d}</p> })}
                            </div>
                            <button
                                class="toast-close"
                                aria-label="Dismiss"
                                on:click=move |_| {
                                    close.dismiss(id);
                                }
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
