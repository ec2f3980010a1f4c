//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use folio_core::ToastHandle;

use crate::components::Toaster;
use crate::pages::{CheckoutSuccessPage, ContactPage, HomePage, ServiceDetailPage, ServicesPage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // One toast store per mounted app, shared through context
    provide_context(ToastHandle::new());

    view! {
        <Router>
            <nav class="nav">
                <a href="/" class="brand">"folio"</a>
                <a href="/services">"Services"</a>
                <a href="/contact">"Contact"</a>
            </nav>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/services") view=ServicesPage />
                    <Route path=path!("/services/:slug") view=ServiceDetailPage />
                    <Route path=path!("/checkout/success") view=CheckoutSuccessPage />
                    <Route path=path!("/contact") view=ContactPage />
                </Routes>
            </main>
            <Toaster />
        </Router>
    }
}
