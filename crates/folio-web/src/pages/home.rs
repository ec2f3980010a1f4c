//! Home Page

use leptos::prelude::*;

use folio_core::catalog;

use crate::components::NewsletterSignup;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <header class="hero">
                <h1>"Content & Commerce Consulting"</h1>
                <p class="tagline">
                    "Strategy for online stores and the stories that sell them."
                </p>
                <div class="cta">
                    <a href="/services" class="btn btn-primary">"View Services"</a>
                    <a href="/contact" class="btn">"Get in Touch"</a>
                </div>
            </header>

            <section class="features">
                {catalog::services()
                    .iter()
                    .map(|service| {
                        view! {
                            <div class="feature">
                                <h3>{service.title.clone()}</h3>
                                <p>{service.short_description.clone()}</p>
                                <a href=service.href()>{format!("From ${}", service.price)}</a>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>

            <section class="newsletter-section">
                <NewsletterSignup source="homepage" />
            </section>
        </div>
    }
}
