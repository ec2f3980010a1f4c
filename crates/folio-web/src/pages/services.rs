//! Service list and detail pages

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use folio_core::{Service, catalog};

use crate::components::CheckoutWizardModal;

#[component]
pub fn ServicesPage() -> impl IntoView {
    view! {
        <div class="services">
            <h1>"Services"</h1>
            <p class="subtitle">"Fixed-scope engagements, paid up front"</p>

            <div class="plans">
                {catalog::services()
                    .iter()
                    .map(|service| {
                        let class = if service.is_popular { "plan featured" } else { "plan" };
                        view! {
                            <div class=class>
                                {service.is_popular.then(|| view! { <span class="badge">"Popular"</span> })}
                                <span class="category">{service.category.name.clone()}</span>
                                <h2>{service.title.clone()}</h2>
                                <div class="price">{format!("${}", service.price)}</div>
                                <p>{service.short_description.clone()}</p>
                                <a href=service.href() class="btn btn-primary">"Learn More"</a>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Resolves `/services/{slug}`; checkout cancel redirects use the id instead
fn lookup(key: &str) -> Option<&'static Service> {
    catalog::find_by_slug(key).or_else(|| catalog::find_by_id(key))
}

#[component]
pub fn ServiceDetailPage() -> impl IntoView {
    let params = use_params_map();
    let service = move || params.with(|p| p.get("slug").and_then(|key| lookup(&key)));

    move || match service() {
        Some(service) => view! { <ServiceDetail service=service /> }.into_any(),
        None => view! {
            <div class="not-found">
                <h1>"Service not found"</h1>
                <a href="/services" class="btn">"All services"</a>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn ServiceDetail(service: &'static Service) -> impl IntoView {
    let (wizard_open, set_wizard_open) = signal(false);
    let close = Callback::new(move |()| set_wizard_open.set(false));

    view! {
        <article class="service-detail">
            <header>
                <span class="category">{service.category.name.clone()}</span>
                <h1>{service.title.clone()}</h1>
                <p class="description">{service.description.clone()}</p>
                <div class="price">{format!("${}", service.price)}</div>
                <button
                    class="btn btn-primary"
                    disabled=!service.is_available
                    on:click=move |_| set_wizard_open.set(true)
                >
                    {if service.is_available { "Get Started" } else { "Currently Unavailable" }}
                </button>
            </header>

            <section>
                <h2>"What's included"</h2>
                <ul>
                    {service.features.iter().map(|f| view! { <li>{f.clone()}</li> }).collect_view()}
                </ul>
            </section>

            <section>
                <h2>"Process"</h2>
                <ol class="process">
                    {service
                        .process
                        .iter()
                        .map(|step| {
                            view! {
                                <li>
                                    <h3>{step.title.clone()}</h3>
                                    <p>{step.description.clone()}</p>
                                    <span class="duration">{step.duration.clone()}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ol>
            </section>

            <Show when=move || wizard_open.get()>
                <CheckoutWizardModal service=service on_close=close />
            </Show>
        </article>
    }
}
