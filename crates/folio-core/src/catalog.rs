//! Service Catalog
//!
//! The one canonical schema for purchasable services, plus the built-in
//! offerings. Pages, the checkout wizard and the `/services` endpoints all
//! read from here.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Grouping for services
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Theme color used by the UI
    pub color: String,
}

/// One step of how a service is delivered
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub step: u8,
    pub title: String,
    pub description: String,
    /// Human-readable estimate, e.g. "3-4 days"
    pub duration: String,
}

/// A purchasable service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,

    /// Price in whole currency units (497 = $497)
    pub price: i64,

    /// ISO currency code
    pub currency: String,

    pub features: Vec<String>,
    pub process: Vec<ProcessStep>,
    pub category: ServiceCategory,
    pub is_popular: bool,
    pub is_available: bool,

    /// Catalog price reference on the payment provider, if one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_price_id: Option<String>,
}

impl Service {
    /// Path of the service detail page
    pub fn href(&self) -> String {
        format!("/services/{}", self.slug)
    }
}

static CATEGORIES: LazyLock<Vec<ServiceCategory>> = LazyLock::new(|| {
    vec![
        ServiceCategory {
            id: "1".into(),
            name: "Content Strategy".into(),
            slug: "content-strategy".into(),
            description: "Strategic content planning and editorial guidance".into(),
            color: "blue".into(),
        },
        ServiceCategory {
            id: "2".into(),
            name: "E-commerce Consulting".into(),
            slug: "ecommerce-consulting".into(),
            description: "Growth strategies and optimization for online stores".into(),
            color: "green".into(),
        },
    ]
});

static SERVICES: LazyLock<Vec<Service>> = LazyLock::new(|| {
    vec![
        Service {
            id: "1".into(),
            title: "E-commerce Growth Audit".into(),
            slug: "ecommerce-growth-audit".into(),
            description: "Comprehensive analysis of your online store with actionable \
                          recommendations to increase revenue and optimize conversions."
                .into(),
            short_description:
                "Deep-dive audit of your e-commerce store with growth recommendations".into(),
            price: 497,
            currency: "USD".into(),
            features: strings(&[
                "Complete site analysis (UX/UI, performance, SEO)",
                "Conversion funnel optimization report",
                "Competitor benchmarking analysis",
                "Revenue optimization roadmap",
                "Personalized 60-minute strategy call",
                "Written report with prioritized action items",
            ]),
            process: vec![
                step(1, "Discovery & Access", "Share your store details and provide necessary access for analysis", "1 day"),
                step(2, "Deep Analysis", "Comprehensive audit of your store, competitors, and market position", "3-4 days"),
                step(3, "Strategy Session", "Live 60-minute call to discuss findings and recommendations", "1 hour"),
                step(4, "Final Report", "Detailed written report with actionable next steps", "1-2 days"),
            ],
            category: CATEGORIES[1].clone(),
            is_popular: true,
            is_available: true,
            stripe_price_id: None,
        },
        Service {
            id: "2".into(),
            title: "Content Strategy Blueprint".into(),
            slug: "content-strategy-blueprint".into(),
            description: "Custom content strategy designed to build your authority, engage \
                          your audience, and drive meaningful business results."
                .into(),
            short_description:
                "Tailored content strategy to establish authority and drive engagement".into(),
            price: 297,
            currency: "USD".into(),
            features: strings(&[
                "Comprehensive audience analysis",
                "Content pillar development",
                "Editorial calendar (3 months)",
                "Content format recommendations",
                "Distribution strategy",
                "Performance tracking setup",
            ]),
            process: vec![
                step(1, "Brand Discovery", "Understanding your brand voice, goals, and target audience", "1 day"),
                step(2, "Strategy Development", "Creating comprehensive content pillars and messaging framework", "2-3 days"),
                step(3, "Calendar Creation", "Building detailed editorial calendar with content ideas", "1-2 days"),
            ],
            category: CATEGORIES[0].clone(),
            is_popular: false,
            is_available: true,
            stripe_price_id: None,
        },
    ]
});

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn step(step: u8, title: &str, description: &str, duration: &str) -> ProcessStep {
    ProcessStep {
        step,
        title: title.into(),
        description: description.into(),
        duration: duration.into(),
    }
}

/// All services, in display order
pub fn services() -> &'static [Service] {
    &SERVICES
}

pub fn categories() -> &'static [ServiceCategory] {
    &CATEGORIES
}

pub fn find_by_slug(slug: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.slug == slug)
}

pub fn find_by_id(id: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.id == id)
}
