//! folio HTTP Server
//!
//! Serves the checkout, contact and newsletter API plus the compiled
//! frontend.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_payments::{CheckoutService, SessionBuilder, StripeClient};
use folio_server::{AppState, SiteConfig, app_with_static};
use folio_store::{SupabaseConfig, SupabaseStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = SiteConfig::from_env().context("invalid server configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    // Payments
    StripeClient::currency(&config.currency).context("unsupported checkout currency")?;
    let stripe =
        StripeClient::new(&config.stripe_secret_key).context("failed to configure Stripe")?;
    let checkout = CheckoutService::new(
        Arc::new(stripe),
        SessionBuilder::new(config.checkout_settings()?),
    );
    tracing::info!("✓ Stripe configured ({})", config.currency);

    // Submissions
    let store = SupabaseStore::new(SupabaseConfig::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    ))
    .context("failed to configure Supabase")?;
    tracing::info!("✓ Supabase configured ({})", config.supabase_url);

    let state = AppState::new(checkout, Arc::new(store));
    let app = app_with_static(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 folio server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                     - Health check");
    tracing::info!("  POST /api/checkout               - Create Stripe checkout");
    tracing::info!("  GET  /api/checkout/session/{{id}} - Checkout session status");
    tracing::info!("  POST /api/contact                - Contact form");
    tracing::info!("  POST /api/newsletter             - Newsletter signup");
    tracing::info!("  GET  /api/services               - Service catalog");
    tracing::info!("  Static files from {}", config.static_dir.display());
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
