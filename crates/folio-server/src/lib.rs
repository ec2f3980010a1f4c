//! # folio-server
//!
//! Axum HTTP server for the folio site.
//!
//! | Method | Path                          | Purpose                         |
//! |--------|-------------------------------|---------------------------------|
//! | GET    | `/health`                     | liveness + configured backends  |
//! | POST   | `/api/checkout`               | open a hosted checkout session  |
//! | GET    | `/api/checkout/session/{id}`  | confirmation page lookup        |
//! | POST   | `/api/contact`                | store a contact message         |
//! | POST   | `/api/newsletter`             | subscribe to a newsletter list  |
//! | GET    | `/api/services[/{slug}]`      | service catalog                 |
//!
//! `GET /api/contact` and `GET /api/newsletter` describe their POST bodies.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ConfigError, SiteConfig};
pub use error::ApiError;
pub use routes::{api_router, app, app_with_static};
pub use state::AppState;
