//! Chocorocks Inventory & Sales Dashboard - Data Layer
//!
//! The workflow engine the dashboard UI embeds: a typed REST client over the
//! external Chocorocks backend plus the services that keep product stock,
//! per-store stock and batch quantities consistent as inventory moves.
//! The backend owns every entity; nothing here is authoritative state.

pub mod api;
pub mod config;
pub mod error;
pub mod services;

pub use config::Config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize environment and logging
///
/// The embedding shell calls this once at startup, before building an
/// [`api::ApiClient`].
pub fn init() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chocorocks_client=debug,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
