//! Hookcat - Webhook Traffic Discovery & Documentation Catalog Generation
//!
//! This crate discovers webhook traffic from a webhook-infrastructure
//! provider's API and materializes it as a documentation catalog: one
//! catalog service per source/destination, one catalog event per distinct
//! observed payload shape, with inferred JSON schema and example bodies.
//!
//! # Features
//!
//! - **Provider Ingestion**: Cursor-paginated traversal with a per-run
//!   record cap and rate-limit pacing
//! - **Payload Inference**: Structural JSON schema inference and logical
//!   event-type resolution per record
//! - **Catalog Sync**: Idempotent create-if-absent reconciliation, keyed by
//!   a single run-wide version stamp
//! - **Filtering**: Connection working-set narrowing by source-name pattern
//!
//! # Architecture
//!
//! ```text
//! Provider API ──▶ Connection Filter ──▶ unique Sources / Destinations
//!                                              │
//!                                              ▼
//!                                       Bounded Pager
//!                                              │
//!                         ┌────────────────────┴────────┐
//!                         ▼                             ▼
//!                  Schema Inference            Event-Type Resolution
//!                         └────────────────────┬────────┘
//!                                              ▼
//!                                     Catalog Reconciler
//!                                              │
//!                                              ▼
//!                              Services, Events, Domain links
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hookcat::catalog::FileCatalogStore;
//! use hookcat::config::GeneratorConfig;
//! use hookcat::provider::HttpProviderClient;
//! use hookcat::sync::Generator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeneratorConfig::new("./catalog", "my-api-key");
//!     let client = HttpProviderClient::with_default_base(config.api_key.clone())?;
//!     let store = FileCatalogStore::new(&config.catalog_dir);
//!
//!     let summary = Generator::new().run(&config, &client, &store).await?;
//!     println!("Wrote {} services, {} events", summary.services_written, summary.events_written);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod inference;
pub mod provider;
pub mod sync;
pub mod version;

// Re-exports for convenience
pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use provider::{HttpProviderClient, ProviderClient};
pub use sync::{Generator, RunSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
