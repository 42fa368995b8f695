//! Orderdesk Client - SDK for the admin API
//!
//! [`AdminClient`] wraps the HTTP surface of the admin service. The listing
//! views ([`OrderListing`], [`UserListing`]) hold what an operator sees: the
//! current page, local filters, search results and optimistic edits.
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk_client::{AdminClient, ClientConfig, OrderListing};
//! use std::sync::Arc;
//!
//! let config = ClientConfig::new("https://admin.internal").with_token("secret");
//! let client = Arc::new(AdminClient::new(config.clone()));
//! let orders = OrderListing::new(client, &config);
//!
//! orders.load(1).await?;
//! orders.set_payment_status(order_id, "paid").await?;
//! orders.search_debounced("acme");
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod orders;
pub mod pagination;
pub mod search;
pub mod users;

pub use backend::{OrderBackend, UserBackend};
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::AdminClient;
pub use orders::{OrderListing, OrderSearch};
pub use pagination::{PageCoordinator, PageDecision};
pub use search::{Debouncer, SearchSequencer, SequenceGate};
pub use users::{UserListing, UserSearch};
