//! Orderdesk DB - Database abstractions
//!
//! SQLx-based database layer for the orderdesk back-office.
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk_db::{create_pool, OrderRepository, Repositories};
//!
//! let pool = create_pool("postgres://localhost/orderdesk").await?;
//! let repos = Repositories::new(pool);
//!
//! // Newest fifteen orders
//! let orders = repos.orders.list_page(0, 15).await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;
pub mod sql;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, create_pool_lazy, run_migrations, DbPool};
pub use repo::*;
