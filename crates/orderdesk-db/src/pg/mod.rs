//! PostgreSQL repository implementations

mod invoice;
mod order;
mod profile;

pub use invoice::PgInvoiceRepository;
pub use order::PgOrderRepository;
pub use profile::PgProfileRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub orders: PgOrderRepository,
    pub profiles: PgProfileRepository,
    pub invoices: PgInvoiceRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            orders: PgOrderRepository::new(pool.clone()),
            profiles: PgProfileRepository::new(pool.clone()),
            invoices: PgInvoiceRepository::new(pool),
        }
    }
}
