//! Application state for the admin API service.

use std::sync::Arc;

use orderdesk_core::{
    GoTrueDirectory, HttpAnalysisRunner, HttpInvoiceRenderer, InvoiceService, OrderService,
    StatisticsService, UserService,
};
use orderdesk_db::pg::{PgInvoiceRepository, PgOrderRepository, PgProfileRepository, Repositories};
use orderdesk_db::DbPool;

use crate::config::Config;

pub type Orders = OrderService<PgOrderRepository>;
pub type Users = UserService<PgProfileRepository>;
pub type Statistics = StatisticsService<PgOrderRepository, PgProfileRepository>;
pub type Invoices = InvoiceService<PgOrderRepository, PgInvoiceRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<Orders>,
    pub users: Arc<Users>,
    pub statistics: Arc<Statistics>,
    pub invoices: Arc<Invoices>,
    /// Database pool (readiness check)
    pub pool: DbPool,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the services over the Postgres repositories and HTTP providers
    pub fn new(pool: DbPool, config: Config) -> Self {
        let repos = Repositories::new(pool.clone());
        let orders_repo = Arc::new(repos.orders);
        let profiles_repo = Arc::new(repos.profiles);

        let desk = &config.desk;
        let orders = OrderService::new(
            orders_repo.clone(),
            Arc::new(HttpAnalysisRunner::new(desk)),
        );
        let users = UserService::new(
            profiles_repo.clone(),
            Arc::new(GoTrueDirectory::new(desk)),
            desk.max_directory_pages,
        );
        let statistics = StatisticsService::new(orders_repo.clone(), profiles_repo);
        let invoices = InvoiceService::new(
            orders_repo,
            Arc::new(repos.invoices),
            Arc::new(HttpInvoiceRenderer::new(desk)),
            desk.pricing.clone(),
        );

        Self {
            orders: Arc::new(orders),
            users: Arc::new(users),
            statistics: Arc::new(statistics),
            invoices: Arc::new(invoices),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
