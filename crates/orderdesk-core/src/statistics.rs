//! Dashboard statistics

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::instrument;

use orderdesk_db::{count_to_u64, OrderRepository, ProfileRepository};
use orderdesk_types::{DateWindow, OrderCount, StatisticsSnapshot, WindowSelector};

use crate::query::resolve_window;
use crate::CoreError;

/// Statistics service
pub struct StatisticsService<O: OrderRepository, P: ProfileRepository> {
    orders: Arc<O>,
    profiles: Arc<P>,
}

impl<O: OrderRepository, P: ProfileRepository> StatisticsService<O, P> {
    /// Create a new statistics service
    pub fn new(orders: Arc<O>, profiles: Arc<P>) -> Self {
        Self { orders, profiles }
    }

    /// Counts for the selected window, relative to the current local time
    pub async fn compute(&self, selector: WindowSelector) -> Result<StatisticsSnapshot, CoreError> {
        self.compute_at(selector, Local::now()).await
    }

    /// Counts for the selected window, relative to `now`.
    ///
    /// All four counts run concurrently; any failure fails the snapshot.
    #[instrument(skip(self))]
    pub async fn compute_at(
        &self,
        selector: WindowSelector,
        now: DateTime<Local>,
    ) -> Result<StatisticsSnapshot, CoreError> {
        let window = resolve_window(&selector, now);
        let users_window = if selector.is_all_time() {
            DateWindow::unbounded()
        } else {
            window
        };

        let (paid, quick, full, users) = tokio::try_join!(
            self.orders.count_for_statistics(OrderCount::Paid, &window),
            self.orders
                .count_for_statistics(OrderCount::QuickAnalysisDone, &window),
            self.orders
                .count_for_statistics(OrderCount::FullAnalysisDone, &window),
            self.profiles.count_created(&users_window),
        )?;

        Ok(StatisticsSnapshot {
            paid_orders_count: count_to_u64(paid),
            quick_analyses_count: count_to_u64(quick),
            full_analyses_count: count_to_u64(full),
            users_count: count_to_u64(users),
            period: selector.label().to_string(),
        })
    }
}
