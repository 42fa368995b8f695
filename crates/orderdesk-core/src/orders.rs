//! Order listing, search and state changes

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use orderdesk_db::{count_to_u64, OrderRepository, OrderRow};
use orderdesk_types::api::{OrderSearchResponse, PageResponse};
use orderdesk_types::{Order, OrderId, Pagination, PaymentStatus, UserId};

use crate::provider::AnalysisRunner;
use crate::query::{merge_unique, SearchQuery};
use crate::{validate_page, CoreError};

/// Cap on primary search results
pub const SEARCH_LIMIT: i64 = 100;

/// Cap on supplemental full-text results
pub const FULL_TEXT_LIMIT: i64 = 50;

/// Order service
pub struct OrderService<O: OrderRepository> {
    orders: Arc<O>,
    analysis: Arc<dyn AnalysisRunner>,
}

impl<O: OrderRepository> OrderService<O> {
    /// Create a new order service
    pub fn new(orders: Arc<O>, analysis: Arc<dyn AnalysisRunner>) -> Self {
        Self { orders, analysis }
    }

    /// One page of orders, newest first, with the exact total
    #[instrument(skip(self))]
    pub async fn list(&self, page: u32, page_size: u32) -> Result<PageResponse<Order>, CoreError> {
        validate_page(page, page_size)?;
        let offset = i64::from(page - 1) * i64::from(page_size);

        let (total, rows) = tokio::try_join!(
            self.orders.count_all(),
            self.orders.list_page(offset, i64::from(page_size)),
        )?;

        Ok(PageResponse {
            data: into_orders(rows)?,
            pagination: Pagination::new(page, page_size, count_to_u64(total)),
        })
    }

    /// Search orders by identifier prefix or text, supplemented by
    /// full-text search over company details when few rows match.
    #[instrument(skip(self))]
    pub async fn search(&self, raw_query: &str) -> Result<OrderSearchResponse, CoreError> {
        let query = SearchQuery::parse(raw_query)?;
        let predicate = query.predicate();

        let (count, rows) = tokio::try_join!(
            self.orders.count_matching(&predicate),
            self.orders.search(&predicate, SEARCH_LIMIT),
        )?;
        let primary = into_orders(rows)?;

        let mut full_text_search_used = false;
        let mut supplemental = Vec::new();
        if query.wants_full_text(primary.len()) {
            match self
                .orders
                .full_text_search(query.as_str(), FULL_TEXT_LIMIT)
                .await
            {
                Ok(rows) => {
                    supplemental = into_orders(rows)?;
                    full_text_search_used = !supplemental.is_empty();
                }
                Err(e) => warn!(error = %e, "Full-text search failed, using primary results"),
            }
        }

        let data = merge_unique(primary, supplemental, |order| order.id);
        let total_count = match count_to_u64(count) {
            0 => data.len() as u64,
            n => n,
        };

        debug!(total_count, full_text_search_used, "Order search complete");

        Ok(OrderSearchResponse {
            data,
            total_count,
            full_text_search_used,
        })
    }

    /// Set an order's payment status
    #[instrument(skip(self))]
    pub async fn set_payment_status(&self, id: OrderId, status: &str) -> Result<Order, CoreError> {
        let status: PaymentStatus = status.parse().map_err(|_| {
            CoreError::Validation("Invalid payment status. Must be 'pending' or 'paid'".to_string())
        })?;

        let row = self
            .orders
            .update_payment_status(id.0, status.as_str())
            .await?
            .ok_or_else(|| CoreError::NotFound("Order not found".to_string()))?;

        Ok(Order::try_from(row)?)
    }

    /// Ask the analysis service to run the full analysis for an order
    #[instrument(skip(self))]
    pub async fn start_full_analysis(&self, id: OrderId) -> Result<(), CoreError> {
        let order = self
            .orders
            .find_by_id(id.0)
            .await?
            .ok_or_else(|| CoreError::NotFound("Order not found".to_string()))?;

        let user_id = order.user_id.ok_or_else(|| {
            CoreError::Validation("Order has no owning user; cannot start full analysis".to_string())
        })?;

        self.analysis
            .start_full_analysis(&id, &UserId(user_id))
            .await
    }
}

fn into_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, CoreError> {
    rows.into_iter()
        .map(|row| Order::try_from(row).map_err(CoreError::from))
        .collect()
}
