//! Orders listing view
//!
//! Holds the current server page (the working set), a local filter over it,
//! the active search and optimistic payment-status edits. The visible rows
//! are derived on every read, never stored.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use orderdesk_types::{Order, OrderFilter, OrderId, Pagination, PaymentStatus};

use crate::backend::OrderBackend;
use crate::pagination::{PageCoordinator, PageDecision};
use crate::search::{Debouncer, SearchSequencer, SequenceGate};
use crate::{ClientConfig, ClientError};

/// Applied search results
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSearch {
    pub query: String,
    pub results: Vec<Order>,
    pub total_count: u64,
    pub full_text_search_used: bool,
}

#[derive(Debug)]
struct OrdersState {
    working_set: Vec<Order>,
    pagination: Pagination,
    filter: OrderFilter,
    search: Option<OrderSearch>,
    gate: SequenceGate,
}

impl OrdersState {
    fn local_mode(&self) -> bool {
        self.filter.is_active() || self.search.is_some()
    }

    fn visible(&self) -> Vec<Order> {
        match &self.search {
            Some(search) => search.results.clone(),
            None => self
                .working_set
                .iter()
                .filter(|order| self.filter.matches(order))
                .cloned()
                .collect(),
        }
    }

    fn is_visible(&self, id: OrderId) -> bool {
        match &self.search {
            Some(search) => search.results.iter().any(|o| o.id == id),
            None => self
                .working_set
                .iter()
                .any(|o| o.id == id && self.filter.matches(o)),
        }
    }

    /// Apply `f` to every copy of the order; false when no copy is loaded
    fn update(&mut self, id: OrderId, mut f: impl FnMut(&mut Order)) -> bool {
        let search_results = self.search.iter_mut().flat_map(|s| s.results.iter_mut());
        let mut found = false;
        for order in self.working_set.iter_mut().chain(search_results) {
            if order.id == id {
                f(order);
                found = true;
            }
        }
        found
    }
}

/// Orders listing view
pub struct OrderListing<B: OrderBackend> {
    backend: Arc<B>,
    state: Arc<Mutex<OrdersState>>,
    sequencer: Arc<SearchSequencer>,
    debouncer: Debouncer,
    page_size: u32,
}

impl<B: OrderBackend> Clone for OrderListing<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            state: Arc::clone(&self.state),
            sequencer: Arc::clone(&self.sequencer),
            debouncer: self.debouncer.clone(),
            page_size: self.page_size,
        }
    }
}

impl<B: OrderBackend> OrderListing<B> {
    /// Create an empty listing; call [`Self::load`] to fetch the first page
    pub fn new(backend: Arc<B>, config: &ClientConfig) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(OrdersState {
                working_set: Vec::new(),
                pagination: Pagination::new(1, config.orders_page_size, 0),
                filter: OrderFilter::All,
                search: None,
                gate: SequenceGate::default(),
            })),
            sequencer: Arc::new(SearchSequencer::new()),
            debouncer: Debouncer::new(config.search_debounce),
            page_size: config.orders_page_size,
        }
    }

    /// Fetch a page and make it the working set
    #[instrument(skip(self))]
    pub async fn load(&self, page: u32) -> Result<(), ClientError> {
        let response = self.backend.list_orders(page, self.page_size).await?;

        let mut state = self.state.lock().await;
        state.working_set = response.data;
        state.pagination = response.pagination;
        Ok(())
    }

    /// Navigate to a page; fetches only when the coordinator says so
    pub async fn go_to_page(&self, page: u32) -> Result<PageDecision, ClientError> {
        let decision = {
            let state = self.state.lock().await;
            PageCoordinator::new(state.pagination).request(page, state.local_mode())
        };

        if let PageDecision::Fetch(page) = decision {
            self.load(page).await?;
        }
        Ok(decision)
    }

    /// Filter the loaded page locally
    pub async fn apply_local_filter(&self, filter: OrderFilter) {
        self.state.lock().await.filter = filter;
    }

    /// Rows the operator currently sees
    pub async fn visible(&self) -> Vec<Order> {
        self.state.lock().await.visible()
    }

    pub async fn pagination(&self) -> Pagination {
        self.state.lock().await.pagination
    }

    pub async fn filter(&self) -> OrderFilter {
        self.state.lock().await.filter
    }

    /// The applied search, if search mode is on
    pub async fn active_search(&self) -> Option<OrderSearch> {
        self.state.lock().await.search.clone()
    }

    /// Whether pagination controls are shown
    pub async fn controls_visible(&self) -> bool {
        let state = self.state.lock().await;
        PageCoordinator::new(state.pagination).controls_visible(state.local_mode())
    }

    /// Search now. Returns whether the response was applied; a response
    /// older than one already applied is dropped. An empty query leaves
    /// search mode.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<bool, ClientError> {
        let seq = self.sequencer.next();
        let query = query.trim();

        if query.is_empty() {
            let mut state = self.state.lock().await;
            let applied = state.gate.admit(seq);
            if applied {
                state.search = None;
            }
            return Ok(applied);
        }

        let response = self.backend.search_orders(query).await?;

        let mut state = self.state.lock().await;
        if !state.gate.admit(seq) {
            debug!(seq, "Dropping stale order search response");
            return Ok(false);
        }
        state.search = Some(OrderSearch {
            query: query.to_string(),
            results: response.data,
            total_count: response.total_count,
            full_text_search_used: response.full_text_search_used,
        });
        Ok(true)
    }

    /// Leave search mode
    pub async fn clear_search(&self) {
        self.debouncer.cancel();
        // An empty query never fails.
        let _ = self.search("").await;
    }

    /// Set a payment status optimistically, then write it to the server.
    ///
    /// The new status is visible as soon as this starts. When the write
    /// fails and the order is still visible under the active filter, the
    /// local edit is reverted, the page refetched and the error returned.
    /// When the order already dropped out of view the failure is only
    /// logged and the optimistic state kept.
    #[instrument(skip(self))]
    pub async fn set_payment_status(&self, id: OrderId, status: &str) -> Result<(), ClientError> {
        let status: PaymentStatus = status.parse().map_err(|_| {
            ClientError::InvalidArgument(format!(
                "invalid payment status '{status}', expected 'pending' or 'paid'"
            ))
        })?;

        let previous = {
            let mut state = self.state.lock().await;
            let mut previous = None;
            let found = state.update(id, |order| {
                previous.get_or_insert(order.payment_status);
                order.payment_status = status;
            });
            if !found {
                return Err(ClientError::NotFound(format!("order {id} is not loaded")));
            }
            previous.unwrap_or(status)
        };

        match self.backend.set_payment_status(id, status).await {
            Ok(updated) => {
                let mut state = self.state.lock().await;
                state.update(id, |order| *order = updated.clone());
                Ok(())
            }
            Err(e) => {
                let (still_visible, page) = {
                    let mut state = self.state.lock().await;
                    let visible = state.is_visible(id);
                    if visible {
                        state.update(id, |order| order.payment_status = previous);
                    }
                    (visible, state.pagination.page)
                };

                if !still_visible {
                    warn!(order_id = %id, error = %e, "Payment status write failed for an order no longer in view");
                    return Ok(());
                }

                if let Err(reload) = self.load(page).await {
                    warn!(error = %reload, "Refetch after failed payment update also failed");
                }
                Err(e)
            }
        }
    }

    /// Start the full analysis, then refetch the current page
    #[instrument(skip(self))]
    pub async fn trigger_full_analysis(&self, id: OrderId) -> Result<(), ClientError> {
        self.backend.start_full_analysis(id).await?;

        let page = self.state.lock().await.pagination.page;
        self.load(page).await
    }
}

impl<B: OrderBackend + 'static> OrderListing<B> {
    /// Search once typing pauses for the configured debounce
    pub fn search_debounced(&self, query: impl Into<String>) {
        let listing = self.clone();
        let query = query.into();
        self.debouncer.schedule(async move {
            if let Err(e) = listing.search(&query).await {
                warn!(error = %e, "Debounced order search failed");
            }
        });
    }
}
