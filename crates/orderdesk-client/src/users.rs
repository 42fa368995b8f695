//! Users listing view

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use orderdesk_types::api::{ChangePasswordResponse, MagicLinkResponse};
use orderdesk_types::{AdminUser, Pagination, UserId};

use crate::backend::UserBackend;
use crate::pagination::{PageCoordinator, PageDecision};
use crate::search::{Debouncer, SearchSequencer, SequenceGate};
use crate::{ClientConfig, ClientError};

/// Shortest password the server accepts
pub const MIN_PASSWORD_LEN: usize = 6;

/// Applied user search results
#[derive(Debug, Clone, PartialEq)]
pub struct UserSearch {
    pub query: String,
    pub results: Vec<AdminUser>,
    pub total_count: u64,
}

#[derive(Debug)]
struct UsersState {
    working_set: Vec<AdminUser>,
    pagination: Pagination,
    search: Option<UserSearch>,
    gate: SequenceGate,
}

/// Users listing view
pub struct UserListing<B: UserBackend> {
    backend: Arc<B>,
    state: Arc<Mutex<UsersState>>,
    sequencer: Arc<SearchSequencer>,
    debouncer: Debouncer,
    page_size: u32,
}

impl<B: UserBackend> Clone for UserListing<B> {
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

impl<B: UserBackend> UserListing<B> {
    pub fn new(backend: Arc<B>, config: &ClientConfig) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(UsersState {
                working_set: Vec::new(),
                pagination: Pagination::new(1, config.users_page_size, 0),
                search: None,
                gate: SequenceGate::default(),
            })),
            sequencer: Arc::new(SearchSequencer::new()),
            debouncer: Debouncer::new(config.search_debounce),
            page_size: config.users_page_size,
        }
    }

    /// Fetch a page and make it the working set
    #[instrument(skip(self))]
    pub async fn load(&self, page: u32) -> Result<(), ClientError> {
        let response = self.backend.list_users(page, self.page_size).await?;

        let mut state = self.state.lock().await;
        state.working_set = response.data;
        state.pagination = response.pagination;
        Ok(())
    }

    /// Navigate to a page; nothing is fetched while searching
    pub async fn go_to_page(&self, page: u32) -> Result<PageDecision, ClientError> {
        let decision = {
            let state = self.state.lock().await;
            PageCoordinator::new(state.pagination).request(page, state.search.is_some())
        };

        if let PageDecision::Fetch(page) = decision {
            self.load(page).await?;
        }
        Ok(decision)
    }

    /// Search results while searching, else the loaded page
    pub async fn visible(&self) -> Vec<AdminUser> {
        let state = self.state.lock().await;
        match &state.search {
            Some(search) => search.results.clone(),
            None => state.working_set.clone(),
        }
    }

    pub async fn pagination(&self) -> Pagination {
        self.state.lock().await.pagination
    }

    pub async fn active_search(&self) -> Option<UserSearch> {
        self.state.lock().await.search.clone()
    }

    /// Search now; see [`crate::OrderListing::search`] for the sequencing rules
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

        let response = self.backend.search_users(query).await?;

        let mut state = self.state.lock().await;
        if !state.gate.admit(seq) {
            debug!(seq, "Dropping stale user search response");
            return Ok(false);
        }
        state.search = Some(UserSearch {
            query: response.query,
            results: response.data,
            total_count: response.total_count,
        });
        Ok(true)
    }

    /// Set a new password; too-short passwords never leave the client
    #[instrument(skip(self, password))]
    pub async fn reset_password(
        &self,
        id: UserId,
        password: &str,
    ) -> Result<ChangePasswordResponse, ClientError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::InvalidArgument(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        self.backend.change_password(id, password).await
    }

    /// Issue a one-time sign-in link
    #[instrument(skip(self))]
    pub async fn issue_magic_link(
        &self,
        id: UserId,
        email: &str,
    ) -> Result<MagicLinkResponse, ClientError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ClientError::InvalidArgument("email is required".to_string()));
        }
        self.backend.generate_magic_link(id, email).await
    }
}

impl<B: UserBackend + 'static> UserListing<B> {
    /// Search once typing pauses for the configured debounce
    pub fn search_debounced(&self, query: impl Into<String>) {
        let listing = self.clone();
        let query = query.into();
        self.debouncer.schedule(async move {
            if let Err(e) = listing.search(&query).await {
                warn!(error = %e, "Debounced user search failed");
            }
        });
    }
}
