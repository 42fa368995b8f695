//! Client configuration

use std::fmt;
use std::time::Duration;

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Admin API base URL
    pub base_url: String,
    /// Bearer token, when the API requires one
    pub token: Option<String>,
    /// Orders per page
    pub orders_page_size: u32,
    /// Users per page
    pub users_page_size: u32,
    /// Quiet period before a debounced search fires
    pub search_debounce: Duration,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            orders_page_size: 15,
            users_page_size: 20,
            search_debounce: Duration::from_millis(300),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set page sizes for orders and users
    pub fn with_page_sizes(mut self, orders: u32, users: u32) -> Self {
        self.orders_page_size = orders;
        self.users_page_size = users;
        self
    }

    /// Set the search debounce
    pub fn with_search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("orders_page_size", &self.orders_page_size)
            .field("users_page_size", &self.users_page_size)
            .field("search_debounce", &self.search_debounce)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.orders_page_size, 15);
        assert_eq!(config.users_page_size, 20);
        assert_eq!(config.search_debounce, Duration::from_millis(300));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("http://localhost").with_token("top-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
