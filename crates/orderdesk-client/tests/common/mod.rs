//! Common test utilities for orderdesk-client integration tests

pub mod mock_backend;

#[allow(unused_imports)]
pub use mock_backend::{test_order, MockOrderBackend, MockUserBackend};
