//! Common test utilities for orderdesk-core integration tests

pub mod mock_providers;
pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_providers::{MockAnalysisRunner, MockDirectory, MockRenderer};
#[allow(unused_imports)]
pub use mock_repos::{MockInvoiceRepository, MockOrderRepository, MockProfileRepository};
