//! Backend abstraction for the listing views
//!
//! [`crate::AdminClient`] implements both traits over HTTP; tests plug in
//! in-memory backends.

use async_trait::async_trait;

use orderdesk_types::api::{
    ChangePasswordResponse, MagicLinkResponse, OrderSearchResponse, PageResponse,
    UserSearchResponse,
};
use orderdesk_types::{AdminUser, Order, OrderId, PaymentStatus, UserId};

use crate::ClientError;

/// Order operations used by [`crate::OrderListing`]
#[async_trait]
pub trait OrderBackend: Send + Sync {
    async fn list_orders(&self, page: u32, page_size: u32)
        -> Result<PageResponse<Order>, ClientError>;

    async fn search_orders(&self, query: &str) -> Result<OrderSearchResponse, ClientError>;

    async fn set_payment_status(
        &self,
        id: OrderId,
        status: PaymentStatus,
    ) -> Result<Order, ClientError>;

    async fn start_full_analysis(&self, id: OrderId) -> Result<(), ClientError>;
}

/// User operations used by [`crate::UserListing`]
#[async_trait]
pub trait UserBackend: Send + Sync {
    async fn list_users(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageResponse<AdminUser>, ClientError>;

    async fn search_users(&self, query: &str) -> Result<UserSearchResponse, ClientError>;

    async fn change_password(
        &self,
        id: UserId,
        password: &str,
    ) -> Result<ChangePasswordResponse, ClientError>;

    async fn generate_magic_link(
        &self,
        id: UserId,
        email: &str,
    ) -> Result<MagicLinkResponse, ClientError>;
}
