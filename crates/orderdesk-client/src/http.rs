//! HTTP client for the admin API

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use orderdesk_types::api::{
    ChangePasswordRequest, ChangePasswordResponse, CreateInvoiceRequest, ErrorBody,
    MagicLinkRequest, MagicLinkResponse, MessageResponse, OrderSearchResponse, PageResponse,
    PaymentStatusRequest, PaymentStatusResponse, RenderInvoiceRequest, UserSearchResponse,
};
use orderdesk_types::{
    AdminUser, Invoice, InvoiceId, Order, OrderId, PaymentStatus, PeriodToken,
    StatisticsSnapshot, UserId,
};

use crate::backend::{OrderBackend, UserBackend};
use crate::{ClientConfig, ClientError};

/// Admin API client
#[derive(Clone)]
pub struct AdminClient {
    client: Client,
    config: ClientConfig,
}

impl AdminClient {
    /// Create a new admin client
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, format!("{}{endpoint}", self.config.base_url));
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and check the status, mapping `{error}` bodies
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        debug!(status = %status, message = %message, "Admin API error");
        Err(ClientError::from_status(status, message))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Dashboard statistics for a preset period
    #[instrument(skip(self))]
    pub async fn statistics(&self, period: PeriodToken) -> Result<StatisticsSnapshot, ClientError> {
        self.send_json(
            self.request(Method::GET, "/api/statistics")
                .query(&[("period", period.as_str())]),
        )
        .await
    }

    /// Dashboard statistics for an explicit RFC 3339 range
    #[instrument(skip(self))]
    pub async fn statistics_between(
        &self,
        from: &str,
        to: &str,
    ) -> Result<StatisticsSnapshot, ClientError> {
        self.send_json(
            self.request(Method::GET, "/api/statistics")
                .query(&[("from", from), ("to", to)]),
        )
        .await
    }

    /// Fetch or create the invoice of an order
    #[instrument(skip(self))]
    pub async fn create_invoice(
        &self,
        order_id: OrderId,
        customer_name: Option<&str>,
        company_name: Option<&str>,
    ) -> Result<Invoice, ClientError> {
        let body = CreateInvoiceRequest {
            order_id: Some(order_id.to_string()),
            customer_name: customer_name.map(str::to_string),
            company_name: company_name.map(str::to_string),
        };
        self.send_json(self.request(Method::POST, "/api/create-invoice").json(&body))
            .await
    }

    /// Render an invoice, returning the PDF bytes
    #[instrument(skip(self))]
    pub async fn invoice_pdf(&self, id: InvoiceId) -> Result<Vec<u8>, ClientError> {
        let body = RenderInvoiceRequest {
            id: Some(id.to_string()),
        };
        let response = self
            .send(self.request(Method::POST, "/api/generate-invoice-pdf").json(&body))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl OrderBackend for AdminClient {
    #[instrument(skip(self))]
    async fn list_orders(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageResponse<Order>, ClientError> {
        self.send_json(
            self.request(Method::GET, "/api/orders")
                .query(&[("page", page), ("pageSize", page_size)]),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn search_orders(&self, query: &str) -> Result<OrderSearchResponse, ClientError> {
        self.send_json(
            self.request(Method::GET, "/api/orders/search")
                .query(&[("query", query)]),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn set_payment_status(
        &self,
        id: OrderId,
        status: PaymentStatus,
    ) -> Result<Order, ClientError> {
        let body = PaymentStatusRequest {
            status: Some(status.to_string()),
        };
        let response: PaymentStatusResponse = self
            .send_json(
                self.request(Method::PATCH, &format!("/api/orders/{id}/payment-status"))
                    .json(&body),
            )
            .await?;
        Ok(response.data)
    }

    #[instrument(skip(self))]
    async fn start_full_analysis(&self, id: OrderId) -> Result<(), ClientError> {
        let _: MessageResponse = self
            .send_json(self.request(Method::POST, &format!("/api/orders/{id}/full-analysis")))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserBackend for AdminClient {
    #[instrument(skip(self))]
    async fn list_users(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageResponse<AdminUser>, ClientError> {
        self.send_json(
            self.request(Method::GET, "/api/users")
                .query(&[("page", page), ("pageSize", page_size)]),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn search_users(&self, query: &str) -> Result<UserSearchResponse, ClientError> {
        self.send_json(
            self.request(Method::GET, "/api/users/search")
                .query(&[("query", query)]),
        )
        .await
    }

    #[instrument(skip(self, password))]
    async fn change_password(
        &self,
        id: UserId,
        password: &str,
    ) -> Result<ChangePasswordResponse, ClientError> {
        let body = ChangePasswordRequest {
            password: Some(password.to_string()),
        };
        self.send_json(
            self.request(Method::PATCH, &format!("/api/users/{id}/change-password"))
                .json(&body),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn generate_magic_link(
        &self,
        id: UserId,
        email: &str,
    ) -> Result<MagicLinkResponse, ClientError> {
        let body = MagicLinkRequest {
            email: Some(email.to_string()),
        };
        self.send_json(
            self.request(Method::POST, &format!("/api/users/{id}/generate-magic-link"))
                .json(&body),
        )
        .await
    }
}
