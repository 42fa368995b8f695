//! HTTP clients for the analysis service and the PDF renderer

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, error, instrument};

use orderdesk_types::{InvoiceId, OrderId, UserId};

use crate::config::DeskConfig;
use crate::error::CoreError;
use crate::provider::{AnalysisRunner, InvoiceRenderer};

/// Pull a human-readable message out of an error body.
///
/// Understands the `error`, `msg`, `message` and `error_description`
/// fields used by the services we talk to; falls back to the raw body.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let field = parsed.as_ref().and_then(|value| {
        ["error", "msg", "message", "error_description"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(str::to_string)
    });

    field.or_else(|| {
        let trimmed = body.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Map a transport failure
fn transport_error(service: &str, e: reqwest::Error) -> CoreError {
    error!(service, error = %e, "request failed");
    CoreError::Upstream(format!("{service} request failed"))
}

/// Read a non-success response into an upstream error
async fn upstream_error(service: &str, response: Response) -> CoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error!(service, status = %status, body = %body, "service returned an error");

    CoreError::Upstream(
        error_message(&body).unwrap_or_else(|| format!("{service} returned {status}")),
    )
}

#[derive(Serialize)]
struct StartAnalysisRequest<'a> {
    order_id: &'a OrderId,
    user_id: &'a UserId,
}

/// Analysis service client
#[derive(Clone)]
pub struct HttpAnalysisRunner {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpAnalysisRunner {
    pub fn new(config: &DeskConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.analysis_service_url.clone(),
            token: config.analysis_service_token.clone(),
        }
    }
}

#[async_trait]
impl AnalysisRunner for HttpAnalysisRunner {
    #[instrument(skip(self))]
    async fn start_full_analysis(
        &self,
        order_id: &OrderId,
        user_id: &UserId,
    ) -> Result<(), CoreError> {
        debug!("Starting full analysis");

        let response = self
            .client
            .post(format!("{}/final-match-start", self.base_url))
            .bearer_auth(&self.token)
            .json(&StartAnalysisRequest { order_id, user_id })
            .send()
            .await
            .map_err(|e| transport_error("analysis service", e))?;

        if !response.status().is_success() {
            return Err(upstream_error("analysis service", response).await);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct RenderRequest<'a> {
    id: &'a InvoiceId,
}

/// PDF renderer client
#[derive(Clone)]
pub struct HttpInvoiceRenderer {
    client: Client,
    base_url: String,
}

impl HttpInvoiceRenderer {
    pub fn new(config: &DeskConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.pdf_renderer_url.clone(),
        }
    }
}

#[async_trait]
impl InvoiceRenderer for HttpInvoiceRenderer {
    #[instrument(skip(self))]
    async fn render(&self, invoice_id: &InvoiceId) -> Result<Vec<u8>, CoreError> {
        debug!("Rendering invoice PDF");

        let response = self
            .client
            .post(format!("{}/generate-invoice-pdf", self.base_url))
            .json(&RenderRequest { id: invoice_id })
            .send()
            .await
            .map_err(|e| transport_error("PDF renderer", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "PDF renderer returned an error");
            return Err(CoreError::Renderer {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read PDF body");
            CoreError::Internal(e.to_string())
        })?;

        Ok(bytes.to_vec())
    }
}
