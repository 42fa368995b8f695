//! Core configuration

use std::fmt;

/// Pricing applied to every generated invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicePricing {
    /// Flat net price in cents
    pub subtotal_cents: i64,
    /// VAT rate in percent
    pub vat_rate: i32,
    /// ISO currency code
    pub currency: String,
    /// Days between invoice date and due date
    pub payment_terms_days: i64,
    /// Line item text
    pub service_description: String,
}

impl Default for InvoicePricing {
    fn default() -> Self {
        Self {
            subtotal_cents: 2000,
            vat_rate: 20,
            currency: "EUR".to_string(),
            payment_terms_days: 14,
            service_description: "Company background analysis".to_string(),
        }
    }
}

impl InvoicePricing {
    /// VAT on the subtotal, rounded half up to whole cents
    pub fn vat_amount_cents(&self) -> i64 {
        (self.subtotal_cents * i64::from(self.vat_rate) + 50) / 100
    }

    /// Subtotal plus VAT
    pub fn total_cents(&self) -> i64 {
        self.subtotal_cents + self.vat_amount_cents()
    }
}

/// Configuration for the back-office services and their external providers
#[derive(Clone)]
pub struct DeskConfig {
    /// GoTrue base URL (e.g. https://project.supabase.co)
    pub auth_url: String,
    /// Service role key sent to the auth admin API
    pub auth_service_role_key: String,
    /// Analysis service base URL
    pub analysis_service_url: String,
    /// Bearer token for the analysis service
    pub analysis_service_token: String,
    /// PDF renderer base URL
    pub pdf_renderer_url: String,
    /// Upper bound on directory pages read per drain
    pub max_directory_pages: u32,
    pub pricing: InvoicePricing,
}

impl DeskConfig {
    /// Create a new config with default pricing and drain bound
    pub fn new(
        auth_url: impl Into<String>,
        auth_service_role_key: impl Into<String>,
        analysis_service_url: impl Into<String>,
        analysis_service_token: impl Into<String>,
        pdf_renderer_url: impl Into<String>,
    ) -> Self {
        Self {
            auth_url: trim_base(auth_url.into()),
            auth_service_role_key: auth_service_role_key.into(),
            analysis_service_url: trim_base(analysis_service_url.into()),
            analysis_service_token: analysis_service_token.into(),
            pdf_renderer_url: trim_base(pdf_renderer_url.into()),
            max_directory_pages: 50,
            pricing: InvoicePricing::default(),
        }
    }

    /// Set the directory drain bound
    pub fn with_max_directory_pages(mut self, pages: u32) -> Self {
        self.max_directory_pages = pages;
        self
    }

    /// Set invoice pricing
    pub fn with_pricing(mut self, pricing: InvoicePricing) -> Self {
        self.pricing = pricing;
        self
    }
}

impl fmt::Debug for DeskConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeskConfig")
            .field("auth_url", &self.auth_url)
            .field("auth_service_role_key", &"[REDACTED]")
            .field("analysis_service_url", &self.analysis_service_url)
            .field("analysis_service_token", &"[REDACTED]")
            .field("pdf_renderer_url", &self.pdf_renderer_url)
            .field("max_directory_pages", &self.max_directory_pages)
            .field("pricing", &self.pricing)
            .finish()
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
