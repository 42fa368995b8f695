//! Invoice types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{OrderId, UserId};

/// Invoice ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub Uuid);

impl InvoiceId {
    /// Create a new invoice ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an invoice ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Suggested PDF filename for this invoice
    pub fn pdf_filename(&self) -> String {
        let prefix: String = self.0.to_string().chars().take(8).collect();
        format!("invoice-{prefix}.pdf")
    }
}

impl Default for InvoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Billing document derived from exactly one order.
///
/// Amount and customer fields are snapshots taken when the invoice was
/// created and are never recomputed. Amounts are held in cents and sent
/// on the wire in currency units (`subtotal`, `vat_amount`, `amount`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub order_id: OrderId,
    pub user_id: Option<UserId>,
    pub invoice_number: String,
    pub invoice_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(rename = "subtotal", with = "currency_units")]
    pub subtotal_cents: i64,
    /// VAT rate in percent
    pub vat_rate: i32,
    #[serde(rename = "vat_amount", with = "currency_units")]
    pub vat_amount_cents: i64,
    #[serde(rename = "amount", with = "currency_units")]
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub company_name: Option<String>,
    pub company_registry_code: Option<String>,
    pub company_address: Option<String>,
    pub bill_to: String,
    pub bill_to_address: Option<String>,
    pub service_description: String,
    pub order_reference: String,
    pub orderer_first_name: Option<String>,
    pub orderer_last_name: Option<String>,
    pub orderer_email: Option<String>,
    pub orderer_company: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Cents on the wire as a decimal amount (`2400` <-> `24.0`)
mod currency_units {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let units = f64::deserialize(deserializer)?;
        Ok((units * 100.0).round() as i64)
    }
}
