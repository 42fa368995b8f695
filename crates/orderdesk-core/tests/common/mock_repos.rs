//! Mock repositories for testing

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use orderdesk_db::{
    CreateInvoice, DbError, DbResult, InvoiceRepository, InvoiceRow, OrderRepository, OrderRow,
    ProfileRepository, ProfileRow,
};
use orderdesk_types::{DateWindow, OrderCount, TextMatch};

fn contains(field: &Option<String>, needle: &str) -> bool {
    field
        .as_deref()
        .is_some_and(|v| v.to_lowercase().contains(needle))
}

fn newest_first<T>(mut rows: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    rows.sort_by_key(|r| std::cmp::Reverse(created_at(r)));
    rows
}

/// In-memory order repository for testing
#[derive(Default, Clone)]
pub struct MockOrderRepository {
    orders: Arc<DashMap<Uuid, OrderRow>>,
    details: Arc<DashMap<Uuid, String>>,
    fail_full_text: Arc<AtomicBool>,
}

impl MockOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test order directly
    pub fn insert_order(&self, order: OrderRow) {
        self.orders.insert(order.id, order);
    }

    /// Set the text indexed for full-text search
    #[allow(dead_code)]
    pub fn set_company_details(&self, id: Uuid, details: &str) {
        self.details.insert(id, details.to_lowercase());
    }

    /// Make every full-text query fail
    #[allow(dead_code)]
    pub fn fail_full_text(&self) {
        self.fail_full_text.store(true, Ordering::SeqCst);
    }

    #[allow(dead_code)]
    pub fn get(&self, id: Uuid) -> Option<OrderRow> {
        self.orders.get(&id).map(|r| r.value().clone())
    }

    /// Create a test order
    #[allow(dead_code)]
    pub fn create_test_order(first_name: &str, created_at: DateTime<Utc>) -> OrderRow {
        OrderRow {
            id: Uuid::new_v4(),
            first_name: Some(first_name.to_string()),
            last_name: Some("Tester".to_string()),
            company: None,
            company_name: Some(format!("{first_name} OÜ")),
            contact_email: Some(format!("{}@example.com", first_name.to_lowercase())),
            created_at,
            payment_status: "pending".to_string(),
            quick_status: None,
            full_status: None,
            total_cost_cents: 2000,
            user_id: Some(Uuid::new_v4()),
            company_registry_code: None,
            company_address: None,
            bill_to: None,
            bill_to_address: None,
        }
    }

    fn matching(&self, text: &TextMatch) -> Vec<OrderRow> {
        let rows: Vec<OrderRow> = self
            .orders
            .iter()
            .filter(|r| {
                let row = r.value();
                match text {
                    TextMatch::IdPrefix(prefix) => row.id.to_string().starts_with(prefix.as_str()),
                    TextMatch::AnyFieldContains(needle) => {
                        contains(&row.first_name, needle)
                            || contains(&row.last_name, needle)
                            || contains(&row.company, needle)
                            || contains(&row.company_name, needle)
                            || contains(&row.contact_email, needle)
                    }
                }
            })
            .map(|r| r.value().clone())
            .collect();
        newest_first(rows, |r: &OrderRow| r.created_at)
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<OrderRow>> {
        Ok(self.get(id))
    }

    async fn count_all(&self) -> DbResult<i64> {
        Ok(self.orders.len() as i64)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> DbResult<Vec<OrderRow>> {
        let rows: Vec<OrderRow> = self.orders.iter().map(|r| r.value().clone()).collect();
        Ok(newest_first(rows, |r: &OrderRow| r.created_at)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_matching(&self, text: &TextMatch) -> DbResult<i64> {
        Ok(self.matching(text).len() as i64)
    }

    async fn search(&self, text: &TextMatch, limit: i64) -> DbResult<Vec<OrderRow>> {
        Ok(self.matching(text).into_iter().take(limit as usize).collect())
    }

    async fn full_text_search(&self, query: &str, limit: i64) -> DbResult<Vec<OrderRow>> {
        if self.fail_full_text.load(Ordering::SeqCst) {
            return Err(DbError::CorruptRow("full-text index unavailable".to_string()));
        }
        let rows: Vec<OrderRow> = self
            .details
            .iter()
            .filter(|d| d.value().contains(query))
            .filter_map(|d| self.get(*d.key()))
            .collect();
        Ok(newest_first(rows, |r: &OrderRow| r.created_at)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn update_payment_status(&self, id: Uuid, status: &str) -> DbResult<Option<OrderRow>> {
        Ok(self.orders.get_mut(&id).map(|mut order| {
            order.payment_status = status.to_string();
            order.clone()
        }))
    }

    async fn count_for_statistics(
        &self,
        which: OrderCount,
        window: &DateWindow,
    ) -> DbResult<i64> {
        let count = self
            .orders
            .iter()
            .filter(|r| window.contains(r.created_at))
            .filter(|r| match which {
                OrderCount::Paid => r.payment_status == "paid",
                OrderCount::QuickAnalysisDone => r.quick_status.as_deref() == Some("Done"),
                OrderCount::FullAnalysisDone => r.full_status.as_deref() == Some("Done"),
            })
            .count();
        Ok(count as i64)
    }
}

/// In-memory profile repository for testing
#[derive(Default, Clone)]
pub struct MockProfileRepository {
    profiles: Arc<DashMap<Uuid, ProfileRow>>,
    fail_lookups: Arc<AtomicBool>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn insert_profile(&self, id: Uuid, first: &str, last: &str, created_at: DateTime<Utc>) {
        self.profiles.insert(
            id,
            ProfileRow {
                id,
                email: None,
                first_name: Some(first.to_string()),
                last_name: Some(last.to_string()),
                created_at,
            },
        );
    }

    /// Make every lookup fail
    #[allow(dead_code)]
    pub fn fail_lookups(&self) {
        self.fail_lookups.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> DbResult<()> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(DbError::CorruptRow("profiles unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> DbResult<Vec<ProfileRow>> {
        self.check()?;
        Ok(ids
            .iter()
            .filter_map(|id| self.profiles.get(id).map(|r| r.value().clone()))
            .collect())
    }

    async fn search(&self, needle: &str) -> DbResult<Vec<ProfileRow>> {
        self.check()?;
        Ok(self
            .profiles
            .iter()
            .filter(|r| {
                contains(&r.first_name, needle)
                    || contains(&r.last_name, needle)
                    || contains(&r.email, needle)
            })
            .map(|r| r.value().clone())
            .collect())
    }

    async fn count_created(&self, window: &DateWindow) -> DbResult<i64> {
        self.check()?;
        Ok(self
            .profiles
            .iter()
            .filter(|r| window.contains(r.created_at))
            .count() as i64)
    }
}

/// In-memory invoice repository for testing, unique per order
#[derive(Default, Clone)]
pub struct MockInvoiceRepository {
    by_order: Arc<DashMap<Uuid, InvoiceRow>>,
}

impl MockInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.by_order.len()
    }
}

#[async_trait]
impl InvoiceRepository for MockInvoiceRepository {
    async fn find_by_order_id(&self, order_id: Uuid) -> DbResult<Option<InvoiceRow>> {
        Ok(self.by_order.get(&order_id).map(|r| r.value().clone()))
    }

    async fn create_or_get(&self, invoice: CreateInvoice) -> DbResult<InvoiceRow> {
        let row = self
            .by_order
            .entry(invoice.order_id)
            .or_insert_with(|| InvoiceRow {
                id: invoice.id,
                order_id: invoice.order_id,
                user_id: invoice.user_id,
                invoice_number: invoice.invoice_number.clone(),
                invoice_date: invoice.invoice_date,
                due_date: invoice.due_date,
                subtotal_cents: invoice.subtotal_cents,
                vat_rate: invoice.vat_rate,
                vat_amount_cents: invoice.vat_amount_cents,
                amount_cents: invoice.amount_cents,
                currency: invoice.currency.clone(),
                status: invoice.status.clone(),
                customer_name: invoice.customer_name.clone(),
                customer_email: invoice.customer_email.clone(),
                company_name: invoice.company_name.clone(),
                company_registry_code: invoice.company_registry_code.clone(),
                company_address: invoice.company_address.clone(),
                bill_to: invoice.bill_to.clone(),
                bill_to_address: invoice.bill_to_address.clone(),
                service_description: invoice.service_description.clone(),
                order_reference: invoice.order_reference.clone(),
                orderer_first_name: invoice.orderer_first_name.clone(),
                orderer_last_name: invoice.orderer_last_name.clone(),
                orderer_email: invoice.orderer_email.clone(),
                orderer_company: invoice.orderer_company.clone(),
                created_at: Utc::now(),
            })
            .value()
            .clone();
        Ok(row)
    }
}
