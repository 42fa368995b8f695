//! In-memory backends for the listing views

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as TimeDelta, Utc};
use dashmap::DashMap;
use tokio::sync::Notify;
use uuid::Uuid;

use orderdesk_client::{ClientError, OrderBackend, UserBackend};
use orderdesk_types::api::{
    ChangePasswordResponse, MagicLinkResponse, MagicLinkUser, OrderSearchResponse, PageResponse,
    UserSearchResponse,
};
use orderdesk_types::{AdminUser, Order, OrderId, Pagination, PaymentStatus, UserId};

/// An order created `age_minutes` ago
pub fn test_order(name: &str, age_minutes: i64) -> Order {
    Order {
        id: OrderId(Uuid::new_v4()),
        first_name: Some(name.to_string()),
        last_name: Some("Tester".to_string()),
        company: None,
        company_name: None,
        contact_email: Some(format!("{}@example.com", name.to_lowercase())),
        created_at: Utc::now() - TimeDelta::minutes(age_minutes),
        payment_status: PaymentStatus::Pending,
        quick_status: None,
        full_status: None,
        total_cost_cents: 2000,
        user_id: Some(UserId(Uuid::new_v4())),
        company_registry_code: None,
        company_address: None,
        bill_to: None,
        bill_to_address: None,
    }
}

fn page_of<T: Clone>(items: &[T], page: u32, page_size: u32) -> PageResponse<T> {
    let pagination = Pagination::new(page, page_size, items.len() as u64);
    let data = items
        .iter()
        .skip(pagination.offset() as usize)
        .take(page_size as usize)
        .cloned()
        .collect();
    PageResponse { data, pagination }
}

/// In-memory order backend
#[derive(Default)]
pub struct MockOrderBackend {
    orders: DashMap<OrderId, Order>,
    search_delays: DashMap<String, Duration>,
    pub list_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
    pub analysis_calls: AtomicUsize,
    pub searches: Mutex<Vec<String>>,
    fail_writes: AtomicBool,
    write_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockOrderBackend {
    pub fn with_orders(orders: Vec<Order>) -> Arc<Self> {
        let backend = Self::default();
        for order in orders {
            backend.orders.insert(order.id, order);
        }
        Arc::new(backend)
    }

    #[allow(dead_code)]
    pub fn delay_search(&self, query: &str, delay: Duration) {
        self.search_delays.insert(query.to_string(), delay);
    }

    #[allow(dead_code)]
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Park payment writes until the returned handle is notified
    #[allow(dead_code)]
    pub fn hold_writes(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.write_gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    #[allow(dead_code)]
    pub fn stored_status(&self, id: OrderId) -> Option<PaymentStatus> {
        self.orders.get(&id).map(|o| o.payment_status)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn sorted(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self.orders.iter().map(|o| o.value().clone()).collect();
        orders.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        orders
    }
}

#[async_trait]
impl OrderBackend for MockOrderBackend {
    async fn list_orders(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageResponse<Order>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(page_of(&self.sorted(), page, page_size))
    }

    async fn search_orders(&self, query: &str) -> Result<OrderSearchResponse, ClientError> {
        self.searches.lock().unwrap().push(query.to_string());
        let delay = self.search_delays.get(query).map(|d| *d.value());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let needle = query.to_lowercase();
        let data: Vec<Order> = self
            .sorted()
            .into_iter()
            .filter(|o| {
                o.first_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
            .collect();
        Ok(OrderSearchResponse {
            total_count: data.len() as u64,
            data,
            full_text_search_used: false,
        })
    }

    async fn set_payment_status(
        &self,
        id: OrderId,
        status: PaymentStatus,
    ) -> Result<Order, ClientError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.write_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ClientError::Server {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }

        let mut order = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| ClientError::NotFound("Order not found".to_string()))?;
        order.payment_status = status;
        Ok(order.clone())
    }

    async fn start_full_analysis(&self, id: OrderId) -> Result<(), ClientError> {
        self.analysis_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(mut order) = self.orders.get_mut(&id) {
            order.full_status = Some("Processing".to_string());
        }
        Ok(())
    }
}

/// In-memory user backend
#[derive(Default)]
pub struct MockUserBackend {
    users: Mutex<Vec<AdminUser>>,
    pub list_calls: AtomicUsize,
    pub password_calls: AtomicUsize,
}

impl MockUserBackend {
    pub fn with_users(count: usize) -> Arc<Self> {
        let users = (0..count)
            .map(|n| AdminUser {
                id: UserId(Uuid::new_v4()),
                email: Some(format!("user{n}@example.com")),
                created_at: Utc::now(),
                last_sign_in_at: None,
                email_confirmed_at: None,
                phone: None,
                first_name: format!("First{n}"),
                last_name: String::new(),
                profile_created_at: None,
                user_metadata: serde_json::Value::Null,
                app_metadata: serde_json::Value::Null,
            })
            .collect();
        Arc::new(Self {
            users: Mutex::new(users),
            ..Self::default()
        })
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserBackend for MockUserBackend {
    async fn list_users(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageResponse<AdminUser>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(page_of(&self.users.lock().unwrap(), page, page_size))
    }

    async fn search_users(&self, query: &str) -> Result<UserSearchResponse, ClientError> {
        let needle = query.to_lowercase();
        let data: Vec<AdminUser> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| {
                u.email
                    .as_deref()
                    .is_some_and(|e| e.contains(&needle))
            })
            .cloned()
            .collect();
        Ok(UserSearchResponse {
            total_count: data.len() as u64,
            data,
            query: needle,
        })
    }

    async fn change_password(
        &self,
        id: UserId,
        _password: &str,
    ) -> Result<ChangePasswordResponse, ClientError> {
        self.password_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ChangePasswordResponse {
            message: "Password updated successfully".to_string(),
            user_id: id,
        })
    }

    async fn generate_magic_link(
        &self,
        id: UserId,
        email: &str,
    ) -> Result<MagicLinkResponse, ClientError> {
        Ok(MagicLinkResponse {
            magic_link: "https://auth.example.com/verify?token=t".to_string(),
            user: MagicLinkUser {
                id,
                email: email.to_string(),
            },
        })
    }
}
