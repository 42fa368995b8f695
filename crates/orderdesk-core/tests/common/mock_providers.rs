//! In-memory doubles for the external services

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use orderdesk_core::{AnalysisRunner, AuthDirectory, CoreError, InvoiceRenderer};
use orderdesk_types::{DirectoryUser, InvoiceId, OrderId, UserId};

/// Directory backed by a fixed list of users
#[derive(Default)]
pub struct MockDirectory {
    users: Vec<DirectoryUser>,
    pub list_calls: AtomicUsize,
    pub password_updates: Mutex<Vec<(UserId, String)>>,
    pub magic_links: Mutex<Vec<String>>,
}

impl MockDirectory {
    pub fn with_users(users: Vec<DirectoryUser>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    /// `count` users with predictable emails (`user<N>@example.com`)
    #[allow(dead_code)]
    pub fn generate(count: usize) -> Self {
        Self::with_users((0..count).map(|n| test_user(&format!("user{n}@example.com"))).collect())
    }

    #[allow(dead_code)]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

/// A confirmed directory user with the given email
pub fn test_user(email: &str) -> DirectoryUser {
    DirectoryUser {
        id: UserId(Uuid::new_v4()),
        email: Some(email.to_string()),
        created_at: Utc::now(),
        last_sign_in_at: None,
        email_confirmed_at: Some(Utc::now()),
        phone: None,
        user_metadata: serde_json::Value::Null,
        app_metadata: serde_json::Value::Null,
    }
}

#[async_trait]
impl AuthDirectory for MockDirectory {
    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<DirectoryUser>, CoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let start = (page as usize - 1) * per_page as usize;
        Ok(self
            .users
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<DirectoryUser>, CoreError> {
        Ok(self.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn update_password(&self, id: &UserId, password: &str) -> Result<(), CoreError> {
        self.password_updates
            .lock()
            .unwrap()
            .push((*id, password.to_string()));
        Ok(())
    }

    async fn generate_magic_link(&self, email: &str) -> Result<String, CoreError> {
        self.magic_links.lock().unwrap().push(email.to_string());
        Ok(format!("https://auth.example.com/verify?token=abc&email={email}"))
    }
}

/// Records analysis start requests
#[derive(Default)]
pub struct MockAnalysisRunner {
    pub started: Mutex<Vec<(OrderId, UserId)>>,
}

#[async_trait]
impl AnalysisRunner for MockAnalysisRunner {
    async fn start_full_analysis(
        &self,
        order_id: &OrderId,
        user_id: &UserId,
    ) -> Result<(), CoreError> {
        self.started.lock().unwrap().push((*order_id, *user_id));
        Ok(())
    }
}

/// Renderer returning a fixed body, or a fixed failure status
#[derive(Default)]
pub struct MockRenderer {
    pub fail_with: Option<u16>,
}

#[async_trait]
impl InvoiceRenderer for MockRenderer {
    async fn render(&self, _invoice_id: &InvoiceId) -> Result<Vec<u8>, CoreError> {
        match self.fail_with {
            Some(status) => Err(CoreError::Renderer {
                status,
                message: "layout failed".to_string(),
            }),
            None => Ok(b"%PDF-1.7 test".to_vec()),
        }
    }
}

#[allow(dead_code)]
pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
