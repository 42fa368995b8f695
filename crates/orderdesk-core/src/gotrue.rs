//! GoTrue admin API client
//!
//! Talks to the `/auth/v1/admin` endpoints of a GoTrue-compatible managed
//! authentication service using the service role key.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, instrument};

use orderdesk_types::{DirectoryUser, UserId};

use crate::config::DeskConfig;
use crate::error::CoreError;
use crate::external::error_message;
use crate::provider::AuthDirectory;

/// GoTrue admin client
#[derive(Clone)]
pub struct GoTrueDirectory {
    client: Client,
    base_url: String,
    service_role_key: String,
}

#[derive(Deserialize)]
struct UserList {
    #[serde(default)]
    users: Vec<DirectoryUser>,
}

#[derive(Serialize)]
struct PasswordUpdate<'a> {
    password: &'a str,
}

#[derive(Serialize)]
struct GenerateLink<'a> {
    #[serde(rename = "type")]
    link_type: &'static str,
    email: &'a str,
}

#[derive(Deserialize)]
struct GeneratedLink {
    action_link: Option<String>,
    properties: Option<LinkProperties>,
}

#[derive(Deserialize)]
struct LinkProperties {
    action_link: Option<String>,
}

impl GeneratedLink {
    fn into_action_link(self) -> Option<String> {
        self.action_link
            .or_else(|| self.properties.and_then(|p| p.action_link))
            .filter(|link| !link.is_empty())
    }
}

impl GoTrueDirectory {
    /// Create a new directory client
    pub fn new(config: &DeskConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.auth_url.clone(),
            service_role_key: config.auth_service_role_key.clone(),
        }
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/auth/v1/admin{endpoint}", self.base_url))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, CoreError> {
        request.send().await.map_err(|e| {
            error!(error = %e, "Auth admin request failed");
            CoreError::Upstream("auth service request failed".to_string())
        })
    }

    /// Send an admin request; any non-success status is an upstream error
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CoreError> {
        let response = self.execute(request).await?;
        parse(response).await
    }

    /// Send a request addressing one user; `Ok(None)` when it does not exist
    async fn send_for_user<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, CoreError> {
        let response = self.execute(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        parse(response).await.map(Some)
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, CoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Auth admin API error");
        return Err(CoreError::Upstream(
            error_message(&body).unwrap_or_else(|| format!("auth service returned {status}")),
        ));
    }

    response.json::<T>().await.map_err(|e| {
        error!(error = %e, "Failed to parse auth admin response");
        CoreError::Internal(e.to_string())
    })
}

#[async_trait]
impl AuthDirectory for GoTrueDirectory {
    #[instrument(skip(self))]
    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<DirectoryUser>, CoreError> {
        debug!("Listing directory users");

        let request = self
            .request(Method::GET, "/users")
            .query(&[("page", page), ("per_page", per_page)]);

        let list: UserList = self.send(request).await?;
        Ok(list.users)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: &UserId) -> Result<Option<DirectoryUser>, CoreError> {
        debug!("Getting directory user");

        self.send_for_user(self.request(Method::GET, &format!("/users/{id}")))
            .await
    }

    #[instrument(skip(self, password))]
    async fn update_password(&self, id: &UserId, password: &str) -> Result<(), CoreError> {
        debug!("Updating user password");

        let request = self
            .request(Method::PUT, &format!("/users/{id}"))
            .json(&PasswordUpdate { password });

        let updated: Option<serde_json::Value> = self.send_for_user(request).await?;
        updated
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))
    }

    #[instrument(skip(self))]
    async fn generate_magic_link(&self, email: &str) -> Result<String, CoreError> {
        debug!("Generating magic link");

        let request = self
            .request(Method::POST, "/generate_link")
            .json(&GenerateLink {
                link_type: "magiclink",
                email,
            });

        let generated: GeneratedLink = self.send(request).await?;
        generated
            .into_action_link()
            .ok_or_else(|| CoreError::Upstream("Failed to generate magic link".to_string()))
    }
}
