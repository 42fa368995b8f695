//! User listing, search and account actions
//!
//! Users live in the authentication provider's directory; names come from
//! the `profiles` table. The directory has no server-side search, so every
//! listing drains it page by page and works on the result.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::stream::{self, Stream, TryStreamExt};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use orderdesk_db::ProfileRepository;
use orderdesk_types::api::{
    ChangePasswordResponse, MagicLinkResponse, MagicLinkUser, PageResponse, UserSearchResponse,
};
use orderdesk_types::{AdminUser, DirectoryUser, Pagination, Profile, UserId};

use crate::provider::AuthDirectory;
use crate::query::SearchQuery;
use crate::{validate_page, CoreError};

/// Users requested per directory page
pub const DIRECTORY_PAGE_SIZE: u32 = 1000;

/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 6;

/// User service
pub struct UserService<P: ProfileRepository> {
    profiles: Arc<P>,
    directory: Arc<dyn AuthDirectory>,
    max_directory_pages: u32,
}

impl<P: ProfileRepository> UserService<P> {
    /// Create a new user service
    pub fn new(profiles: Arc<P>, directory: Arc<dyn AuthDirectory>, max_directory_pages: u32) -> Self {
        Self {
            profiles,
            directory,
            max_directory_pages,
        }
    }

    /// Directory pages as a lazy stream, starting at page 1.
    ///
    /// Ends at the first empty or short page, or after `max_directory_pages`.
    pub fn directory_pages(
        &self,
    ) -> impl Stream<Item = Result<Vec<DirectoryUser>, CoreError>> + Send + '_ {
        let max_pages = self.max_directory_pages;

        stream::try_unfold(Some(1u32), move |next| async move {
            let Some(page) = next else {
                return Ok(None);
            };
            if page > max_pages {
                warn!(max_pages, "Directory drain truncated at page limit");
                return Ok(None);
            }

            let users = self.directory.list_users(page, DIRECTORY_PAGE_SIZE).await?;
            if users.is_empty() {
                return Ok(None);
            }

            let next = (users.len() >= DIRECTORY_PAGE_SIZE as usize).then_some(page + 1);
            Ok(Some((users, next)))
        })
    }

    /// Every user in the directory, in directory order
    pub async fn drain_directory(&self) -> Result<Vec<DirectoryUser>, CoreError> {
        let users: Vec<DirectoryUser> = self.directory_pages().try_concat().await?;
        debug!(count = users.len(), "Drained user directory");
        Ok(users)
    }

    /// One page of users merged with their profiles
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PageResponse<AdminUser>, CoreError> {
        validate_page(page, page_size)?;

        let users = self.drain_directory().await?;
        let pagination = Pagination::new(page, page_size, users.len() as u64);

        let page_users: Vec<DirectoryUser> = users
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(page_size as usize)
            .collect();

        let data = self.merge_profiles(page_users).await;
        Ok(PageResponse { data, pagination })
    }

    /// Users whose email, first name or last name contains the query
    #[instrument(skip(self))]
    pub async fn search(&self, raw_query: &str) -> Result<UserSearchResponse, CoreError> {
        let query = SearchQuery::parse(raw_query)?;
        let needle = query.as_str();

        let users = self.drain_directory().await?;

        let mut matched_ids: HashSet<UserId> = HashSet::new();
        let mut matched: Vec<DirectoryUser> = Vec::new();
        for user in &users {
            let email_hit = user
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(needle));
            if email_hit && matched_ids.insert(user.id) {
                matched.push(user.clone());
            }
        }

        let profile_hits = match self.profiles.search(needle).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Profile search failed, using email matches only");
                Vec::new()
            }
        };

        let by_id: HashMap<UserId, &DirectoryUser> = users.iter().map(|u| (u.id, u)).collect();
        for row in profile_hits {
            let id = UserId(row.id);
            if let Some(user) = by_id.get(&id) {
                if matched_ids.insert(id) {
                    matched.push((*user).clone());
                }
            }
        }

        let data = self.merge_profiles(matched).await;
        Ok(UserSearchResponse {
            total_count: data.len() as u64,
            data,
            query: query.to_string(),
        })
    }

    /// Set a new password for a user
    #[instrument(skip(self, password))]
    pub async fn reset_password(
        &self,
        id: UserId,
        password: Option<&str>,
    ) -> Result<ChangePasswordResponse, CoreError> {
        let password = password.unwrap_or_default();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }

        self.directory.update_password(&id, password).await?;

        Ok(ChangePasswordResponse {
            message: "Password updated successfully".to_string(),
            user_id: id,
        })
    }

    /// Issue a one-time sign-in link for a user
    #[instrument(skip(self))]
    pub async fn issue_magic_link(
        &self,
        id: UserId,
        email: Option<&str>,
    ) -> Result<MagicLinkResponse, CoreError> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| CoreError::Validation("Email is required".to_string()))?;

        self.directory
            .get_user(&id)
            .await?
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))?;

        let magic_link = self.directory.generate_magic_link(email).await?;

        Ok(MagicLinkResponse {
            magic_link,
            user: MagicLinkUser {
                id,
                email: email.to_string(),
            },
        })
    }

    /// Attach profile names; a failed lookup leaves names empty
    async fn merge_profiles(&self, users: Vec<DirectoryUser>) -> Vec<AdminUser> {
        let ids: Vec<Uuid> = users.iter().map(|u| u.id.0).collect();

        let profiles: HashMap<UserId, Profile> = match self.profiles.find_by_ids(&ids).await {
            Ok(rows) => rows
                .into_iter()
                .map(Profile::from)
                .map(|p| (p.id, p))
                .collect(),
            Err(e) => {
                warn!(error = %e, "Profile lookup failed, names left empty");
                HashMap::new()
            }
        };

        users
            .into_iter()
            .map(|user| {
                let profile = profiles.get(&user.id);
                AdminUser::merge(user, profile)
            })
            .collect()
    }
}
