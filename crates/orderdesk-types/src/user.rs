//! User types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Parse a user ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A user as stored by the authentication provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    #[serde(default)]
    pub app_metadata: serde_json::Value,
}

/// Profile record kept alongside the directory entry, keyed by the same id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Directory user merged with its profile, as listed in the back-office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: UserId,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
    pub email_confirmed_at: Option<DateTime<Utc>>,
    pub phone: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub profile_created_at: Option<DateTime<Utc>>,
    pub user_metadata: serde_json::Value,
    pub app_metadata: serde_json::Value,
}

impl AdminUser {
    /// Merge a directory user with its profile (if any).
    ///
    /// Missing profile fields become empty strings.
    pub fn merge(user: DirectoryUser, profile: Option<&Profile>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            last_sign_in_at: user.last_sign_in_at,
            email_confirmed_at: user.email_confirmed_at,
            phone: user.phone,
            first_name: profile
                .and_then(|p| p.first_name.clone())
                .unwrap_or_default(),
            last_name: profile.and_then(|p| p.last_name.clone()).unwrap_or_default(),
            profile_created_at: profile.map(|p| p.created_at),
            user_metadata: user.user_metadata,
            app_metadata: user.app_metadata,
        }
    }

    /// Whether the user has confirmed their email address
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_user() -> DirectoryUser {
        DirectoryUser {
            id: UserId(Uuid::new_v4()),
            email: Some("mari@example.com".to_string()),
            created_at: Utc::now(),
            last_sign_in_at: None,
            email_confirmed_at: Some(Utc::now()),
            phone: None,
            user_metadata: serde_json::Value::Null,
            app_metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_merge_without_profile_uses_empty_names() {
        let user = AdminUser::merge(directory_user(), None);
        assert_eq!(user.first_name, "");
        assert_eq!(user.last_name, "");
        assert!(user.profile_created_at.is_none());
        assert!(user.is_confirmed());
    }

    #[test]
    fn test_merge_with_profile() {
        let dir = directory_user();
        let profile = Profile {
            id: dir.id,
            email: dir.email.clone(),
            first_name: Some("Mari".to_string()),
            last_name: None,
            created_at: Utc::now(),
        };
        let user = AdminUser::merge(dir, Some(&profile));
        assert_eq!(user.first_name, "Mari");
        assert_eq!(user.last_name, "");
        assert_eq!(user.profile_created_at, Some(profile.created_at));
    }

    #[test]
    fn test_directory_user_tolerates_missing_fields() {
        let json = serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "created_at": "2024-03-01T10:00:00Z"
        });
        let user: DirectoryUser = serde_json::from_value(json).unwrap();
        assert!(user.email.is_none());
        assert!(user.email_confirmed_at.is_none());
    }
}
