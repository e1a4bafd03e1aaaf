//! User entity model.
//!
//! Accounts are created and maintained by the external identity provider
//! (signup, login, onboarding). The chat core only reads this table to
//! resolve the caller's display profile and learning language.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user as recorded by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Full display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// The language the user speaks natively.
    pub native_language: Option<String>,
    /// The language the user is learning; gates language-room access.
    pub learning_language: Option<String>,
    /// Short self-description.
    pub bio: Option<String>,
    /// Free-form location string.
    pub location: Option<String>,
    /// Whether onboarding has been completed.
    pub is_onboarded: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The identity projection the chat core operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    /// User ID.
    pub id: Uuid,
    /// Full display name.
    pub full_name: String,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Learning language as stored on the profile (original casing).
    pub learning_language: Option<String>,
}

impl UserRef {
    /// The caller's learning language, lower-cased for room addressing.
    /// `None` when unset or blank.
    pub fn learning_language_lower(&self) -> Option<String> {
        self.learning_language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_lowercase)
    }
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            avatar_url: user.avatar_url.clone(),
            learning_language: user.learning_language.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learning_language_lower() {
        let mut user = UserRef {
            id: Uuid::new_v4(),
            full_name: "Test".to_string(),
            avatar_url: None,
            learning_language: Some("Spanish".to_string()),
        };
        assert_eq!(user.learning_language_lower().as_deref(), Some("spanish"));

        user.learning_language = Some("   ".to_string());
        assert_eq!(user.learning_language_lower(), None);

        user.learning_language = None;
        assert_eq!(user.learning_language_lower(), None);
    }
}
