use serde::Serialize;
use std::collections::HashMap;

/// Attribute names given to freshly registered users
pub const NUM_OF_RATINGS: &str = "num_of_ratings";
pub const IS_NEW_USER: &str = "is_new_user";

/// A user record held by the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Free-form columns, loaded verbatim or set at registration
    pub attributes: HashMap<String, String>,
    /// Space-joined preference tags, set once preferences are collected
    pub tags: Option<String>,
}

impl User {
    pub fn new(attributes: HashMap<String, String>) -> Self {
        Self {
            attributes,
            tags: None,
        }
    }

    /// Defaults for a first-time user: no ratings yet, flagged as new
    pub fn registration_defaults() -> HashMap<String, String> {
        HashMap::from([
            (NUM_OF_RATINGS.to_string(), "0".to_string()),
            (IS_NEW_USER.to_string(), "1".to_string()),
        ])
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Row shape of the append-only users file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistedUser {
    pub user_id: String,
    pub num_of_ratings: String,
    pub is_new_user: String,
    pub tags: String,
}

impl PersistedUser {
    pub fn from_user(user_id: &str, user: &User) -> Self {
        Self {
            user_id: user_id.to_string(),
            num_of_ratings: user.attribute(NUM_OF_RATINGS).unwrap_or_default().to_string(),
            is_new_user: user.attribute(IS_NEW_USER).unwrap_or_default().to_string(),
            tags: user.tags.clone().unwrap_or_default(),
        }
    }
}

/// Result of adding a user id to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
}

/// Result of bulk-loading a users file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows were read; `duplicates` counts ids that were already present
    Loaded { added: usize, duplicates: usize },
    /// The source file does not exist, store left as-is
    SourceMissing,
}

/// Result of onboarding a user id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardOutcome {
    /// Id was already known, nothing was done
    Welcome,
    /// Id was registered and persisted with these tags
    Registered { tags: String },
}
