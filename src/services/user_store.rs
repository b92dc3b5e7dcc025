use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::{
    db,
    error::{AppError, AppResult},
    models::{AddOutcome, LoadOutcome, OnboardOutcome, PersistedUser, User},
    services::{
        preferences::{PreferenceAnswers, PreferenceSource},
        recommendations,
    },
};

/// In-memory user registry backed by an append-only CSV file
///
/// Presence of a user id is the only notion of authentication. Ids are
/// never removed, so once known an id stays known.
#[derive(Debug)]
pub struct UserStore {
    users: HashMap<String, User>,
    store_path: PathBuf,
}

impl UserStore {
    /// Creates an empty store that appends new users to `store_path`
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            users: HashMap::new(),
            store_path: store_path.into(),
        }
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// Bulk-loads users from a CSV file with a `user_id` column
    ///
    /// A missing file is not an error. On a read failure the rows
    /// inserted so far are kept and the error is returned.
    #[instrument(skip(self, source), fields(source = %source.display()))]
    pub fn load(&mut self, source: &Path) -> AppResult<LoadOutcome> {
        let rows = match db::open_users(source) {
            Ok(Some(rows)) => rows,
            Ok(None) => {
                tracing::warn!("Users file not found");
                return Ok(LoadOutcome::SourceMissing);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to open users file");
                return Err(e);
            }
        };

        let mut added = 0;
        let mut duplicates = 0;
        for row in rows {
            let (user_id, attributes) = row.map_err(|e| {
                tracing::error!(error = %e, added, "Users load aborted");
                e
            })?;
            match self.add(&user_id, attributes) {
                AddOutcome::Added => added += 1,
                AddOutcome::AlreadyExists => duplicates += 1,
            }
        }

        tracing::info!(added, duplicates, "Users loaded");
        Ok(LoadOutcome::Loaded { added, duplicates })
    }

    /// Returns true when `user_id` is known to the store
    pub fn authenticate(&self, user_id: &str) -> bool {
        self.users.contains_key(user_id)
    }

    /// Registers a user id; an existing id is left untouched
    pub fn add(&mut self, user_id: &str, attributes: HashMap<String, String>) -> AddOutcome {
        if self.authenticate(user_id) {
            tracing::info!(user_id = %user_id, "User already exists");
            return AddOutcome::AlreadyExists;
        }

        self.users.insert(user_id.to_string(), User::new(attributes));
        tracing::info!(user_id = %user_id, "User added");
        AddOutcome::Added
    }

    /// Asks `source` for the user's preferences and stores the tag string
    ///
    /// The source is not consulted for unknown ids.
    pub fn collect_preferences(
        &mut self,
        user_id: &str,
        source: &mut dyn PreferenceSource,
    ) -> AppResult<String> {
        let Some(user) = self.users.get_mut(user_id) else {
            tracing::warn!(user_id = %user_id, "User not authenticated");
            return Err(AppError::Unauthenticated(user_id.to_string()));
        };

        let answers = PreferenceAnswers::collect(source).map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Failed to collect preferences");
            AppError::Input(e)
        })?;
        let tags = answers.to_tags();
        user.tags = Some(tags.clone());

        tracing::info!(user_id = %user_id, tags = %tags, "User preferences collected");
        Ok(tags)
    }

    /// Welcomes a known user, or registers, tags and persists a new one
    ///
    /// Registration is not rolled back when the file write fails: the id
    /// stays authenticated for the life of this store and the
    /// persistence error is returned.
    #[instrument(skip(self, source))]
    pub fn onboard(
        &mut self,
        user_id: &str,
        source: &mut dyn PreferenceSource,
    ) -> AppResult<OnboardOutcome> {
        if self.authenticate(user_id) {
            tracing::info!("Welcome back");
            return Ok(OnboardOutcome::Welcome);
        }

        tracing::info!("Registering new user");
        self.add(user_id, User::registration_defaults());
        let tags = self.collect_preferences(user_id, source)?;

        let row = match self.users.get(user_id) {
            Some(user) => PersistedUser::from_user(user_id, user),
            None => return Err(AppError::Unauthenticated(user_id.to_string())),
        };
        db::append_user(&self.store_path, &row).map_err(|e| {
            tracing::error!(error = %e, "Failed to save new user");
            e
        })?;

        tracing::info!(path = %self.store_path.display(), "New user saved");
        Ok(OnboardOutcome::Registered { tags })
    }

    /// Recommendations for a known user; empty for unknown ids
    pub fn get_recommendations(&self, user_id: &str) -> Vec<String> {
        match self.users.get(user_id) {
            Some(user) => recommendations::generate_recommendations(user_id, user),
            None => {
                tracing::warn!(user_id = %user_id, "User does not exist");
                Vec::new()
            }
        }
    }
}
