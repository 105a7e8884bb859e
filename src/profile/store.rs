//! JSON file store for user profiles
//!
//! The whole store is one JSON object keyed by user id. Every write
//! replaces the file, so the on-disk state always matches memory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info, warn};

use super::data::{UserProfile, MIN_AGE};
use crate::error::StoreError;

/// Default location of the profile store
pub const DEFAULT_STORE_PATH: &str = "data/profiles.json";

#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: BTreeMap<String, UserProfile>,
}

impl ProfileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let profiles = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text)?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened profile store {} ({} profiles)", path.display(), profiles.len());
        Ok(Self { path, profiles })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Saved profile for this user, if any
    pub fn get(&self, user_id: &str) -> Option<&UserProfile> {
        self.profiles.get(user_id.trim())
    }

    /// Saved profile, or the defaults for a first-time user
    pub fn load_or_default(&self, user_id: &str) -> Result<UserProfile, StoreError> {
        let key = normalize_user_id(user_id)?;
        Ok(self
            .profiles
            .get(&key)
            .cloned()
            .unwrap_or_else(|| UserProfile::default_for(&key)))
    }

    /// Insert or replace the profile and persist the store
    pub fn upsert(&mut self, mut profile: UserProfile) -> Result<&UserProfile, StoreError> {
        let key = normalize_user_id(&profile.user_id)?;
        if profile.age < MIN_AGE {
            return Err(StoreError::InvalidAge(profile.age));
        }

        profile.user_id = key.clone();
        profile.updated_at = Utc::now();
        let previous = self.profiles.insert(key.clone(), profile);

        // A failed write leaves memory as it was before the call
        if let Err(e) = self.persist() {
            match previous {
                Some(prior) => {
                    self.profiles.insert(key.clone(), prior);
                }
                None => {
                    self.profiles.remove(&key);
                }
            }
            warn!("Failed to save profile for {}: {}", key, e);
            return Err(e);
        }
        let replaced = previous.is_some();

        info!(
            "{} profile for {}",
            if replaced { "Updated" } else { "Created" },
            key
        );
        Ok(&self.profiles[&key])
    }

    /// Append a chat message to the user's history, creating the profile if needed
    pub fn append_chat(&mut self, user_id: &str, message: &str) -> Result<&UserProfile, StoreError> {
        let mut profile = self.load_or_default(user_id)?;
        profile.chat_history.push(message.to_string());
        self.upsert(profile)
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.profiles)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

fn normalize_user_id(user_id: &str) -> Result<String, StoreError> {
    let key = user_id.trim();
    if key.is_empty() {
        return Err(StoreError::EmptyUserId);
    }
    Ok(key.to_string())
}
