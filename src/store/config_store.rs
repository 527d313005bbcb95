//! Config store implementation
//!
//! CRUD over the three persisted collections: browser profiles, groups and
//! the global key-value blob. Every mutation re-reads, rewrites and persists
//! the whole owning collection; a store-wide lock serializes those
//! read-modify-write cycles so concurrent callers cannot interleave.
//!
//! When a native channel is present, mutations also mirror the resulting
//! collection to the host. Mirroring is advisory: failures are logged and
//! never reach the caller.

use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::backend::StoreBackend;
use crate::native::{CallbackRegistry, NativeChannel};
use crate::profile::{BrowserProfile, Group};
use crate::Result;

/// Persisted key for the profile collection (`{ "users": [...] }`)
pub const PROFILES_KEY: &str = "list";
/// Persisted key for the group collection (plain array)
pub const GROUPS_KEY: &str = "group";
/// Persisted key for the global blob (mapping, never a sequence)
pub const GLOBAL_KEY: &str = "GlobalData";

#[derive(Debug, serde::Deserialize)]
struct ProfileEnvelope {
    #[serde(default)]
    users: Vec<BrowserProfile>,
}

/// Persistent store for profiles, groups and global data
#[derive(Debug)]
pub struct ConfigStore {
    backend: Arc<dyn StoreBackend>,
    /// Advisory mirror target; None on the Remote transport
    mirror: Option<Arc<dyn NativeChannel>>,
    /// Serializes read-modify-write cycles across collections
    write_lock: Mutex<()>,
}

impl ConfigStore {
    /// Create a store over `backend`, mirroring to `mirror` when present
    pub fn new(backend: Arc<dyn StoreBackend>, mirror: Option<Arc<dyn NativeChannel>>) -> Self {
        Self {
            backend,
            mirror,
            write_lock: Mutex::new(()),
        }
    }

    /// Allocate the next id: max(existing ids ∪ {0}) + 1
    fn allocate_id(existing: impl Iterator<Item = u64>) -> u64 {
        existing.max().unwrap_or(0) + 1
    }

    fn default_name(prefix: &str, id: u64) -> String {
        if prefix.is_empty() {
            id.to_string()
        } else {
            format!("{} {}", prefix, id)
        }
    }

    /// Best-effort mirror of a full collection to the native side
    ///
    /// Nothing registers the token, so the host's eventual acknowledgement is
    /// dropped by the registry as an unknown delivery.
    async fn mirror(&self, method: &str, payload: Value) {
        let Some(channel) = &self.mirror else {
            return;
        };

        let token = CallbackRegistry::next_token();
        if let Err(e) = channel
            .invoke(method, vec![Value::String(token), payload])
            .await
        {
            warn!("Native mirror {} failed: {}", method, e);
        }
    }

    // ---- profiles ----

    /// List all profiles; corrupt persisted state reads as empty
    pub async fn list_profiles(&self) -> Vec<BrowserProfile> {
        match self.backend.load(PROFILES_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<ProfileEnvelope>(&raw) {
                Ok(envelope) => envelope.users,
                Err(e) => {
                    warn!("Corrupt profile collection, resetting: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load profile collection: {}", e);
                Vec::new()
            }
        }
    }

    /// Find one profile by id
    pub async fn find_profile(&self, id: u64) -> Option<BrowserProfile> {
        self.list_profiles().await.into_iter().find(|p| p.id == id)
    }

    async fn persist_profiles(&self, profiles: &[BrowserProfile]) -> Result<()> {
        let envelope = serde_json::json!({ "users": profiles });
        self.backend
            .save(PROFILES_KEY, &serde_json::to_string(&envelope)?)
            .await?;
        self.mirror("setBrowserList", envelope).await;
        Ok(())
    }

    /// Add a profile; allocates the id and defaults the name from `prefix`
    pub async fn add_profile(
        &self,
        mut item: BrowserProfile,
        prefix: &str,
    ) -> Result<BrowserProfile> {
        let _guard = self.write_lock.lock().await;

        let mut profiles = self.list_profiles().await;
        item.id = Self::allocate_id(profiles.iter().map(|p| p.id));
        if item.name.is_empty() {
            item.name = Self::default_name(prefix, item.id);
        }
        debug!("Adding profile {} ({})", item.id, item.name);

        profiles.push(item.clone());
        self.persist_profiles(&profiles).await?;
        Ok(item)
    }

    /// Replace a profile by id; a missing id is a logged no-op
    pub async fn update_profile(&self, item: BrowserProfile) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut profiles = self.list_profiles().await;
        match profiles.iter_mut().find(|p| p.id == item.id) {
            Some(slot) => *slot = item,
            None => {
                warn!("Update for unknown profile {} ignored", item.id);
                return Ok(());
            }
        }
        self.persist_profiles(&profiles).await
    }

    /// Delete a profile by id
    pub async fn remove_profile(&self, id: u64) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut profiles = self.list_profiles().await;
        profiles.retain(|p| p.id != id);
        self.persist_profiles(&profiles).await
    }

    // ---- groups ----

    /// List all groups; corrupt persisted state reads as empty
    pub async fn list_groups(&self) -> Vec<Group> {
        match self.backend.load(GROUPS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Group>>(&raw) {
                Ok(groups) => groups,
                Err(e) => {
                    warn!("Corrupt group collection, resetting: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load group collection: {}", e);
                Vec::new()
            }
        }
    }

    async fn persist_groups(&self, groups: &[Group]) -> Result<()> {
        self.backend
            .save(GROUPS_KEY, &serde_json::to_string(groups)?)
            .await
    }

    /// Add a group; allocates the id and defaults the name from `prefix`
    pub async fn add_group(&self, mut item: Group, prefix: &str) -> Result<Group> {
        let _guard = self.write_lock.lock().await;

        let mut groups = self.list_groups().await;
        item.id = Self::allocate_id(groups.iter().map(|g| g.id));
        if item.name.is_empty() {
            item.name = Self::default_name(prefix, item.id);
        }

        groups.push(item.clone());
        self.persist_groups(&groups).await?;
        Ok(item)
    }

    /// Replace a group by id; a missing id is a logged no-op
    pub async fn update_group(&self, item: Group) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut groups = self.list_groups().await;
        match groups.iter_mut().find(|g| g.id == item.id) {
            Some(slot) => *slot = item,
            None => {
                warn!("Update for unknown group {} ignored", item.id);
                return Ok(());
            }
        }
        self.persist_groups(&groups).await
    }

    /// Delete a group by id
    pub async fn remove_group(&self, id: u64) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut groups = self.list_groups().await;
        groups.retain(|g| g.id != id);
        self.persist_groups(&groups).await
    }

    // ---- global blob ----

    /// The global key-value blob
    ///
    /// Must never be a sequence: a value read back in sequence form is
    /// treated as corrupt and reset to an empty mapping.
    pub async fn global_data(&self) -> Map<String, Value> {
        let raw = match self.backend.load(GLOBAL_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Map::new(),
            Err(e) => {
                warn!("Failed to load global data: {}", e);
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                warn!(
                    "Global data has wrong shape ({}), resetting",
                    match other {
                        serde_json::Value::Array(_) => "sequence",
                        _ => "non-mapping",
                    }
                );
                Map::new()
            }
            Err(e) => {
                warn!("Corrupt global data, resetting: {}", e);
                Map::new()
            }
        }
    }

    /// Read one global value by key
    pub async fn get_global(&self, key: &str) -> Option<Value> {
        self.global_data().await.get(key).cloned()
    }

    /// Set one global value, merging into the existing mapping
    pub async fn set_global(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut blob = self.global_data().await;
        blob.insert(key.to_string(), value);

        let raw = serde_json::to_string(&blob)?;
        self.backend.save(GLOBAL_KEY, &raw).await?;
        // The host expects the serialized blob, not the object.
        self.mirror("setGlobalData", Value::String(raw)).await;
        Ok(())
    }
}
