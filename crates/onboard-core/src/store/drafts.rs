//! Role-scoped draft persistence.

use std::sync::Arc;

use log::{debug, error, warn};

use super::KeyValueStore;
use crate::models::{Draft, Role};

/// Saves, loads and clears drafts keyed by role.
///
/// Storage failures are logged and swallowed: losing a draft never breaks
/// the wizard, it only degrades to "no draft available".
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persists `draft` in `role`'s slot. Returns whether it was written.
    pub async fn save(&self, role: Role, draft: &Draft) -> bool {
        let draft = draft.clone().scoped_to(role);
        let json = match serde_json::to_string(&draft) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize draft for {role}: {e}");
                return false;
            }
        };

        match self.store.set(role.draft_key(), &json).await {
            Ok(()) => {
                debug!("Saved draft {}", role.draft_key());
                true
            }
            Err(e) => {
                error!("Failed to save draft {}: {e}", role.draft_key());
                false
            }
        }
    }

    /// Loads `role`'s draft, if one exists and can be read.
    pub async fn load(&self, role: Role) -> Option<Draft> {
        let raw = match self.store.get(role.draft_key()).await {
            Ok(raw) => raw?,
            Err(e) => {
                error!("Failed to load draft {}: {e}", role.draft_key());
                return None;
            }
        };

        match serde_json::from_str::<Draft>(&raw) {
            Ok(draft) => Some(draft.scoped_to(role)),
            Err(e) => {
                warn!("Ignoring unreadable draft {}: {e}", role.draft_key());
                None
            }
        }
    }

    /// Deletes `role`'s draft. Returns whether the store accepted it.
    pub async fn clear(&self, role: Role) -> bool {
        match self.store.delete(role.draft_key()).await {
            Ok(()) => {
                debug!("Cleared draft {}", role.draft_key());
                true
            }
            Err(e) => {
                error!("Failed to clear draft {}: {e}", role.draft_key());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        error::{OnboardError, Result},
        models::{Stage1Data, Stage2Data},
        store::MemoryStore,
    };

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(OnboardError::Configuration {
                message: "storage disabled".to_string(),
            })
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(OnboardError::Configuration {
                message: "quota exceeded".to_string(),
            })
        }

        async fn delete(&self, _key: &str) -> Result<()> {
            Err(OnboardError::Configuration {
                message: "storage disabled".to_string(),
            })
        }
    }

    fn jane_draft() -> Draft {
        Draft {
            stage1_data: Some(Stage1Data {
                full_name: Some("Jane".to_string()),
                ..Default::default()
            }),
            stage2_data: None,
        }
    }

    #[tokio::test]
    async fn test_draft_roundtrip_and_clear() {
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));

        assert!(drafts.save(Role::Admin, &jane_draft()).await);
        assert_eq!(drafts.load(Role::Admin).await, Some(jane_draft()));

        assert!(drafts.clear(Role::Admin).await);
        assert_eq!(drafts.load(Role::Admin).await, None);
    }

    #[tokio::test]
    async fn test_roles_do_not_collide() {
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));
        let ops_draft = Draft {
            stage1_data: None,
            stage2_data: Some(Stage2Data {
                notes: Some("ops notes".to_string()),
                ..Default::default()
            }),
        };

        drafts.save(Role::Admin, &jane_draft()).await;
        drafts.save(Role::Ops, &ops_draft).await;

        assert_eq!(drafts.load(Role::Admin).await, Some(jane_draft()));
        assert_eq!(drafts.load(Role::Ops).await, Some(ops_draft));
    }

    #[tokio::test]
    async fn test_ops_slot_drops_stage1() {
        let drafts = DraftStore::new(Arc::new(MemoryStore::new()));
        drafts.save(Role::Ops, &jane_draft()).await;

        let loaded = drafts.load(Role::Ops).await.unwrap();
        assert!(loaded.stage1_data.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_draft_is_ignored() {
        let store = Arc::new(MemoryStore::new());
        store.set("draft_admin", "not json").await.unwrap();

        let drafts = DraftStore::new(store);
        assert_eq!(drafts.load(Role::Admin).await, None);
    }

    #[tokio::test]
    async fn test_storage_failures_are_absorbed() {
        let drafts = DraftStore::new(Arc::new(BrokenStore));

        assert!(!drafts.save(Role::Admin, &jane_draft()).await);
        assert_eq!(drafts.load(Role::Admin).await, None);
        assert!(!drafts.clear(Role::Admin).await);
    }
}
