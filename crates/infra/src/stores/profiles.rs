use brasa_auth::{Profile, ProfileStore, ProfileStoreError};
use brasa_core::{DomainError, DomainResult, UserId};

use crate::change_feed::{ChangeFeed, ChangeOp};
use crate::memory::Table;

/// Profile records ("usuarios" table): the [`ProfileStore`] the session
/// machinery reads from, plus the listing the admin back-office needs.
pub struct InMemoryProfileDirectory {
    table: Table<UserId, Profile>,
    feed: ChangeFeed,
}

impl InMemoryProfileDirectory {
    pub fn new(feed: ChangeFeed) -> Self {
        Self {
            table: Table::new(),
            feed,
        }
    }

    /// Insert the profile created at registration. One per identity.
    pub fn insert(&self, profile: Profile) -> DomainResult<()> {
        if self.table.contains(&profile.user_id) {
            return Err(DomainError::invariant(
                "la identidad ya tiene un perfil registrado",
            ));
        }
        let id = profile.user_id;
        self.table.upsert(id, profile);
        self.feed.publish("usuarios", ChangeOp::Created, id);
        Ok(())
    }

    /// Administrative role override (provisioning, seeding). The storefront
    /// itself never calls this: roles are read-only from its perspective.
    pub fn set_role(&self, user_id: UserId, rol: &str) -> DomainResult<()> {
        let mut profile = self.table.get(&user_id).ok_or(DomainError::NotFound)?;
        profile.rol = rol.to_string();
        self.table.upsert(user_id, profile);
        self.feed.publish("usuarios", ChangeOp::Updated, user_id);
        Ok(())
    }

    pub fn list_newest_first(&self) -> Vec<Profile> {
        let mut profiles = self.table.values();
        profiles.sort_by(|a, b| b.fecha_registro.cmp(&a.fecha_registro));
        profiles
    }

    pub fn count(&self) -> usize {
        self.table.len()
    }
}

impl ProfileStore for InMemoryProfileDirectory {
    fn profile_by_identity(&self, id: UserId) -> Result<Option<Profile>, ProfileStoreError> {
        Ok(self.table.get(&id))
    }
}
