use std::collections::HashSet;

use parking_lot::RwLock;

use super::object_guid::ObjectGuid;

// Owners (creatures) which currently have a threat reference on this unit. This is only used to
// notify these owners when the unit goes away, the references themselves belong to the owners.
#[derive(Debug, Default)]
pub struct HatedBy {
    owners: RwLock<HashSet<ObjectGuid>>,
}

impl HatedBy {
    pub fn new() -> Self {
        Self {
            owners: RwLock::new(HashSet::new()),
        }
    }

    pub fn add(&self, owner: ObjectGuid) {
        self.owners.write().insert(owner);
    }

    pub fn remove(&self, owner: ObjectGuid) {
        self.owners.write().remove(&owner);
    }

    pub fn contains(&self, owner: &ObjectGuid) -> bool {
        self.owners.read().contains(owner)
    }

    pub fn owners(&self) -> HashSet<ObjectGuid> {
        self.owners.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.read().is_empty()
    }
}
