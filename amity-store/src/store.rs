use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::{NewUser, User, UserId};

/// Id-to-record table guarded by [`UserStore`].
///
/// Identifiers come from a counter that only moves forward, so an id is
/// never handed out twice even after its record is deleted.
#[derive(Debug, Default)]
pub struct UserTable {
    users: HashMap<UserId, User>,
    last_id: u64,
}

impl UserTable {
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// Allocates a fresh id and stores the record under it.
    pub fn insert(&mut self, user: NewUser) -> UserId {
        self.last_id += 1;
        let id = UserId::new(self.last_id);
        self.users.insert(id, user.into_user(id));
        id
    }

    pub fn remove(&mut self, id: UserId) -> Option<User> {
        self.users.remove(&id)
    }

    /// Resolves the name of `id`, or `None` for a dangling reference.
    pub fn name_of(&self, id: UserId) -> Option<&str> {
        self.users.get(&id).map(|user| user.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Shared in-memory user store.
///
/// Cloning is cheap and every clone sees the same records. All access goes
/// through one readers-writer lock; callers only ever receive clones of the
/// stored records.
#[derive(Debug, Default, Clone)]
pub struct UserStore {
    inner: Arc<RwLock<UserTable>>,
}

impl UserStore {
    /// Creates a new empty user store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new user and returns its freshly allocated id.
    pub fn add(&self, user: NewUser) -> UserId {
        let id = self.write(|table| table.insert(user));
        debug!(user_id = %id, "user created");
        id
    }

    /// Returns a copy of the current record for `id`, if present.
    pub fn find_by_id(&self, id: UserId) -> Option<User> {
        self.read(|table| table.get(id).cloned())
    }

    /// Removes the record for `id`. Deleting an unknown id is a no-op.
    pub fn delete(&self, id: UserId) -> Option<User> {
        let removed = self.write(|table| table.remove(id));
        if removed.is_some() {
            debug!(user_id = %id, "user deleted");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.read(UserTable::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(UserTable::is_empty)
    }

    /// Runs `f` under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&UserTable) -> R) -> R {
        let table = self.inner.read();
        f(&table)
    }

    /// Runs `f` under the exclusive lock. Use this for every mutation so a
    /// lookup and the write that depends on it form one step.
    pub fn write<R>(&self, f: impl FnOnce(&mut UserTable) -> R) -> R {
        let mut table = self.inner.write();
        f(&mut table)
    }
}
