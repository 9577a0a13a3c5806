use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque user identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored user record.
///
/// `friends` holds plain ids with no integrity check: entries may repeat,
/// point back at the user itself, or refer to users that no longer exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub age: u32,
    pub friends: Vec<UserId>,
}

/// Fields supplied when creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
    pub friends: Vec<UserId>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            friends: Vec::new(),
        }
    }

    pub fn with_friends(mut self, friends: impl IntoIterator<Item = UserId>) -> Self {
        self.friends = friends.into_iter().collect();
        self
    }

    pub(crate) fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
            friends: self.friends,
        }
    }
}
