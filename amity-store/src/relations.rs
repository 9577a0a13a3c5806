//! Friendship operations layered on top of [`UserStore`].
//!
//! Each operation resolves and mutates inside a single locked section, so
//! concurrent callers never observe or produce a half-applied change.
//! Friend lists hold plain ids: nothing here validates targets, cascades
//! deletes or mirrors links in the other direction.

use tracing::debug;

use crate::{User, UserError, UserId, UserStore};

/// Outcome of linking `source_id` to `target_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friendship {
    pub source_id: UserId,
    pub target_id: UserId,
    pub source_name: String,
    /// `None` when the target does not resolve; the link is stored anyway.
    pub target_name: Option<String>,
}

impl UserStore {
    /// Appends `target` to the friend list of `source`.
    ///
    /// Only the source has to exist. An unknown target is still appended
    /// and reported through [`Friendship::target_name`] being `None`. The
    /// reverse link is not added.
    pub fn make_friends(&self, source: UserId, target: UserId) -> Result<Friendship, UserError> {
        let friendship = self.write(|table| {
            let user = table.get_mut(source).ok_or(UserError::NotFound(source))?;
            user.friends.push(target);
            let source_name = user.name.clone();
            let target_name = table.name_of(target).map(str::to_owned);

            Ok::<_, UserError>(Friendship {
                source_id: source,
                target_id: target,
                source_name,
                target_name,
            })
        })?;

        debug!(
            source_id = %source,
            target_id = %target,
            dangling = friendship.target_name.is_none(),
            "friend linked"
        );
        Ok(friendship)
    }

    /// Names of every entry in the friend list of `id`, in list order.
    ///
    /// Dangling entries come back as `None`, so the result always has one
    /// slot per stored friend id.
    pub fn list_friend_names(&self, id: UserId) -> Result<Vec<Option<String>>, UserError> {
        self.read(|table| -> Result<_, UserError> {
            let user = table.get(id).ok_or(UserError::NotFound(id))?;
            Ok(user
                .friends
                .iter()
                .map(|friend| table.name_of(*friend).map(str::to_owned))
                .collect())
        })
    }

    /// Replaces the age of `id` and returns the updated record.
    pub fn update_age(&self, id: UserId, age: u32) -> Result<User, UserError> {
        let updated = self.write(|table| {
            let user = table.get_mut(id).ok_or(UserError::NotFound(id))?;
            user.age = age;
            Ok::<_, UserError>(user.clone())
        })?;

        debug!(user_id = %id, age, "age updated");
        Ok(updated)
    }

    /// Removes `id` and returns the record it held.
    pub fn delete_user(&self, id: UserId) -> Result<User, UserError> {
        let removed = self
            .write(|table| table.remove(id))
            .ok_or(UserError::NotFound(id))?;

        debug!(user_id = %id, name = %removed.name, "user removed");
        Ok(removed)
    }
}
