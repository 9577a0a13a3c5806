//! Amity: in-memory user records and friendship links served over HTTP.
//!
//! The workspace is split into:
//!
//! * `amity-core`: configuration, canonical errors and tracing setup
//! * `amity-store`: the user store, friendship operations and REST API
//! * `amity-server`: the `amity` binary
//!
//! This crate re-exports the pieces most callers need.

pub use amity_core::{config, logging, AmityError, CoreConfig, Environment};
pub use amity_store::{
    relations, service, Friendship, NewUser, User, UserApiBuilder, UserError, UserId,
    UserServiceConfig, UserStore, UserTable,
};

/// Builds a ready-to-serve router over a fresh, empty store.
pub fn router() -> (UserStore, axum::Router) {
    let store = UserStore::new();
    let router = UserApiBuilder::new(store.clone()).into_router();
    (store, router)
}
