//! In-memory user records and friendship links for the Amity service.
//!
//! The [`UserStore`] owns every record behind a single readers-writer lock.
//! Friendship operations in [`relations`] compose several lookups and one
//! mutation inside a single locked section, and [`service`] exposes the
//! whole thing over HTTP without ever holding the lock across I/O.

mod error;
mod model;
pub mod relations;
pub mod service;
mod store;

pub use error::UserError;
pub use model::{NewUser, User, UserId};
pub use relations::Friendship;
pub use service::{UserApiBuilder, UserServiceConfig};
pub use store::{UserStore, UserTable};
