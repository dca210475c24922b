//! Collaborators the canvas talks to: storage and the signed-in user.

pub mod auth;
pub mod repository;
pub mod sync;

pub use auth::{AuthSession, LocalSession, UserIdentity};
pub use repository::LocalStorageRepository;
pub use sync::NetworkSync;
