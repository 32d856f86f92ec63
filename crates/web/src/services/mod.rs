//! Business logic services for the web client.
//!
//! # Services
//!
//! - `crud` - Collection reads and writes (mock store until the backend exposes them)
//! - `members` - Resolve the signed-in member from the session

pub mod crud;
pub mod members;

pub use crud::{CollectionStore, CrudError, CrudService};
pub use members::MemberService;
