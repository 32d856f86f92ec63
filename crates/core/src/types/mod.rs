//! Core types for DeliveryHub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod collection;
pub mod email;
pub mod id;
pub mod member;
pub mod registration;
pub mod role;

pub use collection::{CollectionItem, DeletedItem, QueryResult};
pub use email::{Email, EmailError};
pub use id::*;
pub use member::Member;
pub use registration::{PendingRegistrations, RoleRegistration};
pub use role::{DashboardRole, RegistrationType, UnknownRole};
