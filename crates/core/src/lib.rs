//! DeliveryHub Core - Shared domain types.
//!
//! This crate provides the types shared by the DeliveryHub components:
//! - `web` - Server-rendered client (home page, dashboards, admin panel)
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no session handling. This keeps it lightweight and allows it to be used
//! anywhere, including by a future backend crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, roles, registrations and members

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
