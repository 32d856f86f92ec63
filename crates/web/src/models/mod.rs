//! Domain models for the web client.

pub mod session;

pub use session::{TokenSource, bearer_token};
