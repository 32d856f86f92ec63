//! DeliveryHub web client library.
//!
//! Server-rendered pages for the DeliveryHub delivery platform: the public
//! home page, sign-in and registration, role dashboards and the admin
//! role-approval panel. All data and authentication live in the delivery
//! backend, reached through [`backend::BackendClient`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod approvals;
pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;
