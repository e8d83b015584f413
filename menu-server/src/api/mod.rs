//! API route modules
//!
//! One module per resource, each exposing `router()`:
//!
//! - [`auth`] - login and session info
//! - [`health`] - health check
//! - [`public`] - QR landing endpoints (no token)
//! - [`admin`] - superadmin console (restaurants, billing)
//! - [`menu`] - menu management
//! - [`orders`] - order list and status transitions
//! - [`staff`] - staff management
//! - [`managers`] - manager accounts
//! - [`tables`] - table management and QR codes
//! - [`customers`] - customer records and newsletter
//! - [`expenses`] - expense ledger
//! - [`feedback`] - feedback inbox
//! - [`reports`] - profit reports
//! - [`upload`] - image uploads

pub mod admin;
pub mod auth;
pub mod customers;
pub mod expenses;
pub mod feedback;
pub mod health;
pub mod managers;
pub mod menu;
pub mod orders;
pub mod public;
pub mod reports;
pub mod staff;
pub mod tables;
pub mod upload;

// Re-export common types for handlers
pub use crate::utils::AppResult;
