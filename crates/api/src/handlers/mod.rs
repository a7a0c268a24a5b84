//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod categories;
pub mod notifications;
pub mod offers;
pub mod stores;
pub mod users;
