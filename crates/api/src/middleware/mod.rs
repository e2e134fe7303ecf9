//! Request middleware.

pub mod auth;

pub use auth::{RequestViewer, viewer_middleware};
