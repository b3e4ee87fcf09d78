pub mod auth;

pub use auth::{AdminAuth, AdminToken};
