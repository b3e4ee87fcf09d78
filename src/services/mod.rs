//! Service layer for business logic
//!
//! Shared between the HTTP API and the command-line interface.

pub mod allocator;
mod link_service;

pub use allocator::{Allocation, CodeAllocator, CodeGenerator, RandomCodeGenerator};
pub use link_service::*;
