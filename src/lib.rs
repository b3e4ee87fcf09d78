//! snaplink - a small URL shortener service
//!
//! # Architecture
//! - `storage`: `LinkStore` trait with SeaORM (SQLite/MySQL/PostgreSQL), in-memory
//!   and degraded backends
//! - `services`: code allocation and the link service used by every interface
//! - `api`: HTTP handlers and middleware
//! - `config`: TOML + environment configuration
//! - `runtime`: startup, shutdown and execution modes (server, CLI)
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
