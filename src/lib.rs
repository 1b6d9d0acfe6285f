//! Ногоон дэвтэр (Green Book): business directory API with AI-assisted search.
//!
//! - [`engine`]: keyword scoring, fallback, prompt building, model calls and
//!   the search/chat orchestration
//! - [`api`]: axum routes, request/response DTOs and error mapping
//! - [`config`]: command-line / environment configuration

pub mod api;
pub mod config;
pub mod engine;

pub use greenbook_store as store;
pub use greenbook_types as types;
