//! Product Makers Core Library
//!
//! This crate provides the domain models, error types, configuration, and validation
//! shared by the Product Makers client crates (draft forms, voting, API client, CLI).

pub mod catalog;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use catalog::{Page, ProductListQuery, ProductSort};
pub use config::MakersConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use hooks::{
    CurrentUser, NoOpNotifier, NoticeLevel, Notifier, ProductBackend, SessionProvider,
    StaticSession, VoteBackend,
};
pub use validation::ValidationError;
