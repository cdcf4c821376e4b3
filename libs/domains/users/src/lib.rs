//! Users Domain
//!
//! Registration and maintenance of user records kept in memory.
//!
//! # Features
//!
//! - Create, rename, replace and delete users
//! - Minimum-age check on registration (`MIN_USER_AGE`, default 18)
//! - Inclusive birth-date range search
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, body and query validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Age rule, range check, existence checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Record and request types
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//!     UsersConfig,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository, UsersConfig::default());
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use config::{DEFAULT_MIN_USER_AGE, UsersConfig};
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{DateRange, RenameUser, User, UserPayload};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
