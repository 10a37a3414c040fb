//! EnrollHub - Course-enrollment API
//!
//! Users register, log in, browse a course catalog, enroll in courses, and
//! view their own courses; administrators manage course records and review
//! the enrollment roster. Authentication is session based: login issues an
//! opaque server-side token, and every use case receives the resolved
//! session identity as an explicit value.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and the authorization gate
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories, sessions)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{AccessLevel, Password, Session, SessionIdentity, SessionToken, User};
pub use errors::{AppError, AppResult};
