//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and receive the caller's [`Session`] as an
//! explicit argument rather than reading ambient request state.
//!
//! [`Session`]: crate::domain::Session

mod auth_service;
mod catalog_service;
pub mod container;
mod enrollment_service;

pub use auth_service::{AuthService, Authenticator};
pub use catalog_service::{CatalogManager, CatalogService};
pub use container::Services;
pub use enrollment_service::{EnrollmentManager, EnrollmentService};
