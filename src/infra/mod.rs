//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Server-side session storage

pub mod db;
pub mod repositories;
pub mod sessions;

pub use db::{Database, Migrator};
pub use repositories::{
    CourseRepository, CourseStore, EnrollmentRepository, EnrollmentStore, UserRepository,
    UserStore,
};
pub use sessions::SessionStore;

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCourseRepository, MockEnrollmentRepository, MockUserRepository};
