//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod course;
pub mod enrollment;
pub mod password;
pub mod session;
pub mod user;

pub use course::{Course, CourseResponse};
pub use enrollment::{EnrolledCourse, Enrollment, RosterEntry};
pub use password::Password;
pub use session::{AccessLevel, Session, SessionIdentity, SessionToken};
pub use user::{User, UserResponse};
