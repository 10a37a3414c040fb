//! Enrollment domain entity.
//!
//! An enrollment links one user to one course, timestamped. Records are
//! immutable once created; the (user_id, course_id) pair is unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Course, User};

/// Enrollment domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub enrolled_at: DateTime<Utc>,
}

/// A course a user is enrolled in, with the enrollment timestamp
#[derive(Debug, Clone)]
pub struct EnrolledCourse {
    pub course: Course,
    pub enrolled_at: DateTime<Utc>,
}

/// One roster row for administrative review: the enrollment joined
/// with both of its parents.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub enrollment: Enrollment,
    pub user: User,
    pub course: Course,
}
