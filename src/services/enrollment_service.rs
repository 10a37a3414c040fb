//! Enrollment service.
//!
//! Orchestrates the enrollment ledger against the course catalog: a course
//! must exist before enrolling, and the same pair can only enroll once.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{AccessLevel, EnrolledCourse, Enrollment, RosterEntry, Session};
use crate::errors::{AppError, AppResult};
use crate::infra::{CourseRepository, EnrollmentRepository};

/// Enrollment service trait for dependency injection.
#[async_trait]
pub trait EnrollmentService: Send + Sync {
    /// Enroll the calling user in a course
    async fn enroll(&self, session: &Session, course_id: i64) -> AppResult<Enrollment>;

    /// List the calling user's enrolled courses, newest enrollment first
    async fn my_courses(&self, session: &Session) -> AppResult<Vec<EnrolledCourse>>;

    /// Full enrollment roster for administrative review (admin only)
    async fn roster(&self, session: &Session) -> AppResult<Vec<RosterEntry>>;
}

/// Concrete implementation of EnrollmentService
pub struct EnrollmentManager {
    enrollments: Arc<dyn EnrollmentRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl EnrollmentManager {
    /// Create new enrollment service instance
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        courses: Arc<dyn CourseRepository>,
    ) -> Self {
        Self {
            enrollments,
            courses,
        }
    }
}

#[async_trait]
impl EnrollmentService for EnrollmentManager {
    async fn enroll(&self, session: &Session, course_id: i64) -> AppResult<Enrollment> {
        let identity = session.require(AccessLevel::User)?;

        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(AppError::CourseNotFound);
        }

        // Fast-path duplicate check; the unique (user, course) constraint
        // backstops concurrent identical requests.
        if self
            .enrollments
            .is_enrolled(identity.user_id, course_id)
            .await?
        {
            return Err(AppError::AlreadyEnrolled);
        }

        let enrollment = self.enrollments.create(identity.user_id, course_id).await?;

        tracing::info!(
            user_id = identity.user_id,
            course_id,
            "user enrolled in course"
        );
        Ok(enrollment)
    }

    async fn my_courses(&self, session: &Session) -> AppResult<Vec<EnrolledCourse>> {
        let identity = session.require(AccessLevel::User)?;
        self.enrollments.list_for_user(identity.user_id).await
    }

    async fn roster(&self, session: &Session) -> AppResult<Vec<RosterEntry>> {
        session.require(AccessLevel::Admin)?;
        self.enrollments.list_all_with_identities().await
    }
}
