//! Enrollment ledger repository implementation.
//!
//! The unique index on (user_id, course_id) is what actually enforces the
//! one-enrollment-per-pair invariant; the repository translates constraint
//! violations into the named domain outcomes.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

use super::entities::{course, enrollment, user};
use crate::domain::{Course, EnrolledCourse, Enrollment, RosterEntry, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Enrollment ledger trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Check whether a (user, course) pair is already enrolled
    async fn is_enrolled(&self, user_id: i64, course_id: i64) -> AppResult<bool>;

    /// Record a new enrollment with the current timestamp.
    ///
    /// The duplicate-pair constraint maps to `AlreadyEnrolled`; a foreign
    /// key violation on the course maps to `CourseNotFound`.
    async fn create(&self, user_id: i64, course_id: i64) -> AppResult<Enrollment>;

    /// List a user's courses with enrollment timestamps, newest first
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<EnrolledCourse>>;

    /// Full roster for administrative review, newest first
    async fn list_all_with_identities(&self) -> AppResult<Vec<RosterEntry>>;
}

/// Concrete implementation of EnrollmentRepository backed by SeaORM
pub struct EnrollmentStore {
    db: DatabaseConnection,
}

impl EnrollmentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EnrollmentRepository for EnrollmentStore {
    async fn is_enrolled(&self, user_id: i64, course_id: i64) -> AppResult<bool> {
        let existing = enrollment::Entity::find()
            .filter(enrollment::Column::UserId.eq(user_id))
            .filter(enrollment::Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(existing.is_some())
    }

    async fn create(&self, user_id: i64, course_id: i64) -> AppResult<Enrollment> {
        let active_model = enrollment::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            user_id: Set(user_id),
            course_id: Set(course_id),
            enrolled_at: Set(chrono::Utc::now()),
        };

        match active_model.insert(&self.db).await {
            Ok(model) => Ok(Enrollment::from(model)),
            Err(e) => match e.sql_err() {
                // The constraint closes the check-then-insert race between
                // concurrent identical requests.
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AppError::AlreadyEnrolled),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => Err(AppError::CourseNotFound),
                _ => Err(AppError::from(e)),
            },
        }
    }

    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<EnrolledCourse>> {
        let rows = enrollment::Entity::find()
            .find_also_related(course::Entity)
            .filter(enrollment::Column::UserId.eq(user_id))
            .order_by_desc(enrollment::Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        rows.into_iter()
            .map(|(row, course)| {
                // FK guarantees the parent course exists
                let course = course
                    .ok_or_else(|| AppError::internal("enrollment without parent course"))?;
                Ok(EnrolledCourse {
                    course: Course::from(course),
                    enrolled_at: row.enrolled_at,
                })
            })
            .collect()
    }

    async fn list_all_with_identities(&self) -> AppResult<Vec<RosterEntry>> {
        let rows = enrollment::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(enrollment::Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let course_ids: Vec<i64> = rows.iter().map(|(row, _)| row.course_id).collect();
        let courses: HashMap<i64, Course> = course::Entity::find()
            .filter(course::Column::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|model| (model.id, Course::from(model)))
            .collect();

        rows.into_iter()
            .map(|(row, owner)| {
                let owner =
                    owner.ok_or_else(|| AppError::internal("enrollment without parent user"))?;
                let course = courses
                    .get(&row.course_id)
                    .cloned()
                    .ok_or_else(|| AppError::internal("enrollment without parent course"))?;
                Ok(RosterEntry {
                    enrollment: Enrollment::from(row),
                    user: User::from(owner),
                    course,
                })
            })
            .collect()
    }
}
