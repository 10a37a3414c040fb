//! Course catalog service.
//!
//! Reads are public; every write requires an admin session, checked as an
//! explicit guard at the top of the use case.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{AccessLevel, Course, Session};
use crate::errors::{AppResult, OptionExt};
use crate::infra::CourseRepository;

/// Course catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List all courses, most recently created first
    async fn list_courses(&self) -> AppResult<Vec<Course>>;

    /// Get a single course by ID
    async fn get_course(&self, id: i64) -> AppResult<Course>;

    /// Create a course (admin only)
    async fn create_course(
        &self,
        session: &Session,
        title: String,
        description: String,
    ) -> AppResult<Course>;

    /// Update a course (admin only)
    async fn update_course(
        &self,
        session: &Session,
        id: i64,
        title: String,
        description: String,
    ) -> AppResult<Course>;

    /// Delete a course (admin only)
    async fn delete_course(&self, session: &Session, id: i64) -> AppResult<()>;
}

/// Concrete implementation of CatalogService
pub struct CatalogManager {
    courses: Arc<dyn CourseRepository>,
}

impl CatalogManager {
    /// Create new catalog service instance
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CatalogService for CatalogManager {
    async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.courses.list().await
    }

    async fn get_course(&self, id: i64) -> AppResult<Course> {
        self.courses.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_course(
        &self,
        session: &Session,
        title: String,
        description: String,
    ) -> AppResult<Course> {
        let admin = session.require(AccessLevel::Admin)?;

        let course = self.courses.create(title, description).await?;
        tracing::info!(course_id = course.id, admin_id = admin.user_id, "course created");
        Ok(course)
    }

    async fn update_course(
        &self,
        session: &Session,
        id: i64,
        title: String,
        description: String,
    ) -> AppResult<Course> {
        session.require(AccessLevel::Admin)?;
        self.courses.update(id, title, description).await
    }

    async fn delete_course(&self, session: &Session, id: i64) -> AppResult<()> {
        session.require(AccessLevel::Admin)?;
        self.courses.delete(id).await
    }
}
