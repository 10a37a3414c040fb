//! Course catalog repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::course::{self, ActiveModel, Entity as CourseEntity};
use crate::domain::Course;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Course catalog trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// List all courses, most recently created first
    async fn list(&self) -> AppResult<Vec<Course>>;

    /// Find course by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>>;

    /// Create a new course
    async fn create(&self, title: String, description: String) -> AppResult<Course>;

    /// Update an existing course; `NotFound` if id is absent
    async fn update(&self, id: i64, title: String, description: String) -> AppResult<Course>;

    /// Delete a course; `NotFound` if id is absent
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of CourseRepository backed by SeaORM
pub struct CourseStore {
    db: DatabaseConnection,
}

impl CourseStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for CourseStore {
    async fn list(&self) -> AppResult<Vec<Course>> {
        let models = CourseEntity::find()
            .order_by_desc(course::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>> {
        let result = CourseEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Course::from))
    }

    async fn create(&self, title: String, description: String) -> AppResult<Course> {
        let active_model = ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            title: Set(title),
            description: Set(description),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Course::from(model))
    }

    async fn update(&self, id: i64, title: String, description: String) -> AppResult<Course> {
        let course = CourseEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = course.into();
        active.title = Set(title);
        active.description = Set(description);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Course::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = CourseEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
