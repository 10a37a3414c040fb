//! Course domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Course domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Course response (client-facing)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseResponse {
    /// Unique course identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Course title
    #[schema(example = "HTML/CSS Basics")]
    pub title: String,
    /// Course description
    #[schema(example = "Build your first web pages")]
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            created_at: course.created_at,
        }
    }
}
