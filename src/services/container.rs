//! Service container - wires repositories, sessions, and services together.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    AuthService, Authenticator, CatalogManager, CatalogService, EnrollmentManager,
    EnrollmentService,
};
use crate::config::Config;
use crate::infra::{CourseStore, EnrollmentStore, SessionStore, UserStore};

/// Aggregates all application services behind trait objects.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    catalog_service: Arc<dyn CatalogService>,
    enrollment_service: Arc<dyn EnrollmentService>,
}

impl Services {
    /// Create a service container with manually injected services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        catalog_service: Arc<dyn CatalogService>,
        enrollment_service: Arc<dyn EnrollmentService>,
    ) -> Self {
        Self {
            auth_service,
            catalog_service,
            enrollment_service,
        }
    }

    /// Create the full service stack from a database connection and config
    pub fn from_connection(db: DatabaseConnection, config: &Config) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let courses = Arc::new(CourseStore::new(db.clone()));
        let enrollments = Arc::new(EnrollmentStore::new(db));
        let sessions = Arc::new(SessionStore::new(config.session_ttl_hours));

        Self {
            auth_service: Arc::new(Authenticator::new(users, sessions)),
            catalog_service: Arc::new(CatalogManager::new(courses.clone())),
            enrollment_service: Arc::new(EnrollmentManager::new(enrollments, courses)),
        }
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get course catalog service
    pub fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    /// Get enrollment service
    pub fn enrollments(&self) -> Arc<dyn EnrollmentService> {
        self.enrollment_service.clone()
    }
}
