//! Full-stack scenario: one user's journey from registration through
//! enrollment, running the real services over in-memory repositories.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use enrollhub::domain::{
    Course, EnrolledCourse, Enrollment, RosterEntry, Session, SessionIdentity, User,
};
use enrollhub::errors::{AppError, AppResult};
use enrollhub::infra::{
    CourseRepository, EnrollmentRepository, SessionStore, UserRepository,
};
use enrollhub::services::{
    AuthService, Authenticator, CatalogManager, CatalogService, EnrollmentManager,
    EnrollmentService,
};

#[derive(Default)]
struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        level: String,
    ) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == email) {
            return Err(AppError::DuplicateEmail);
        }
        let user = User {
            id: rows.len() as i64 + 1,
            name,
            email,
            password_hash,
            level,
            is_admin: false,
            created_at: Utc::now(),
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: i64, name: String, level: String) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        user.name = name;
        user.level = level;
        Ok(user.clone())
    }
}

impl InMemoryUsers {
    fn promote_to_admin(&self, email: &str) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(user) = rows.iter_mut().find(|u| u.email == email) {
            user.is_admin = true;
        }
    }
}

#[derive(Default)]
struct InMemoryCourses {
    rows: Mutex<Vec<Course>>,
}

#[async_trait]
impl CourseRepository for InMemoryCourses {
    async fn list(&self) -> AppResult<Vec<Course>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Course>> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, title: String, description: String) -> AppResult<Course> {
        let mut rows = self.rows.lock().unwrap();
        let course = Course {
            id: rows.len() as i64 + 1,
            title,
            description,
            created_at: Utc::now(),
        };
        rows.push(course.clone());
        Ok(course)
    }

    async fn update(&self, id: i64, title: String, description: String) -> AppResult<Course> {
        let mut rows = self.rows.lock().unwrap();
        let course = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound)?;
        course.title = title;
        course.description = description;
        Ok(course.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

struct InMemoryEnrollments {
    rows: Mutex<Vec<Enrollment>>,
    users: Arc<InMemoryUsers>,
    courses: Arc<InMemoryCourses>,
}

impl InMemoryEnrollments {
    fn new(users: Arc<InMemoryUsers>, courses: Arc<InMemoryCourses>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            users,
            courses,
        }
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollments {
    async fn is_enrolled(&self, user_id: i64, course_id: i64) -> AppResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.user_id == user_id && e.course_id == course_id))
    }

    async fn create(&self, user_id: i64, course_id: i64) -> AppResult<Enrollment> {
        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(AppError::CourseNotFound);
        }
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|e| e.user_id == user_id && e.course_id == course_id)
        {
            return Err(AppError::AlreadyEnrolled);
        }
        let enrollment = Enrollment {
            id: rows.len() as i64 + 1,
            user_id,
            course_id,
            enrolled_at: Utc::now(),
        };
        rows.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<EnrolledCourse>> {
        let mut rows: Vec<Enrollment> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let course = self
                .courses
                .find_by_id(row.course_id)
                .await?
                .ok_or(AppError::CourseNotFound)?;
            out.push(EnrolledCourse {
                course,
                enrolled_at: row.enrolled_at,
            });
        }
        Ok(out)
    }

    async fn list_all_with_identities(&self) -> AppResult<Vec<RosterEntry>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let user = self.users.find_by_id(row.user_id).await?.ok_or(AppError::NotFound)?;
            let course = self
                .courses
                .find_by_id(row.course_id)
                .await?
                .ok_or(AppError::CourseNotFound)?;
            out.push(RosterEntry {
                enrollment: row,
                user,
                course,
            });
        }
        Ok(out)
    }
}

struct Stack {
    users: Arc<InMemoryUsers>,
    auth: Authenticator,
    catalog: CatalogManager,
    enrollments: EnrollmentManager,
}

fn stack() -> Stack {
    let users = Arc::new(InMemoryUsers::default());
    let courses = Arc::new(InMemoryCourses::default());
    let enrollments = Arc::new(InMemoryEnrollments::new(users.clone(), courses.clone()));
    let sessions = Arc::new(SessionStore::new(24));

    Stack {
        users: users.clone(),
        auth: Authenticator::new(users, sessions),
        catalog: CatalogManager::new(courses.clone()),
        enrollments: EnrollmentManager::new(enrollments, courses),
    }
}

fn admin_session() -> Session {
    Session::Authenticated(SessionIdentity {
        user_id: 1000,
        name: "Admin".to_string(),
        email: "admin@example.com".to_string(),
        is_admin: true,
    })
}

#[tokio::test]
async fn test_enrollment_journey() {
    let app = stack();

    // Seed the catalog as an administrator
    let rust_course = app
        .catalog
        .create_course(
            &admin_session(),
            "Intro to Rust".to_string(),
            "Ownership, borrowing, and the standard toolchain".to_string(),
        )
        .await
        .unwrap();
    let web_course = app
        .catalog
        .create_course(
            &admin_session(),
            "Web Services".to_string(),
            "HTTP APIs from routing to persistence".to_string(),
        )
        .await
        .unwrap();

    // Jacob signs up and logs in
    app.auth
        .register(
            "Jacob".to_string(),
            "jacob@example.com".to_string(),
            "secret".to_string(),
            "Intermediate".to_string(),
        )
        .await
        .unwrap();

    let (token, jacob) = app
        .auth
        .login("jacob@example.com".to_string(), "secret".to_string())
        .await
        .unwrap();
    assert_eq!(jacob.name, "Jacob");
    assert_eq!(jacob.level, "Intermediate");
    assert!(!jacob.is_admin);

    let session = app.auth.resolve(&token).await;
    assert!(session.is_authenticated());

    // Browse the catalog and enroll in both courses
    let listed = app.catalog.list_courses().await.unwrap();
    assert_eq!(listed.len(), 2);

    app.enrollments
        .enroll(&session, rust_course.id)
        .await
        .unwrap();
    app.enrollments
        .enroll(&session, web_course.id)
        .await
        .unwrap();

    // A second enrollment in the same course is rejected
    let dup = app.enrollments.enroll(&session, rust_course.id).await;
    assert!(matches!(dup.unwrap_err(), AppError::AlreadyEnrolled));

    // The dashboard lists both
    let mine = app.enrollments.my_courses(&session).await.unwrap();
    let mine_ids: Vec<i64> = mine.iter().map(|e| e.course.id).collect();
    assert_eq!(mine.len(), 2);
    assert!(mine_ids.contains(&rust_course.id));
    assert!(mine_ids.contains(&web_course.id));

    // Logging out invalidates the session for protected use cases
    app.auth.logout(&token).await;
    let stale = app.auth.resolve(&token).await;
    let denied = app.enrollments.my_courses(&stale).await;
    assert!(matches!(denied.unwrap_err(), AppError::Unauthenticated));
}

#[tokio::test]
async fn test_listings_are_newest_first() {
    let app = stack();

    // Spaced creations so the timestamps strictly increase
    let oldest = app
        .catalog
        .create_course(
            &admin_session(),
            "Command Line Basics".to_string(),
            "Shells, pipes, and processes".to_string(),
        )
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let middle = app
        .catalog
        .create_course(
            &admin_session(),
            "Version Control".to_string(),
            "Branching and review workflows".to_string(),
        )
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newest = app
        .catalog
        .create_course(
            &admin_session(),
            "Continuous Integration".to_string(),
            "Pipelines and release automation".to_string(),
        )
        .await
        .unwrap();

    let listed = app.catalog.list_courses().await.unwrap();
    let listed_ids: Vec<i64> = listed.iter().map(|c| c.id).collect();
    assert_eq!(listed_ids, vec![newest.id, middle.id, oldest.id]);

    // The dashboard orders by enrollment time, not course creation time
    app.auth
        .register(
            "Member".to_string(),
            "member@example.com".to_string(),
            "secret".to_string(),
            "Beginner".to_string(),
        )
        .await
        .unwrap();
    let (token, _) = app
        .auth
        .login("member@example.com".to_string(), "secret".to_string())
        .await
        .unwrap();
    let session = app.auth.resolve(&token).await;

    app.enrollments.enroll(&session, newest.id).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    app.enrollments.enroll(&session, oldest.id).await.unwrap();

    let mine = app.enrollments.my_courses(&session).await.unwrap();
    let mine_ids: Vec<i64> = mine.iter().map(|e| e.course.id).collect();
    assert_eq!(mine_ids, vec![oldest.id, newest.id]);
    assert!(mine[0].enrolled_at > mine[1].enrolled_at);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let app = stack();

    app.auth
        .register(
            "Jacob".to_string(),
            "jacob@example.com".to_string(),
            "secret".to_string(),
            "Intermediate".to_string(),
        )
        .await
        .unwrap();

    let second = app
        .auth
        .register(
            "Other Jacob".to_string(),
            "jacob@example.com".to_string(),
            "different".to_string(),
            "Beginner".to_string(),
        )
        .await;

    assert!(matches!(second.unwrap_err(), AppError::DuplicateEmail));
}

#[tokio::test]
async fn test_admin_roster_and_course_management() {
    let app = stack();

    let course = app
        .catalog
        .create_course(
            &admin_session(),
            "Databases".to_string(),
            "Schemas, constraints, and migrations".to_string(),
        )
        .await
        .unwrap();

    // A regular member enrolls
    app.auth
        .register(
            "Member".to_string(),
            "member@example.com".to_string(),
            "secret".to_string(),
            "Beginner".to_string(),
        )
        .await
        .unwrap();
    let (token, _) = app
        .auth
        .login("member@example.com".to_string(), "secret".to_string())
        .await
        .unwrap();
    let member_session = app.auth.resolve(&token).await;
    app.enrollments
        .enroll(&member_session, course.id)
        .await
        .unwrap();

    // Members cannot see the roster
    let denied = app.enrollments.roster(&member_session).await;
    assert!(matches!(denied.unwrap_err(), AppError::Forbidden));

    // A stored admin flag grants roster access through a real login
    app.auth
        .register(
            "Site Admin".to_string(),
            "root@example.com".to_string(),
            "secret".to_string(),
            "Advanced".to_string(),
        )
        .await
        .unwrap();
    app.users.promote_to_admin("root@example.com");
    let (admin_token, admin) = app
        .auth
        .login("root@example.com".to_string(), "secret".to_string())
        .await
        .unwrap();
    assert!(admin.is_admin);
    let admin_live = app.auth.resolve(&admin_token).await;

    let roster = app.enrollments.roster(&admin_live).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].user.email, "member@example.com");
    assert_eq!(roster[0].course.id, course.id);

    // Catalog maintenance round-trip
    let updated = app
        .catalog
        .update_course(
            &admin_live,
            course.id,
            "Databases II".to_string(),
            "Indexes and query plans".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Databases II");

    app.catalog.delete_course(&admin_live, course.id).await.unwrap();
    let gone = app.catalog.get_course(course.id).await;
    assert!(matches!(gone.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_profile_update_journey() {
    let app = stack();

    app.auth
        .register(
            "Jacob".to_string(),
            "jacob@example.com".to_string(),
            "secret".to_string(),
            "Beginner".to_string(),
        )
        .await
        .unwrap();
    let (token, _) = app
        .auth
        .login("jacob@example.com".to_string(), "secret".to_string())
        .await
        .unwrap();
    let session = app.auth.resolve(&token).await;

    let updated = app
        .auth
        .update_profile(
            Some(&token),
            &session,
            "Jacob M.".to_string(),
            "Intermediate".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Jacob M.");
    assert_eq!(updated.level, "Intermediate");

    // The session carries the new name without a fresh login
    let refreshed = app.auth.resolve(&token).await;
    assert_eq!(refreshed.identity().unwrap().name, "Jacob M.");
}
